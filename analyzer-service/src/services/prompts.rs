//! Prompt templates for the analysis endpoints.
//!
//! The wording is part of the contract with the generative-text provider:
//! downstream clients render the markdown color markers the debug and heatmap
//! prompts request, so changes here are client-visible.

pub fn explain_prompt(code: &str) -> String {
    format!(
        "Explain this code line-by-line in beginner-friendly way:\n\n{}",
        code
    )
}

pub fn debug_prompt(code: &str) -> String {
    format!(
        "Find bugs, infinite loops, or TLE risks in this code. Return the issues in **red** color using markdown `**` and rest in *blue* using `*`. Suggest fixes too:\n\n{}",
        code
    )
}

pub fn heatmap_prompt(code: &str) -> String {
    format!(
        "Give a performance heatmap for this code. Highlight bottlenecks as `**RED**` and optimized parts as `*BLUE*`:\n\n{}",
        code
    )
}

pub fn ask_prompt(code: &str, question: &str) -> String {
    format!(
        "Given this code:\n{}\n\nAnswer this question: {}",
        code, question
    )
}
