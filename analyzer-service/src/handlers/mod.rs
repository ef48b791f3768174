mod analysis;
mod health;
mod sessions;

pub use analysis::{ask, compile_code, debug_code, explain_code, heatmap};
pub use health::{health_check, index, metrics_endpoint, readiness_check};
pub use sessions::{get_merged_code, reset_session, upload_chunk};
