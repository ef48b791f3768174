//! analyzer-service: HTTP relay that extracts code from uploaded screenshots
//! via OCR, accumulates it per session, and forwards the assembled code to a
//! generative-text API for explanation, debugging and Q&A.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
