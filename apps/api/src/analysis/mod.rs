//! Resume analysis: prompt construction, the reasoning-service call and
//! validation of its answer, plus the upload endpoint that chains
//! extraction, analysis and catalog matching.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod validation;

pub use analyzer::ResumeAnalyzer;
