//! VedicUtsav assistant library: chat replies, content generation and lead
//! capture. Re-exports all modules for the binary and integration tests.

pub mod api;
pub mod config;
pub mod error;
pub mod fallback;
pub mod gemini_api;
pub mod generate;
pub mod knowledge;
pub mod language;
pub mod leads;
pub mod pipeline;
pub mod prompt;
pub mod types;
