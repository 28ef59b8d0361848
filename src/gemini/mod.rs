//! Google Gemini collaborator.
//!
//! Configuration comes from [`Config`](crate::config::Config); the API key is
//! sent in the `x-goog-api-key` header.

mod client;
mod types;

pub use client::GeminiClient;
pub use types::*;
