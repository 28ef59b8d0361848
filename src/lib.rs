//! Life Copilot: a task list that asks an AI model to forecast the coming
//! week's stress and suggest how to manage it.

pub mod analysis;
pub mod api;
pub mod config;
pub mod forecast;
pub mod gemini;
pub mod models;
pub mod render;
pub mod session;
pub mod store;
