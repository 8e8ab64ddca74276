//! OpenRouter API client for chat completions

pub mod client;
pub mod types;

pub use client::OpenRouterClient;
pub use types::*;
