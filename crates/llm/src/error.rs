use thiserror::Error;

/// Errors raised by plan-generation providers
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenRouter API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    #[error("Model response was not valid JSON: {0}")]
    InvalidResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for provider operations
pub type LlmResult<T> = Result<T, LlmError>;
