use llm::LlmError;
use planner_core::PlanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("Failed to generate plan: {0}")]
    Generation(String),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<LlmError> for OrchestratorError {
    fn from(err: LlmError) -> Self {
        OrchestratorError::Generation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
