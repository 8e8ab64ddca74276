use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Task '{task_id}' depends on non-existent task '{missing_id}'")]
    InvalidDependency { task_id: String, missing_id: String },

    #[error("Circular dependency detected involving task '{task_id}'")]
    CyclicDependency { task_id: String },

    #[error("Malformed task at index {index}: {reason}")]
    MalformedTask { index: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, PlanError>;
