use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use orchestrator::OrchestratorError;
use planner_core::PlanError;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Orchestrator(OrchestratorError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Orchestrator(err) => {
                tracing::error!("Plan generation error: {:?}", err);
                match err {
                    OrchestratorError::Plan(PlanError::InvalidRequest(msg)) => {
                        (StatusCode::BAD_REQUEST, "bad_request", msg)
                    }
                    OrchestratorError::Generation(_) => {
                        (StatusCode::BAD_GATEWAY, "generation_failed", err.to_string())
                    }
                    OrchestratorError::Plan(_) => {
                        (StatusCode::BAD_GATEWAY, "invalid_plan", err.to_string())
                    }
                    OrchestratorError::InvalidConfig(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "internal_error",
                        err.to_string(),
                    ),
                }
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<OrchestratorError> for AppError {
    fn from(err: OrchestratorError) -> Self {
        AppError::Orchestrator(err)
    }
}
