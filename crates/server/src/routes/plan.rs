use axum::extract::State;
use axum::Json;
use planner_core::{PlanRequest, PlanResponse};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/plan",
    request_body = PlanRequest,
    responses(
        (status = 200, description = "Generated execution plan", body = PlanResponse),
        (status = 400, description = "Invalid request"),
        (status = 502, description = "Plan provider failed or returned an unusable plan")
    ),
    tag = "plan"
)]
pub async fn create_plan(
    State(state): State<AppState>,
    Json(payload): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, AppError> {
    debug!(
        target_date = ?payload.target_date,
        horizon_days = ?payload.horizon_days,
        has_guidance = payload.guidance.is_some(),
        "Plan requested"
    );
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let response = state.plan_service.generate(&payload).await?;
    Ok(Json(response))
}
