pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Smart Task Planner API",
        version = "0.1.0",
        description = "AI-powered task planning service that breaks down goals into actionable plans"
    ),
    paths(routes::health_check, routes::create_plan),
    components(schemas(
        routes::HealthResponse,
        planner_core::PlanRequest,
        planner_core::PlanResponse,
        planner_core::PlanMetadata,
        planner_core::Task,
    )),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "plan", description = "Plan generation endpoints"),
    )
)]
pub struct ApiDoc;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health_check))
        .route("/plan", post(routes::create_plan))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
