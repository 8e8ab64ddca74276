use std::sync::Arc;

use llm::{MockPlanner, OpenRouterPlanner, OpenRouterPlannerConfig, PlanProvider};
use tracing::info;

use crate::config::Settings;
use crate::error::{OrchestratorError, Result};

/// Pick the plan provider for these settings: the hosted model when an API
/// key is set and mock mode is off, the offline planner otherwise.
pub fn select_provider(settings: &Settings) -> Result<Arc<dyn PlanProvider>> {
    match (&settings.api_key, settings.use_remote_planner()) {
        (Some(api_key), true) => {
            let config = OpenRouterPlannerConfig::new(api_key.clone(), settings.model.clone())
                .with_base_url(settings.api_base_url.clone())
                .with_timeout(settings.request_timeout());
            let planner = OpenRouterPlanner::new(config).map_err(|e| {
                OrchestratorError::InvalidConfig(format!("cannot build model client: {}", e))
            })?;
            info!(model = %settings.model, "Using OpenRouter planner");
            Ok(Arc::new(planner))
        }
        _ => {
            info!(mock_mode = settings.mock_mode, "Using offline mock planner");
            Ok(Arc::new(MockPlanner::new()))
        }
    }
}
