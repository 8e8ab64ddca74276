use std::sync::Arc;

use orchestrator::{PlanService, Settings};

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub plan_service: PlanService,
}

impl AppState {
    /// Build state around the provider the settings select.
    pub fn new(settings: Settings) -> orchestrator::Result<Self> {
        let plan_service = PlanService::from_settings(&settings)?;
        Ok(Self::with_service(settings, plan_service))
    }

    pub fn with_service(settings: Settings, plan_service: PlanService) -> Self {
        Self {
            settings: Arc::new(settings),
            plan_service,
        }
    }
}
