pub mod config;
pub mod error;
pub mod plan_service;
pub mod prompts;
pub mod provider;

pub use config::Settings;
pub use error::{OrchestratorError, Result};
pub use plan_service::{resolve_horizon, Horizon, PlanService, RawPlan};
pub use prompts::PlanPrompts;
pub use provider::select_provider;
