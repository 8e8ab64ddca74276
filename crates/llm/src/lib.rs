//! Plan-generation providers.
//!
//! - **PlanProvider**: the interface the orchestrator calls
//! - **OpenRouterPlanner**: hosted model via the OpenRouter chat completions API
//! - **MockPlanner**: deterministic offline stand-in

pub mod error;
pub mod json;
pub mod mock;
pub mod openrouter;
pub mod planner;
pub mod provider;

pub use error::{LlmError, LlmResult};
pub use json::extract_json;
pub use mock::{MockPlanner, MOCK_PROVIDER_NAME};
pub use planner::{OpenRouterPlanner, OpenRouterPlannerConfig};
pub use provider::PlanProvider;
