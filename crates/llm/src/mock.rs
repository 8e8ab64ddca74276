use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::LlmResult;
use crate::provider::PlanProvider;

pub const MOCK_PROVIDER_NAME: &str = "mock-planner";

/// Deterministic offline planner used when no API key is configured.
#[derive(Debug, Clone, Default)]
pub struct MockPlanner;

impl MockPlanner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PlanProvider for MockPlanner {
    async fn generate_plan(&self, _prompt: &str, _schema: &Value) -> LlmResult<Value> {
        Ok(json!({
            "metadata": {
                "planning_strategy": "rule-based prototype",
                "assumptions": [
                    "Using mock planner because LLM credentials were unavailable.",
                    "Timeline evenly distributed across requested horizon."
                ]
            },
            "tasks": [
                {
                    "id": "T1",
                    "title": "Clarify goal success criteria",
                    "description": "Interview stakeholders to capture expectations and constraints.",
                    "duration_days": 2
                },
                {
                    "id": "T2",
                    "title": "Draft milestone roadmap",
                    "description": "Translate success criteria into phased deliverables with checkpoints.",
                    "depends_on": ["T1"],
                    "duration_days": 3
                },
                {
                    "id": "T3",
                    "title": "Assemble execution squad",
                    "description": "Assign accountable owners and confirm resource availability.",
                    "depends_on": ["T2"],
                    "duration_days": 2
                }
            ]
        }))
    }

    fn name(&self) -> &str {
        MOCK_PROVIDER_NAME
    }
}
