use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::task::Task;
use crate::error::PlanError;

/// Incoming request payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanRequest {
    /// High-level outcome the user wants to achieve
    pub goal: String,
    /// Absolute deadline; overrides `horizon_days` when set
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    /// Relative planning window, applied when `target_date` is omitted
    #[serde(default)]
    #[schema(minimum = 1)]
    pub horizon_days: Option<u32>,
    /// Resources, constraints or priorities to take into account
    #[serde(default)]
    pub guidance: Option<String>,
}

impl PlanRequest {
    pub fn new(goal: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            target_date: None,
            horizon_days: None,
            guidance: None,
        }
    }

    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = Some(days);
        self
    }

    pub fn with_target_date(mut self, date: NaiveDate) -> Self {
        self.target_date = Some(date);
        self
    }

    pub fn with_guidance(mut self, guidance: impl Into<String>) -> Self {
        self.guidance = Some(guidance.into());
        self
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.horizon_days == Some(0) {
            return Err(PlanError::InvalidRequest(
                "horizon_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Planning context returned alongside the tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlanMetadata {
    pub goal: String,
    pub planning_strategy: Option<String>,
    #[serde(default)]
    pub assumptions: Vec<String>,
    /// Horizon actually used to pace the schedule
    pub horizon_days: u32,
}

/// Structured response returned by the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlanResponse {
    pub metadata: PlanMetadata,
    pub tasks: Vec<Task>,
}

/// A task that starts before one of its prerequisites is due
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TimelineConflict {
    pub task_id: String,
    pub description: String,
}
