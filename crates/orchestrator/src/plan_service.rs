//! Plan Service
//!
//! Drives one request through the planning pipeline:
//! 1. Resolve the horizon and build the prompt
//! 2. Ask the provider for raw plan data
//! 3. Normalize and decode the tasks
//! 4. Backfill missing dates, validate dependencies, report timeline conflicts

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use llm::PlanProvider;
use planner_core::{
    backfill_dates, detect_timeline_conflicts, validate_dependencies, PlanMetadata, PlanRequest,
    PlanResponse, Task,
};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::error::{OrchestratorError, Result};
use crate::prompts::PlanPrompts;
use crate::provider::select_provider;

/// Days available to the plan and the date backfilled tasks start from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub days: u32,
    pub fallback_start: NaiveDate,
}

/// A target date wins over `horizon_days`, which wins over the default.
/// The result is never shorter than one day.
pub fn resolve_horizon(request: &PlanRequest, today: NaiveDate, default_days: u32) -> Horizon {
    let days = match request.target_date {
        Some(target) => {
            let remaining = (target - today).num_days().max(1);
            u32::try_from(remaining).unwrap_or(u32::MAX)
        }
        None => request.horizon_days.unwrap_or(default_days).max(1),
    };

    Horizon {
        days,
        fallback_start: today,
    }
}

/// Raw provider output after shape normalization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlan {
    pub planning_strategy: Option<String>,
    pub assumptions: Vec<String>,
    pub tasks: Vec<Value>,
}

impl RawPlan {
    /// Accept either `{metadata, tasks}` or a bare task array.
    pub fn normalize(raw: Value) -> Result<Self> {
        let (metadata, tasks) = match raw {
            Value::Array(tasks) => {
                warn!("Provider returned a list instead of an object, wrapping as tasks");
                (Value::Null, Value::Array(tasks))
            }
            Value::Object(mut map) => (
                map.remove("metadata").unwrap_or(Value::Null),
                map.remove("tasks").unwrap_or(Value::Null),
            ),
            other => {
                return Err(OrchestratorError::Generation(format!(
                    "expected a JSON object or array from the provider, got {}",
                    json_kind(&other)
                )))
            }
        };

        let tasks = match tasks {
            Value::Null => Vec::new(),
            Value::Array(tasks) => tasks,
            other => {
                return Err(OrchestratorError::Generation(format!(
                    "expected 'tasks' to be an array, got {}",
                    json_kind(&other)
                )))
            }
        };

        let (planning_strategy, assumptions) = match metadata {
            Value::Object(meta) => {
                let strategy = meta
                    .get("planning_strategy")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                let assumptions = match meta.get("assumptions") {
                    Some(Value::Array(items)) => {
                        let kept: Vec<String> = items
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect();
                        if kept.len() < items.len() {
                            warn!(
                                dropped = items.len() - kept.len(),
                                "Ignoring non-string plan assumptions"
                            );
                        }
                        kept
                    }
                    Some(Value::String(single)) => vec![single.clone()],
                    _ => Vec::new(),
                };
                (strategy, assumptions)
            }
            Value::Null => (None, Vec::new()),
            other => {
                warn!(kind = json_kind(&other), "Ignoring non-object plan metadata");
                (None, Vec::new())
            }
        };

        Ok(Self {
            planning_strategy,
            assumptions,
            tasks,
        })
    }

    /// Decode every task; the first malformed one rejects the plan.
    pub fn decode_tasks(&self) -> Result<Vec<Task>> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(index, value)| Task::from_value(value, index).map_err(OrchestratorError::from))
            .collect()
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Coordinates prompt construction, provider calls and post-processing.
#[derive(Clone)]
pub struct PlanService {
    provider: Arc<dyn PlanProvider>,
    default_horizon_days: u32,
}

impl PlanService {
    pub fn new(provider: Arc<dyn PlanProvider>, default_horizon_days: u32) -> Self {
        Self {
            provider,
            default_horizon_days: default_horizon_days.max(1),
        }
    }

    /// Build a service around the provider these settings select.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let provider = select_provider(settings)?;
        Ok(Self::new(provider, settings.default_horizon_days))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Generate a plan scheduled from today's local date.
    pub async fn generate(&self, request: &PlanRequest) -> Result<PlanResponse> {
        self.generate_on(request, Local::now().date_naive()).await
    }

    /// Generate a plan as if today were `today`.
    pub async fn generate_on(&self, request: &PlanRequest, today: NaiveDate) -> Result<PlanResponse> {
        request.validate()?;

        let goal_preview: String = request.goal.chars().take(50).collect();
        info!(goal = %goal_preview, provider = %self.provider_name(), "Generating plan");

        let horizon = resolve_horizon(request, today, self.default_horizon_days);
        let prompt = PlanPrompts::plan(request, horizon.days, today);
        debug!(horizon_days = horizon.days, prompt_len = prompt.len(), "Prompt built");

        let raw = self
            .provider
            .generate_plan(&prompt, &PlanPrompts::target_schema())
            .await
            .map_err(|e| {
                error!(error = %e, provider = %self.provider_name(), "Plan provider failed");
                OrchestratorError::from(e)
            })?;

        let raw = RawPlan::normalize(raw)?;
        let tasks = raw.decode_tasks().map_err(|e| {
            error!(error = %e, "Provider returned a malformed task");
            e
        })?;
        info!(tasks = tasks.len(), "Decoded tasks from provider");

        let tasks = backfill_dates(&tasks, horizon.fallback_start, horizon.days);

        validate_dependencies(&tasks).map_err(|e| {
            error!(error = %e, "Plan failed dependency validation");
            OrchestratorError::from(e)
        })?;

        let conflicts = detect_timeline_conflicts(&tasks);
        for conflict in &conflicts {
            warn!(task_id = %conflict.task_id, "Timeline conflict: {}", conflict.description);
        }

        let metadata = PlanMetadata {
            goal: request.goal.clone(),
            planning_strategy: raw.planning_strategy,
            assumptions: raw.assumptions,
            horizon_days: horizon.days,
        };

        info!(
            tasks = tasks.len(),
            conflicts = conflicts.len(),
            horizon_days = horizon.days,
            "Plan generation completed"
        );
        Ok(PlanResponse { metadata, tasks })
    }
}
