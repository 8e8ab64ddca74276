use std::time::Duration;

use tracing::debug;

use crate::error::{OrchestratorError, Result};

pub const DEFAULT_APP_NAME: &str = "Smart Task Planner API";
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-001";
pub const DEFAULT_API_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_HORIZON_DAYS: u32 = 21;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Process-wide settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub app_name: String,
    /// OpenRouter API key; without one the offline planner is used
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    /// Planning horizon when a request gives neither a horizon nor a target date
    pub default_horizon_days: u32,
    /// Force the offline planner even when an API key is present
    pub mock_mode: bool,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            default_horizon_days: DEFAULT_HORIZON_DAYS,
            mock_mode: false,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through `lookup`; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let default_horizon_days = match get("TASK_PLANNER_DEFAULT_HORIZON_DAYS") {
            Some(raw) => parse_number::<u32>("TASK_PLANNER_DEFAULT_HORIZON_DAYS", &raw)?,
            None => defaults.default_horizon_days,
        };
        if default_horizon_days < 1 {
            return Err(OrchestratorError::InvalidConfig(
                "TASK_PLANNER_DEFAULT_HORIZON_DAYS must be at least 1".to_string(),
            ));
        }

        let mock_mode = match get("TASK_PLANNER_MOCK") {
            Some(raw) => parse_bool("TASK_PLANNER_MOCK", &raw)?,
            None => defaults.mock_mode,
        };

        let request_timeout_secs = match get("TASK_PLANNER_REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("TASK_PLANNER_REQUEST_TIMEOUT_SECS", &raw)?,
            None => defaults.request_timeout_secs,
        };
        if request_timeout_secs == 0 {
            return Err(OrchestratorError::InvalidConfig(
                "TASK_PLANNER_REQUEST_TIMEOUT_SECS must be at least 1".to_string(),
            ));
        }

        let settings = Self {
            app_name: get("TASK_PLANNER_APP_NAME").unwrap_or(defaults.app_name),
            api_key: get("OPENROUTER_API_KEY"),
            model: get("TASK_PLANNER_MODEL").unwrap_or(defaults.model),
            api_base_url: get("OPENROUTER_API_BASE_URL").unwrap_or(defaults.api_base_url),
            default_horizon_days,
            mock_mode,
            request_timeout_secs,
        };

        debug!(
            app = %settings.app_name,
            model = %settings.model,
            has_api_key = settings.api_key.is_some(),
            mock_mode = settings.mock_mode,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// True when plans should come from the hosted model.
    pub fn use_remote_planner(&self) -> bool {
        self.api_key.is_some() && !self.mock_mode
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.parse::<T>().map_err(|_| {
        OrchestratorError::InvalidConfig(format!("{} must be a whole number, got '{}'", key, raw))
    })
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(OrchestratorError::InvalidConfig(format!(
            "{} must be a boolean, got '{}'",
            key, raw
        ))),
    }
}
