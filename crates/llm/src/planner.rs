use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::LlmResult;
use crate::json::extract_json;
use crate::openrouter::{ChatCompletionRequest, ChatMessage, OpenRouterClient, ResponseFormat};
use crate::provider::PlanProvider;

const DEFAULT_TEMPERATURE: f32 = 0.4;
const DEFAULT_MAX_TOKENS: u32 = 2048;

const SYSTEM_PROMPT: &str =
    "You are a planning assistant. Reply with a single JSON document and nothing else.";

/// Settings for the network-backed planner
#[derive(Debug, Clone)]
pub struct OpenRouterPlannerConfig {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl OpenRouterPlannerConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            api_base_url: "https://openrouter.ai/api/v1".to_string(),
            timeout: Duration::from_secs(60),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Planner that asks a hosted model for a structured task plan.
pub struct OpenRouterPlanner {
    client: OpenRouterClient,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenRouterPlanner {
    pub fn new(config: OpenRouterPlannerConfig) -> LlmResult<Self> {
        let client = OpenRouterClient::new(config.api_key, config.api_base_url, config.timeout)?;
        Ok(Self {
            client,
            model: config.model,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl PlanProvider for OpenRouterPlanner {
    async fn generate_plan(&self, prompt: &str, schema: &Value) -> LlmResult<Value> {
        debug!(model = %self.model, shape = %schema, "Requesting plan from model");

        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
            temperature: Some(self.temperature),
            max_tokens: Some(self.max_tokens),
            response_format: Some(ResponseFormat::json_object()),
            stream: Some(false),
        };

        let content = self.client.chat_completion(request).await?;
        info!(model = %self.model, response_len = content.len(), "Model returned plan");

        extract_json(&content)
    }

    fn name(&self) -> &str {
        &self.model
    }
}
