use async_trait::async_trait;
use serde_json::Value;

use crate::error::LlmResult;

/// A source of raw, untrusted plan data.
#[async_trait]
pub trait PlanProvider: Send + Sync {
    /// Return structured plan data for `prompt`, shaped after `schema`.
    async fn generate_plan(&self, prompt: &str, schema: &Value) -> LlmResult<Value>;

    /// Human-friendly provider label.
    fn name(&self) -> &str;
}
