//! Pull a JSON document out of free-form model output.

use serde_json::Value;
use tracing::warn;

use crate::error::{LlmError, LlmResult};

/// Parse model text as JSON.
///
/// Tries, in order: the whole text, the first fenced code block, the
/// outermost `{...}` span and the outermost `[...]` span.
pub fn extract_json(text: &str) -> LlmResult<Value> {
    let trimmed = text.trim();
    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    if let Some(block) = extract_codeblock(trimmed) {
        return serde_json::from_str(block)
            .map_err(|e| LlmError::InvalidResponse(format!("invalid JSON in code block: {}", e)));
    }

    let mut last_error = None;
    for (open, close) in [('{', '}'), ('[', ']')] {
        let Some(span) = extract_raw_span(trimmed, open, close) else {
            continue;
        };
        match serde_json::from_str(span) {
            Ok(value) => return Ok(value),
            Err(e) => last_error = Some(e),
        }
    }
    if let Some(e) = last_error {
        return Err(LlmError::InvalidResponse(format!("invalid raw JSON: {}", e)));
    }

    warn!(response_len = text.len(), "Could not find JSON in model response");
    Err(LlmError::InvalidResponse(
        "no JSON document found in response".to_string(),
    ))
}

/// Body of the first ``` fenced block, language tag skipped.
fn extract_codeblock(text: &str) -> Option<&str> {
    let fence = text.find("```")?;
    let after_fence = &text[fence + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn extract_raw_span(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let end = text.rfind(close)?;

    if start < end {
        Some(&text[start..=end])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_json() {
        let value = extract_json(r#" {"tasks": []} "#).unwrap();
        assert_eq!(value, json!({"tasks": []}));
    }

    #[test]
    fn test_code_block() {
        let text = "Here is the plan:\n```json\n{\"tasks\": [{\"id\": \"T1\"}]}\n```\nGood luck!";
        let value = extract_json(text).unwrap();
        assert_eq!(value["tasks"][0]["id"], "T1");
    }

    #[test]
    fn test_untagged_code_block() {
        let text = "```\n[{\"id\": \"T1\"}]\n```";
        assert!(extract_json(text).unwrap().is_array());
    }

    #[test]
    fn test_raw_object_in_prose() {
        let text = "Sure! {\"metadata\": {}, \"tasks\": []} Let me know.";
        assert_eq!(extract_json(text).unwrap(), json!({"metadata": {}, "tasks": []}));
    }

    #[test]
    fn test_raw_array_in_prose() {
        let text = "Tasks: [{\"id\": \"T1\"}, {\"id\": \"T2\"}] done";
        assert_eq!(extract_json(text).unwrap().as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_bracketed_prose_before_object() {
        let text = r#"Plan [v1]: {"metadata": {}, "tasks": []}"#;
        assert_eq!(extract_json(text).unwrap(), json!({"metadata": {}, "tasks": []}));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            extract_json("I cannot help with that."),
            Err(LlmError::InvalidResponse(_))
        ));
        assert!(matches!(
            extract_json("{ broken"),
            Err(LlmError::InvalidResponse(_))
        ));
    }
}
