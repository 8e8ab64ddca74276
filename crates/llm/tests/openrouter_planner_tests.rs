use std::time::Duration;

use llm::{LlmError, OpenRouterPlanner, OpenRouterPlannerConfig, PlanProvider};
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> Value {
    json!({
        "id": "gen-123",
        "model": "google/gemini-2.0-flash-001",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 80, "total_tokens": 200}
    })
}

fn planner_for(server: &MockServer) -> OpenRouterPlanner {
    let config = OpenRouterPlannerConfig::new("test-key", "google/gemini-2.0-flash-001")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(5));
    OpenRouterPlanner::new(config).expect("Failed to build planner")
}

fn shape() -> Value {
    json!({"metadata": "object", "tasks": "array"})
}

#[tokio::test]
async fn test_generate_plan_parses_json_content() {
    let server = MockServer::start().await;
    let plan = r#"{"metadata": {"planning_strategy": "phased"}, "tasks": [{"id": "T1", "title": "Start"}]}"#;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(plan)))
        .expect(1)
        .mount(&server)
        .await;

    let planner = planner_for(&server);
    let value = planner.generate_plan("Plan a launch", &shape()).await.unwrap();

    assert_eq!(value["metadata"]["planning_strategy"], "phased");
    assert_eq!(value["tasks"][0]["id"], "T1");
    assert_eq!(planner.name(), "google/gemini-2.0-flash-001");
}

#[tokio::test]
async fn test_generate_plan_sends_prompt_and_json_format() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("[]")))
        .mount(&server)
        .await;

    let planner = planner_for(&server);
    planner.generate_plan("Plan a launch", &shape()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["model"], "google/gemini-2.0-flash-001");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert_eq!(body["messages"][1]["content"], "Plan a launch");
}

#[tokio::test]
async fn test_generate_plan_fenced_content() {
    let server = MockServer::start().await;
    let content = "Here you go:\n```json\n[{\"id\": \"T1\", \"title\": \"Start\"}]\n```";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(content)))
        .mount(&server)
        .await;

    let value = planner_for(&server)
        .generate_plan("Plan", &shape())
        .await
        .unwrap();
    assert!(value.is_array());
}

#[tokio::test]
async fn test_generate_plan_invalid_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion("Sorry, I can't do that.")),
        )
        .mount(&server)
        .await;

    let err = planner_for(&server)
        .generate_plan("Plan", &shape())
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_api_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"message": "upstream overloaded", "type": "server_error"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = planner_for(&server)
        .generate_plan("Plan", &shape())
        .await
        .unwrap_err();

    match err {
        LlmError::Api {
            message,
            status_code,
        } => {
            assert_eq!(message, "upstream overloaded");
            assert_eq!(status_code, Some(503));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_surfaces_as_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("{}"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = OpenRouterPlannerConfig::new("test-key", "model")
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let planner = OpenRouterPlanner::new(config).unwrap();

    let err = planner.generate_plan("Plan", &shape()).await.unwrap_err();
    assert!(matches!(err, LlmError::Http(_)));
}
