use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

use contractrisk_api::http::{router, AppState};
use contractrisk_api::{AnalyzerConfig, ClauseAnalyzer, OpenAiClient};

pub const VALID_MODEL_OUTPUT: &str = include_str!("../fixtures/valid_model_output.json");

pub const LIABILITY_CLAUSE: &str = "The Contractor shall be liable for any and all damages, \
     losses, costs, and expenses arising from the services, without any limitation.";

/// Chat completion body as returned by the OpenAI API.
pub fn openai_completion(content: &str) -> Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-2024-08-06",
        "choices": [
            {
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }
        ],
        "usage": { "prompt_tokens": 900, "completion_tokens": 220, "total_tokens": 1120 }
    })
}

/// Router wired to a real OpenAI client pointed at `server`.
pub fn app_for(server: &MockServer) -> Router {
    let config = AnalyzerConfig::builder()
        .api_key("test-key")
        .api_base_url(server.uri())
        .build();
    let client = OpenAiClient::new(&config).expect("client creation");
    router(AppState::new(ClauseAnalyzer::new(
        Arc::new(client),
        config.temperature,
    )))
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json response");
    (status, value)
}
