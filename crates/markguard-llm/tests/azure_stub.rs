//! Integration tests for the Azure transport against a local stub server

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use markguard_domain::traits::CompletionTransport;
use markguard_domain::{AssessmentError, EndpointRoute, RouteId};
use markguard_llm::{AzureChatTransport, LlmError, RequestPipeline};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stub saw on its last request
#[derive(Debug, Default)]
struct Seen {
    deployment: String,
    api_key: Option<String>,
    api_version: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct StubState {
    seen: Arc<Mutex<Seen>>,
    status: StatusCode,
    reply: Value,
    delay: Duration,
}

async fn completions(
    State(state): State<StubState>,
    Path(deployment): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    {
        let mut seen = state.seen.lock().unwrap();
        seen.deployment = deployment;
        seen.api_key = headers
            .get("api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        seen.api_version = query.get("api-version").cloned();
        seen.body = body;
    }
    tokio::time::sleep(state.delay).await;
    (state.status, Json(state.reply.clone()))
}

/// Start a stub chat-completions server on an ephemeral port
async fn spawn_stub(status: StatusCode, reply: Value, delay: Duration) -> (String, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let state = StubState {
        seen: seen.clone(),
        status,
        reply,
        delay,
    };
    let app = Router::new()
        .route("/openai/deployments/:deployment/chat/completions", post(completions))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

fn route(base_url: String) -> EndpointRoute {
    EndpointRoute {
        id: RouteId::B,
        base_url,
        deployment: "gpt-4o".to_string(),
        api_key: "secret-key".to_string(),
        api_version: "2024-02-01".to_string(),
    }
}

fn verdict_body(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

#[tokio::test]
async fn test_successful_completion() {
    let (base, seen) = spawn_stub(StatusCode::OK, verdict_body("Conflict Level: High"), Duration::ZERO).await;
    let transport = AzureChatTransport::new(Duration::from_secs(5)).unwrap();

    let text = transport.complete(&route(base), "assess SHIELD").await.unwrap();
    assert_eq!(text, "Conflict Level: High");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.deployment, "gpt-4o");
    assert_eq!(seen.api_key.as_deref(), Some("secret-key"));
    assert_eq!(seen.api_version.as_deref(), Some("2024-02-01"));
    assert_eq!(seen.body["model"], "gpt-4o");
    assert_eq!(seen.body["temperature"], 0.0);
    assert_eq!(
        seen.body["messages"][0]["content"],
        "You are an expert in trademark conflict assessment."
    );
    assert_eq!(seen.body["messages"][1]["role"], "user");
    assert_eq!(seen.body["messages"][1]["content"], "assess SHIELD");
}

#[tokio::test]
async fn test_missing_content_gives_placeholder() {
    let (base, _) = spawn_stub(StatusCode::OK, json!({ "choices": [] }), Duration::ZERO).await;
    let transport = AzureChatTransport::new(Duration::from_secs(5)).unwrap();

    let text = transport.complete(&route(base), "prompt").await.unwrap();
    assert_eq!(text, "No explanation provided.");
}

#[tokio::test]
async fn test_server_error_is_a_communication_error() {
    let (base, _) = spawn_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": "boom" }),
        Duration::ZERO,
    )
    .await;
    let transport = AzureChatTransport::new(Duration::from_secs(5)).unwrap();

    let err = transport.complete(&route(base), "prompt").await.unwrap_err();
    assert!(matches!(err, LlmError::Communication(_)), "got {:?}", err);
    assert!(!err.is_timeout());
}

#[tokio::test]
async fn test_server_error_through_pipeline_is_one_attempt() {
    let (base, _) = spawn_stub(StatusCode::INTERNAL_SERVER_ERROR, json!({}), Duration::ZERO).await;
    let transport = AzureChatTransport::new(Duration::from_secs(5)).unwrap();
    let pipeline = RequestPipeline::new(transport);

    let err = pipeline.invoke(&route(base), "prompt").await.unwrap_err();

    assert!(matches!(err, AssessmentError::Network { .. }));
    assert_eq!(pipeline.counter().get(), 1);
}

#[tokio::test]
async fn test_slow_server_is_a_timeout() {
    let (base, _) = spawn_stub(StatusCode::OK, verdict_body("late"), Duration::from_secs(5)).await;
    let transport = AzureChatTransport::new(Duration::from_millis(100)).unwrap();

    let err = transport.complete(&route(base), "prompt").await.unwrap_err();
    assert_eq!(err, LlmError::Timeout);
}

#[tokio::test]
async fn test_connection_refused_is_not_retryable() {
    // Bind then drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = AzureChatTransport::new(Duration::from_secs(5)).unwrap();
    let err = transport
        .complete(&route(format!("http://{}", addr)), "prompt")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Communication(_)), "got {:?}", err);
}
