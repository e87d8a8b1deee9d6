//! Test utilities and common setup.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::RwLock;

use codedeck::api::{AppState, create_router};
use codedeck::gateway::{AssistantService, GenerationConfig, GenerativeClient};
use codedeck::workspace::WorkspaceStore;

/// Create a test application with the seeded starter workspace and no API
/// key configured.
pub fn test_app() -> Router {
    build_app(WorkspaceStore::seeded(), None)
}

/// Create a test application with an empty workspace and no API key
/// configured.
pub fn test_app_empty() -> Router {
    build_app(WorkspaceStore::new(), None)
}

/// Create a test application wired to a stub generative endpoint that
/// answers every request with the given status and JSON body.
pub async fn test_app_with_gateway(
    store: WorkspaceStore,
    status: StatusCode,
    reply: Value,
) -> Router {
    let base_url = spawn_stub_gateway(status, reply).await;
    let client = GenerativeClient::new(
        &base_url,
        "gemini-2.0-flash",
        "test-key",
        GenerationConfig::default(),
        Duration::from_secs(5),
    )
    .unwrap();
    build_app(store, Some(client))
}

fn build_app(store: WorkspaceStore, client: Option<GenerativeClient>) -> Router {
    let workspace = Arc::new(RwLock::new(store));
    let assistant = Arc::new(AssistantService::new(client, workspace.clone()));
    create_router(AppState {
        workspace,
        assistant,
    })
}

/// Spawn an in-process stand-in for the generative endpoint on an
/// ephemeral port and return its base URL.
async fn spawn_stub_gateway(status: StatusCode, reply: Value) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let app = Router::new().fallback(move || {
        let reply = reply.clone();
        async move { (status, Json(reply)).into_response() }
    });
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/v1beta")
}

/// A well-formed generateContent reply carrying one candidate text.
pub fn code_reply(text: &str) -> Value {
    json!({
        "candidates": [{"content": {"parts": [{"text": text}]}}]
    })
}

/// Read a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
