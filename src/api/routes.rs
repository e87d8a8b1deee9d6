//! API route definitions.

use axum::http::{HeaderValue, Method, header};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_request(DefaultOnRequest::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(handlers::health))
        // Workspace store
        .route("/workspace/files", get(handlers::list_files))
        .route("/workspace/files", post(handlers::create_file))
        .route("/workspace/files/active", get(handlers::get_active_file))
        .route(
            "/workspace/files/active/content",
            put(handlers::update_active_content),
        )
        .route("/workspace/files/{file_id}/select", post(handlers::select_file))
        .route("/workspace/files/{file_id}/close", post(handlers::close_file))
        .route("/workspace/files/{file_id}", delete(handlers::delete_file))
        .route("/workspace/export", get(handlers::export_workspace))
        // AI edit gateway
        .route(
            "/assistant/messages",
            get(handlers::list_messages).post(handlers::send_message),
        )
        .with_state(state)
        .layer(build_cors_layer())
        .layer(trace_layer)
}

/// CORS for the local editor frontends.
fn build_cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:5173",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:5173",
        "http://127.0.0.1:8080",
    ]
    .iter()
    .filter_map(|origin| origin.parse().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}
