//! API request handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::gateway::{AppliedAction, ChatMessage};
use crate::workspace::{Language, WorkspaceFile, build_archive};

use super::error::{ApiError, ApiResult};
use super::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Snapshot of the workspace as observers consume it.
#[derive(Debug, Serialize)]
pub struct WorkspaceResponse {
    pub files: Vec<WorkspaceFile>,
    pub active_file_id: Option<String>,
}

impl WorkspaceResponse {
    async fn snapshot(state: &AppState) -> Self {
        let workspace = state.workspace.read().await;
        Self {
            files: workspace.files().to_vec(),
            active_file_id: workspace.active_file_id().map(str::to_string),
        }
    }
}

/// List all files and the active pointer.
pub async fn list_files(State(state): State<AppState>) -> Json<WorkspaceResponse> {
    Json(WorkspaceResponse::snapshot(&state).await)
}

/// Request to create a new file.
#[derive(Debug, Deserialize)]
pub struct CreateFileRequest {
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub language_hint: Option<Language>,
}

/// Create a file and make it active.
pub async fn create_file(
    State(state): State<AppState>,
    Json(request): Json<CreateFileRequest>,
) -> ApiResult<(StatusCode, Json<WorkspaceFile>)> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(ApiError::bad_request("file name must not be blank"));
    }

    let mut workspace = state.workspace.write().await;
    let file = workspace
        .create_file(name, &request.content, request.language_hint)
        .clone();
    info!(file_id = %file.id, name = %file.name, "file created");
    Ok((StatusCode::CREATED, Json(file)))
}

/// Fetch the active file, or 404 when the collection is empty or the
/// pointer dangles.
pub async fn get_active_file(State(state): State<AppState>) -> ApiResult<Json<WorkspaceFile>> {
    let workspace = state.workspace.read().await;
    workspace
        .active_file()
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no active file"))
}

/// Request to replace the active file's content.
#[derive(Debug, Deserialize)]
pub struct UpdateContentRequest {
    pub content: String,
}

/// Replace the active file's content.
///
/// Always succeeds: a dangling pointer makes this a silent no-op, since
/// stale editor callbacks can land during tab transitions.
pub async fn update_active_content(
    State(state): State<AppState>,
    Json(request): Json<UpdateContentRequest>,
) -> StatusCode {
    let mut workspace = state.workspace.write().await;
    workspace.update_active_content(&request.content);
    StatusCode::NO_CONTENT
}

/// Make a file active. Unknown ids are rejected before the pointer moves.
pub async fn select_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<StatusCode> {
    let mut workspace = state.workspace.write().await;
    if !workspace.contains(&file_id) {
        return Err(ApiError::not_found(format!("file not found: {file_id}")));
    }
    workspace.select_file(&file_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Close a tab. Closing the last file leaves the workspace empty.
pub async fn close_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Json<WorkspaceResponse>> {
    {
        let mut workspace = state.workspace.write().await;
        workspace.close_file(&file_id)?;
    }
    Ok(Json(WorkspaceResponse::snapshot(&state).await))
}

/// Delete a file from the explorer. Refused for the last remaining file.
pub async fn delete_file(
    State(state): State<AppState>,
    Path(file_id): Path<String>,
) -> ApiResult<Json<WorkspaceResponse>> {
    {
        let mut workspace = state.workspace.write().await;
        workspace.delete_file(&file_id)?;
    }
    Ok(Json(WorkspaceResponse::snapshot(&state).await))
}

/// Download the whole workspace as a zip archive.
pub async fn export_workspace(State(state): State<AppState>) -> ApiResult<Response> {
    let files = state.workspace.read().await.files().to_vec();

    let bytes = tokio::task::spawn_blocking(move || build_archive(&files))
        .await
        .map_err(|e| ApiError::internal(format!("archive task failed: {e}")))?
        .map_err(|e| ApiError::internal(format!("archive build failed: {e}")))?;

    info!(bytes = bytes.len(), "workspace exported");
    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"project.zip\"".to_string(),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Request carrying one assistant instruction.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub instruction: String,
}

/// Response for one assistant exchange.
#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub message: ChatMessage,
    pub action: AppliedAction,
}

/// Forward an instruction to the AI edit gateway.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<Json<AssistantResponse>> {
    let reply = state.assistant.submit(&request.instruction).await?;
    Ok(Json(AssistantResponse {
        message: reply.message,
        action: reply.action,
    }))
}

/// The assistant exchange log, oldest first.
pub async fn list_messages(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.assistant.messages().await)
}
