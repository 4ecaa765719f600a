use axum::{
    Json,
    extract::{Path as AxumPath, State},
    response::{Html, IntoResponse},
};
use log::{debug, info};
use serde_json::json;

use crate::errors::ServeError;
use crate::fs_utils::{normalize_request_path, resolve_within};
use crate::services::{FileService, MarkdownService};
use crate::templates;
use crate::types::{AppState, SavePayload};

/// Serve the embedded browser UI
pub async fn handle_index() -> Html<&'static str> {
    Html(templates::APP_SHELL)
}

/// List every matching document under the served root
pub async fn handle_list_files(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ServeError> {
    let file_service = FileService::new(&state.config);
    let files = file_service.list_documents()?;
    info!("Listing returned {} files", files.len());
    Ok(Json(json!({
        "success": true,
        "files": files,
        "base_dir": state.config.root_dir.display().to_string(),
    })))
}

/// Read a document and return both its raw text and rendered HTML
pub async fn handle_get_file(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<impl IntoResponse, ServeError> {
    debug!("File request received: '{}'", path);
    let target = resolve_within(&state.config.root_dir, &path)?;
    let normalized = normalize_request_path(&path);

    let file_service = FileService::new(&state.config);
    let content = file_service.read_document(&target)?;
    let html = MarkdownService::new().render(&content);

    info!("Serving '{}' ({} bytes raw)", normalized, content.len());
    Ok(Json(json!({
        "success": true,
        "content": content,
        "html": html,
        "path": normalized,
    })))
}

/// Persist a document, creating parent directories as needed
pub async fn handle_save_file(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
    Json(payload): Json<SavePayload>,
) -> Result<impl IntoResponse, ServeError> {
    debug!("Save request received: '{}'", path);
    let target = resolve_within(&state.config.root_dir, &path)?;
    let normalized = normalize_request_path(&path);

    let file_service = FileService::new(&state.config);
    file_service.write_document(&target, &payload.content)?;

    info!("Saved '{}' ({} bytes)", normalized, payload.content.len());
    Ok(Json(json!({
        "success": true,
        "message": "file saved",
    })))
}
