//! File handlers: upload, list, delete.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use std::sync::Arc;

use crate::web::dto::{DeleteResponse, FileEntryResponse, FileListResponse, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// POST /upload - Upload a file to the volume.
///
/// Request body: multipart/form-data with a "file" field. The stored name
/// is taken from the part's filename.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut filename: Option<String> = None;
    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            filename = field.file_name().map(|s| s.to_string());
            content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        tracing::error!("failed to read file content: {}", e);
                        ApiError::bad_request("Failed to read file")
                    })?
                    .to_vec(),
            );
        }
    }

    let filename = filename.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    let content = content.ok_or_else(|| ApiError::bad_request("No file content"))?;

    let stored = state.volume.store(&filename, &content).await?;

    tracing::info!("uploaded {} ({} bytes)", stored.name, stored.size_bytes);

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        filename: stored.name,
        size: stored.size_bytes,
        path: stored.path.display().to_string(),
    }))
}

/// GET /files - List all files in the volume.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FileListResponse>, ApiError> {
    let entries = state.volume.list().await?;

    let files: Vec<FileEntryResponse> = entries
        .into_iter()
        .map(|e| FileEntryResponse {
            name: e.name,
            size: e.size_bytes,
            modified: e.modified,
        })
        .collect();
    let count = files.len();

    Ok(Json(FileListResponse { files, count }))
}

/// DELETE /files/:filename - Delete a file from the volume.
pub async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let path = state.volume.delete(&filename).await?;

    tracing::info!("deleted {}", path.display());

    Ok(Json(DeleteResponse {
        filename,
        deleted: true,
    }))
}
