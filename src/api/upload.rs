use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use super::blob::BlobEvent;
use super::error::ApiError;
use super::ApiState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub blob_url: String,
}

/// `POST /api/upload/{file_type}`: stores the `file` part as
/// `{file_type}/{file name}` in the configured container.
pub async fn upload_file(
    State(state): State<ApiState>,
    Path(file_type): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    if file_type.is_empty() || !file_type.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ApiError::BadRequest(format!(
            "Invalid file type '{file_type}'"
        )));
    }

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        upload = Some((file_name, content_type, bytes));
        break;
    }

    let Some((file_name, content_type, bytes)) = upload.filter(|(_, _, b)| !b.is_empty()) else {
        return Err(ApiError::BadRequest("No file uploaded.".to_string()));
    };
    if file_name.is_empty() {
        return Err(ApiError::BadRequest("Missing file name.".to_string()));
    }
    let size = bytes.len() as u64;
    if size > state.max_file_size {
        return Err(ApiError::PayloadTooLarge {
            limit: state.max_file_size,
        });
    }

    let name = format!("{file_type}/{file_name}");
    debug!(container = %state.container, name = %name, size, "Storing upload");
    state.blobs.ensure_container(&state.container).await?;
    let blob_url = state.blobs.put(&state.container, &name, &bytes).await?;

    state
        .listener
        .blob_written(&BlobEvent {
            container: state.container.clone(),
            name,
            size,
            content_type,
        })
        .await;

    Ok(Json(UploadResponse { blob_url }))
}
