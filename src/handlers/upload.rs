use axum::{
    extract::{multipart::{MultipartError, MultipartRejection}, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::{parse_id, AppError};
use crate::services::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub report_id: Uuid,
    pub files: Vec<String>,
    pub message: &'static str,
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!(
            "File too large. Maximum size is {}MB.",
            max_bytes / (1024 * 1024)
        ))
    } else {
        AppError::bad_request(format!("Invalid upload: {}", err.body_text()))
    }
}

/// Writes every allowed file part to disk, recording stored names in `saved`
/// as it goes so a failure part way through can be rolled back.
async fn receive_files(
    state: &AppState,
    multipart: &mut Multipart,
    saved: &mut Vec<String>,
) -> Result<(), AppError> {
    let max_bytes = state.config.max_upload_size;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field.bytes().await.map_err(|e| multipart_error(e, max_bytes))?;

        if let Some(stored) = state
            .uploads
            .save(&original_name, data)
            .await
            .map_err(AppError::internal("Failed to upload media"))?
        {
            saved.push(stored);
        }
    }
    Ok(())
}

async fn discard(state: &AppState, saved: &[String]) {
    for file in saved {
        if let Err(e) = state.uploads.delete(file).await {
            tracing::error!(file = %file, error = %e, "Failed to remove orphaned upload");
        }
    }
}

/// Attaches media files to an existing incident report.
pub async fn upload_incident_media(
    State(state): State<Arc<AppState>>,
    Path(report_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let report_id = parse_id(&report_id, "Incident not found")?;
    let mut multipart =
        multipart.map_err(|e| AppError::bad_request(format!("Invalid upload: {}", e.body_text())))?;

    let exists = state
        .store
        .incident_exists(report_id)
        .await
        .map_err(AppError::internal("Failed to upload media"))?;
    if !exists {
        return Err(AppError::not_found("Incident not found"));
    }

    let mut saved = Vec::new();
    let outcome = match receive_files(&state, &mut multipart, &mut saved).await {
        Ok(()) if saved.is_empty() => {
            return Err(AppError::bad_request("No files with an allowed type were uploaded"));
        }
        Ok(()) => match state.store.append_media(report_id, &saved).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::not_found("Incident not found")),
            Err(e) => Err(AppError::internal("Failed to upload media")(e)),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = outcome {
        discard(&state, &saved).await;
        return Err(e);
    }

    tracing::info!(%report_id, count = saved.len(), "Incident media uploaded");

    Ok(Json(UploadResponse {
        success: true,
        report_id,
        files: saved,
        message: "Media uploaded successfully",
    }))
}
