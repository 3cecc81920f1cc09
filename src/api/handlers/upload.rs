use axum::{extract::{Multipart, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::api::dtos::responses::UploadResponse;
use crate::api::extractors::auth::AuthUser;
use crate::error::AppError;
use crate::infra::uploads::disk_store::{GALLERY_DIR, PAYMENT_PROOF_DIR};
use crate::state::AppState;

pub const PAYMENT_PROOF_MAX_BYTES: usize = 10 * 1024 * 1024;
pub const GALLERY_MAX_BYTES: usize = 15 * 1024 * 1024;

async fn store_upload(
    state: &AppState,
    mut multipart: Multipart,
    field_name: &str,
    subdir: &str,
    max_bytes: usize,
) -> Result<Json<UploadResponse>, AppError> {
    while let Some(field) = multipart.next_field().await
        .map_err(|e| AppError::Validation(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() != Some(field_name) {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload.bin").to_string();
        let data = field.bytes().await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {}", e)))?;

        if data.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "File size exceeds {}MB limit", max_bytes / (1024 * 1024)
            )));
        }

        let path = state.file_store.save(subdir, &original_name, &data).await?;
        return Ok(Json(UploadResponse {
            message: "File uploaded successfully".to_string(),
            path,
        }));
    }

    Err(AppError::Validation("No file uploaded".into()))
}

pub async fn upload_payment_proof(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    store_upload(&state, multipart, "paymentProof", PAYMENT_PROOF_DIR, PAYMENT_PROOF_MAX_BYTES).await
}

pub async fn upload_gallery(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    store_upload(&state, multipart, "galleryImage", GALLERY_DIR, GALLERY_MAX_BYTES).await
}
