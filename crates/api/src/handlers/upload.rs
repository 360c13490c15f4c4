//! Handler for cover image uploads.
//!
//! The image is checked locally (size, declared type, sniffed type) before
//! anything is sent to the asset host. The returned `imageUrl` is what
//! clients later pass as a mixtape's `photoUrl`.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use mixtape_core::error::CoreError;
use mixtape_core::upload::{validate_image_upload, NO_FILE, TOO_LARGE};
use serde::Serialize;

use crate::assets::ImageUpload;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Multipart field carrying the image.
const PHOTO_FIELD: &str = "photo";

/// Response body for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "publicId")]
    pub public_id: String,
}

/// POST /api/upload
///
/// Accepts a multipart form with a `photo` file field.
pub async fn upload(
    user: AuthUser,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<UploadResponse>> {
    let mut multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    let mut photo: Option<(Option<String>, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(PHOTO_FIELD) {
            continue; // ignore unknown fields
        }
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.map_err(multipart_error)?;
        photo = Some((content_type, data.to_vec()));
        break;
    }

    let (content_type, data) =
        photo.ok_or_else(|| AppError::Core(CoreError::Validation(NO_FILE.into())))?;

    let kind = validate_image_upload(content_type.as_deref(), &data)?;
    let size = data.len();

    let stored = state.asset_store.upload(ImageUpload { data, kind }).await?;

    tracing::info!(
        user_id = user.user_id,
        public_id = %stored.public_id,
        size,
        "Cover image uploaded",
    );

    Ok(Json(UploadResponse {
        message: "Image uploaded successfully",
        image_url: stored.secure_url,
        public_id: stored.public_id,
    }))
}

/// Map a multipart read failure to a client error.
///
/// Bodies over the route's size limit surface here, so they get the same
/// message as an oversized file.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Core(CoreError::Validation(TOO_LARGE.into()))
    } else {
        AppError::BadRequest(err.body_text())
    }
}
