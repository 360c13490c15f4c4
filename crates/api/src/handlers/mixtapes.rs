//! Handlers for the mixtape resource.
//!
//! Every handler requires an authenticated user and only ever touches that
//! user's mixtapes. JSON body rejections are returned as `AppError`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use mixtape_core::types::DbId;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::services::mixtape::MixtapePayload;
use crate::services::MixtapeService;
use crate::state::AppState;

/// Response body for a created mixtape.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: DbId,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

/// Response body for an updated mixtape.
#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub message: &'static str,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

/// Response body carrying only a confirmation message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

fn service(state: &AppState) -> MixtapeService<'_> {
    MixtapeService::new(&state.pool, &state.link_validator)
}

/// POST /api/create-mixtape
pub async fn create(
    user: AuthUser,
    State(state): State<AppState>,
    payload: Result<Json<MixtapePayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let saved = service(&state).create(user.user_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Mixtape created successfully.",
            id: saved.id,
            photo_url: saved.cover_url,
        }),
    ))
}

/// GET /api/mixtapes
///
/// The caller's mixtapes, newest first, as a bare JSON array.
pub async fn list(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mixtapes = service(&state).list(user.user_id).await?;
    Ok(Json(mixtapes))
}

/// GET /api/mixtapes/{id}
pub async fn get_by_id(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let mixtape = service(&state).get(user.user_id, id).await?;
    Ok(Json(mixtape))
}

/// PUT /api/mixtapes/{id}
///
/// Full replace of name, description and songs. The cover only changes
/// when `photoUrl` is supplied.
pub async fn update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<MixtapePayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let saved = service(&state).update(user.user_id, id, payload).await?;
    Ok(Json(UpdatedResponse {
        message: "Mixtape updated successfully.",
        photo_url: saved.cover_url,
    }))
}

/// DELETE /api/mixtapes/{id}
pub async fn delete(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    service(&state).delete(user.user_id, id).await?;
    Ok(Json(MessageResponse {
        message: "Mixtape deleted successfully.",
    }))
}
