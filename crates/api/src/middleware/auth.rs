//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use mixtape_core::error::CoreError;
use mixtape_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user extracted from a JWT Bearer token in the `Authorization` header.
///
/// The token is the second space-separated word of the header. A missing
/// header or token is rejected with 401. Anything else that fails
/// verification, including a non-`Bearer` scheme, is rejected with 403.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's id (from `claims.sub`). Every mixtape query is scoped by it.
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Access token required.".into()))
            })?;

        let (scheme, token) = auth_header
            .split_once(' ')
            .map(|(scheme, rest)| (scheme, rest.trim()))
            .filter(|(_, token)| !token.is_empty())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Access token required.".into()))
            })?;

        if !scheme.eq_ignore_ascii_case("Bearer") {
            return Err(AppError::Core(CoreError::Forbidden("Invalid token.".into())));
        }

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| AppError::Core(CoreError::Forbidden("Invalid token.".into())))?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
