//! Route definitions for cover image uploads.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;
use mixtape_core::upload::MAX_UPLOAD_BYTES;

use crate::handlers::upload;
use crate::state::AppState;

/// Allowance for multipart framing on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/upload`.
///
/// ```text
/// POST /   -> upload
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upload::upload))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES,
        ))
}
