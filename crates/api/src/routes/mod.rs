pub mod health;
pub mod mixtapes;
pub mod upload;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /create-mixtape                 create (POST)
/// /mixtapes                       list (GET)
/// /mixtapes/{id}                  get, update (PUT), delete
/// /upload                         cover image upload (POST, multipart)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(mixtapes::router())
        .nest("/upload", upload::router())
}
