//! Route definitions for mixtapes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::mixtapes;
use crate::state::AppState;

/// Mixtape routes, merged at the `/api` root.
///
/// ```text
/// POST   /create-mixtape   -> create
/// GET    /mixtapes         -> list
/// GET    /mixtapes/{id}    -> get_by_id
/// PUT    /mixtapes/{id}    -> update
/// DELETE /mixtapes/{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create-mixtape", post(mixtapes::create))
        .route("/mixtapes", get(mixtapes::list))
        .route(
            "/mixtapes/{id}",
            get(mixtapes::get_by_id)
                .put(mixtapes::update)
                .delete(mixtapes::delete),
        )
}
