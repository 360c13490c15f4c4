//! Liveness probe, mounted at the root rather than under `/api`.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Where accepted cover images must live.
    pub assets: AssetLocation,
}

/// Public part of the asset configuration. Credentials are never reported.
#[derive(Debug, Serialize)]
pub struct AssetLocation {
    pub trusted_host: String,
    pub upload_folder: String,
}

async fn report(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = match mixtape_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            false
        }
    };

    let assets = &state.config.assets;
    Json(HealthReport {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        assets: AssetLocation {
            trusted_host: assets.trusted_host.clone(),
            upload_folder: assets.upload_folder.clone(),
        },
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(report))
}
