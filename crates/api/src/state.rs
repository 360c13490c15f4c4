use std::sync::Arc;

use mixtape_core::asset_link::AssetLinkValidator;

use crate::assets::AssetStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: mixtape_db::DbPool,
    /// Server configuration (JWT settings are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// Gate for client-supplied cover image links.
    pub link_validator: Arc<AssetLinkValidator>,
    /// Image host receiving cover uploads.
    pub asset_store: Arc<dyn AssetStore>,
}
