//! Image hosting for mixtape covers.
//!
//! [`AssetStore`] is the seam between upload handling and the external
//! image host. Production uses [`cloudinary::CloudinaryStore`]; tests plug
//! in an in-memory fake.

pub mod cloudinary;

use async_trait::async_trait;
use mixtape_core::asset_link::{AssetLinkValidator, DEFAULT_TRUSTED_HOST, DEFAULT_UPLOAD_FOLDER};
use mixtape_core::upload::ImageKind;

/// A validated image ready to be forwarded to the host.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub data: Vec<u8>,
    pub kind: ImageKind,
}

/// Where the host stored an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Durable HTTPS URL of the stored image.
    pub secure_url: String,
    /// Host-side identifier, for later management of the asset.
    pub public_id: String,
}

/// Errors from the image host.
#[derive(Debug, thiserror::Error)]
pub enum AssetStoreError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The host answered with a non-2xx status code.
    #[error("Asset host error ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// An external service that stores uploaded images.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `upload` and return its durable location.
    async fn upload(&self, upload: ImageUpload) -> Result<StoredAsset, AssetStoreError>;
}

/// Asset host credentials plus the location trusted cover links must use.
#[derive(Debug, Clone)]
pub struct AssetConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Host serving uploaded images (default: `res.cloudinary.com`).
    pub trusted_host: String,
    /// Folder uploads land in (default: `harmolinku_uploads`).
    pub upload_folder: String,
}

impl AssetConfig {
    /// Load asset host configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default               |
    /// |--------------------------|----------|-----------------------|
    /// | `CLOUDINARY_CLOUD_NAME`  | **yes**  | --                    |
    /// | `CLOUDINARY_API_KEY`     | **yes**  | --                    |
    /// | `CLOUDINARY_API_SECRET`  | **yes**  | --                    |
    /// | `ASSET_TRUSTED_HOST`     | no       | `res.cloudinary.com`  |
    /// | `ASSET_UPLOAD_FOLDER`    | no       | `harmolinku_uploads`  |
    ///
    /// # Panics
    ///
    /// Panics if any required variable is missing or empty.
    pub fn from_env() -> Self {
        Self {
            cloud_name: required_env("CLOUDINARY_CLOUD_NAME"),
            api_key: required_env("CLOUDINARY_API_KEY"),
            api_secret: required_env("CLOUDINARY_API_SECRET"),
            trusted_host: std::env::var("ASSET_TRUSTED_HOST")
                .unwrap_or_else(|_| DEFAULT_TRUSTED_HOST.into()),
            upload_folder: std::env::var("ASSET_UPLOAD_FOLDER")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_FOLDER.into()),
        }
    }

    /// Build the cover link gate matching where uploads are stored.
    pub fn link_validator(&self) -> AssetLinkValidator {
        AssetLinkValidator::new(&self.trusted_host, &self.upload_folder)
    }
}

fn required_env(name: &str) -> String {
    let value = std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"));
    assert!(!value.is_empty(), "{name} must not be empty");
    value
}
