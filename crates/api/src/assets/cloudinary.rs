//! Cloudinary implementation of [`AssetStore`].
//!
//! Uses signed uploads. The signature is SHA-256 over the sorted upload
//! parameters followed by the API secret, so the account must have SHA-256
//! signing enabled.

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::{AssetConfig, AssetStore, AssetStoreError, ImageUpload, StoredAsset};

/// Upload API base URL.
const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Incoming transformation: shrink anything larger than 1000x1000.
const INCOMING_TRANSFORMATION: &str = "c_limit,w_1000,h_1000";

/// Subset of the upload API response this service needs.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
}

/// HTTP client for the Cloudinary upload API.
pub struct CloudinaryStore {
    client: reqwest::Client,
    config: AssetConfig,
}

impl CloudinaryStore {
    pub fn new(config: AssetConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn upload_url(&self) -> String {
        format!("{API_BASE}/{}/image/upload", self.config.cloud_name)
    }

    /// Sign the given parameters.
    ///
    /// Parameters must already be sorted by name; they are joined as
    /// `k=v&k=v` and the secret is appended before hashing.
    fn sign(&self, params: &[(&str, &str)]) -> String {
        let joined = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        let mut hasher = Sha256::new();
        hasher.update(joined.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl AssetStore for CloudinaryStore {
    async fn upload(&self, upload: ImageUpload) -> Result<StoredAsset, AssetStoreError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = self.sign(&[
            ("folder", self.config.upload_folder.as_str()),
            ("timestamp", timestamp.as_str()),
            ("transformation", INCOMING_TRANSFORMATION),
        ]);

        let file_name = format!("cover.{}", upload.kind.extension());
        let file = reqwest::multipart::Part::bytes(upload.data)
            .file_name(file_name)
            .mime_str(upload.kind.mime())?;

        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("folder", self.config.upload_folder.clone())
            .text("timestamp", timestamp)
            .text("transformation", INCOMING_TRANSFORMATION)
            .text("signature", signature);

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssetStoreError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = response.json().await?;
        tracing::info!(public_id = %parsed.public_id, "Image uploaded to asset host");

        Ok(StoredAsset {
            secure_url: parsed.secure_url,
            public_id: parsed.public_id,
        })
    }
}
