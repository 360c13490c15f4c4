#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonwebtoken::{encode, EncodingKey, Header};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use mixtape_api::assets::{
    AssetConfig, AssetStore, AssetStoreError, ImageUpload, StoredAsset,
};
use mixtape_api::auth::jwt::{Claims, JwtConfig};
use mixtape_api::config::ServerConfig;
use mixtape_api::router::build_app_router;
use mixtape_api::state::AppState;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Cover URL inside the trusted host and upload folder used by [`test_config`].
pub const HOSTED_COVER: &str =
    "https://res.cloudinary.com/demo/image/upload/v1/harmolinku_uploads/cover.png";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
        assets: AssetConfig {
            cloud_name: "demo".to_string(),
            api_key: "test-key".to_string(),
            api_secret: "test-secret".to_string(),
            trusted_host: "res.cloudinary.com".to_string(),
            upload_folder: "harmolinku_uploads".to_string(),
        },
    }
}

/// In-memory asset store recording every upload it receives.
#[derive(Default)]
pub struct FakeAssetStore {
    pub uploads: Mutex<Vec<ImageUpload>>,
    pub fail: bool,
}

impl FakeAssetStore {
    pub fn failing() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl AssetStore for FakeAssetStore {
    async fn upload(&self, upload: ImageUpload) -> Result<StoredAsset, AssetStoreError> {
        if self.fail {
            return Err(AssetStoreError::Rejected {
                status: 500,
                body: "boom".to_string(),
            });
        }
        let mut uploads = self.uploads.lock().unwrap();
        uploads.push(upload.clone());
        let n = uploads.len();
        Ok(StoredAsset {
            secure_url: format!(
                "https://res.cloudinary.com/demo/image/upload/v1/harmolinku_uploads/fake{n}.{}",
                upload.kind.extension()
            ),
            public_id: format!("harmolinku_uploads/fake{n}"),
        })
    }
}

/// Build the full application router backed by a fresh [`FakeAssetStore`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_store(pool, Arc::new(FakeAssetStore::default()))
}

/// Build the full application router with the given asset store.
///
/// Uses the same `build_app_router` as `main.rs`, so tests exercise the
/// production middleware stack.
pub fn build_test_app_with_store(pool: PgPool, asset_store: Arc<dyn AssetStore>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        link_validator: Arc::new(config.assets.link_validator()),
        asset_store,
    };
    build_app_router(state, &config)
}

/// Mint an access token for `user_id` the way the account service does,
/// signed with the test secret and valid for 15 minutes.
pub fn token_for(user_id: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + 15 * 60,
        iat: now,
        jti: Some(format!("test-{user_id}-{now}")),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token encoding should succeed")
}

/// Send a request carrying a raw `Authorization` header value.
pub async fn get_with_authorization(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::post(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::put(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Build a `multipart/form-data` request carrying one file field.
pub fn multipart_request(
    uri: &str,
    token: &str,
    field: &str,
    content_type: &str,
    data: &[u8],
) -> Request<Body> {
    let boundary = "mixtape-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"cover\"\r\n\
             Content-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::post(uri)
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}
