//! Shared harness for API integration tests.
//!
//! Builds the production router (same middleware stack) over in-memory
//! store and blob-store fakes and drives it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use camwatch_api::config::ServerConfig;
use camwatch_api::router::build_app_router;
use camwatch_api::state::AppState;
use camwatch_core::detection::{Detection, NewDetection};
use camwatch_core::error::CoreError;
use camwatch_core::media::MediaLocator;
use camwatch_core::store::DetectionStore;
use camwatch_core::types::DbId;
use camwatch_db::MemoryDetectionStore;
use camwatch_media::MemoryBlobStore;
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const BLOB_BASE_URL: &str = "https://storage.test";
pub const BLOB_BUCKET: &str = "clips";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        static_dir: "../../public".to_string(),
        db_max_connections: 1,
    }
}

/// Router plus handles on its fakes, for seeding and inspection.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryDetectionStore>,
    pub blobs: Arc<MemoryBlobStore>,
}

pub fn build_test_app() -> TestApp {
    let store = Arc::new(MemoryDetectionStore::new());
    let blobs = Arc::new(MemoryBlobStore::new(BLOB_BASE_URL, BLOB_BUCKET));
    let state = AppState::new(store.clone(), MediaLocator::new(blobs.clone()));

    TestApp {
        router: build_app_router(state, &test_config()),
        store,
        blobs,
    }
}

/// Router whose detection store fails every call.
pub fn build_failing_app() -> Router {
    let blobs = Arc::new(MemoryBlobStore::new(BLOB_BASE_URL, BLOB_BUCKET));
    let state = AppState::new(Arc::new(FailingStore), MediaLocator::new(blobs));
    build_app_router(state, &test_config())
}

/// Router whose detection store never answers, with a one-second timeout.
pub fn build_hanging_app() -> Router {
    let blobs = Arc::new(MemoryBlobStore::new(BLOB_BASE_URL, BLOB_BUCKET));
    let state = AppState::new(Arc::new(HangingStore), MediaLocator::new(blobs));
    let config = ServerConfig {
        request_timeout_secs: 1,
        ..test_config()
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A detection `minutes` after a fixed base time.
pub fn new_detection(item: &str, video: &str, offset: i32, minutes: i64) -> NewDetection {
    let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    NewDetection {
        camera_id: format!("cam-{video}"),
        video_id: video.to_string(),
        item: item.to_string(),
        confidence: 0.9,
        timestamp: base + Duration::minutes(minutes),
        timestamp_sec: offset,
        created_at: Utc::now(),
    }
}

/// A(cup, v1, 0s), B(cup, v1, 5s), C(bottle, v2, 0s), each a minute apart.
pub async fn seed_scenario(store: &MemoryDetectionStore) -> (DbId, DbId, DbId) {
    let a = store.insert(new_detection("cup", "v1", 0, 0)).await.unwrap();
    let b = store.insert(new_detection("cup", "v1", 5, 1)).await.unwrap();
    let c = store.insert(new_detection("bottle", "v2", 0, 2)).await.unwrap();
    (a, b, c)
}

/// A complete, valid ingestion body.
pub fn detection_body() -> serde_json::Value {
    serde_json::json!({
        "cameraId": "cam-7",
        "videoId": "clip-42",
        "item": "cup",
        "confidence": "0.91",
        "timestamp": "2024-05-01T12:00:00Z",
        "timestampSec": "12"
    })
}

// ---------------------------------------------------------------------------
// Failing store
// ---------------------------------------------------------------------------

pub struct FailingStore;

fn unreachable_store() -> CoreError {
    CoreError::Internal("connection refused".into())
}

#[async_trait]
impl DetectionStore for FailingStore {
    async fn insert(&self, _detection: NewDetection) -> Result<DbId, CoreError> {
        Err(unreachable_store())
    }

    async fn list_all(&self) -> Result<Vec<Detection>, CoreError> {
        Err(unreachable_store())
    }

    async fn list_by_video(&self, _video_id: &str) -> Result<Vec<Detection>, CoreError> {
        Err(unreachable_store())
    }

    async fn search(&self, _item: &str) -> Result<Vec<Detection>, CoreError> {
        Err(unreachable_store())
    }

    async fn distinct_items(&self) -> Result<Vec<String>, CoreError> {
        Err(unreachable_store())
    }

    async fn latest_by_item(&self, _item: &str) -> Result<Option<Detection>, CoreError> {
        Err(unreachable_store())
    }

    async fn delete_by_id(&self, _id: DbId) -> Result<bool, CoreError> {
        Err(unreachable_store())
    }

    async fn ping(&self) -> Result<(), CoreError> {
        Err(unreachable_store())
    }
}

// ---------------------------------------------------------------------------
// Hanging store
// ---------------------------------------------------------------------------

pub struct HangingStore;

#[async_trait]
impl DetectionStore for HangingStore {
    async fn insert(&self, _detection: NewDetection) -> Result<DbId, CoreError> {
        std::future::pending().await
    }

    async fn list_all(&self) -> Result<Vec<Detection>, CoreError> {
        std::future::pending().await
    }

    async fn list_by_video(&self, _video_id: &str) -> Result<Vec<Detection>, CoreError> {
        std::future::pending().await
    }

    async fn search(&self, _item: &str) -> Result<Vec<Detection>, CoreError> {
        std::future::pending().await
    }

    async fn distinct_items(&self) -> Result<Vec<String>, CoreError> {
        std::future::pending().await
    }

    async fn latest_by_item(&self, _item: &str) -> Result<Option<Detection>, CoreError> {
        std::future::pending().await
    }

    async fn delete_by_id(&self, _id: DbId) -> Result<bool, CoreError> {
        std::future::pending().await
    }

    async fn ping(&self) -> Result<(), CoreError> {
        std::future::pending().await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, json: serde_json::Value) -> Response {
    post_raw(app, uri, "application/json", json.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}
