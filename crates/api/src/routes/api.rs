//! JSON routes used by camera devices and the dashboard scripts.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::detections;
use crate::state::AppState;

/// ```text
/// GET  /api/last-seen/{item}  -> last_seen
/// POST /api/detection         -> ingest
/// GET  /api/items             -> list_items
/// POST /delete/{id}           -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/last-seen/{item}", get(detections::last_seen))
        .route("/api/detection", post(detections::ingest))
        .route("/api/items", get(detections::list_items))
        .route("/delete/{id}", post(detections::delete))
}
