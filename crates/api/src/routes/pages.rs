//! Server-rendered page routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// ```text
/// GET /                   -> dashboard
/// GET /search             -> search
/// GET /video/{video_id}   -> video
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::dashboard))
        .route("/search", get(pages::search))
        .route("/video/{video_id}", get(pages::video))
}
