//! Server-rendered page handlers.
//!
//! Store failures never escape as bare errors: list pages render with an
//! error banner and a 500 status, the video page redirects to the dashboard
//! with an `?error=` message.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use camwatch_core::search::normalize_term;
use camwatch_core::video::group_by_video;
use serde::Deserialize;

use crate::state::AppState;
use crate::views;

pub const MSG_LOAD_VIDEOS_FAILED: &str = "Failed to load videos";
pub const MSG_SEARCH_FAILED: &str = "Search failed";
pub const MSG_VIDEO_NOT_FOUND: &str = "Video not found";
pub const MSG_VIDEO_LOAD_FAILED: &str = "Failed to load video";

#[derive(Debug, Deserialize)]
pub struct DashboardParams {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub item: Option<String>,
}

/// Redirect to the dashboard carrying an error banner message.
fn redirect_with_error(message: &str) -> Redirect {
    Redirect::to(&format!("/?error={}", urlencoding::encode(message)))
}

/// GET /
///
/// All detections grouped into videos, most recently active video first.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Response {
    let banner = params.error.as_deref().filter(|e| !e.trim().is_empty());

    match state.store.list_all().await {
        Ok(detections) => {
            let videos = group_by_video(detections);
            Html(views::dashboard::render(&videos, banner)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to load detections for dashboard");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::dashboard::render(&[], Some(MSG_LOAD_VIDEOS_FAILED))),
            )
                .into_response()
        }
    }
}

/// GET /search?item=
///
/// Flat list of matching detections, newest first. A blank term goes back
/// to the dashboard.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(term) = normalize_term(params.item.as_deref()) else {
        return Redirect::to("/").into_response();
    };

    match state.store.search(&term).await {
        Ok(results) => {
            tracing::debug!(term = %term, results = results.len(), "Item search");
            Html(views::search::render(&term, &results, None)).into_response()
        }
        Err(err) => {
            tracing::error!(term = %term, error = %err, "Item search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(views::search::render(&term, &[], Some(MSG_SEARCH_FAILED))),
            )
                .into_response()
        }
    }
}

/// GET /video/{video_id}
///
/// Detections of one video in clip order plus, when the clip exists in
/// storage, a playable URL. Storage failures degrade to "no clip".
pub async fn video(State(state): State<AppState>, Path(video_id): Path<String>) -> Response {
    let detections = match state.store.list_by_video(&video_id).await {
        Ok(detections) => detections,
        Err(err) => {
            tracing::error!(%video_id, error = %err, "Failed to load video detections");
            return redirect_with_error(MSG_VIDEO_LOAD_FAILED).into_response();
        }
    };

    if detections.is_empty() {
        return redirect_with_error(MSG_VIDEO_NOT_FOUND).into_response();
    }

    let video_url = match state.media.resolve(&video_id).await {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(%video_id, error = %err, "Video clip lookup failed");
            None
        }
    };

    Html(views::video::render(&video_id, &detections, video_url.as_deref())).into_response()
}
