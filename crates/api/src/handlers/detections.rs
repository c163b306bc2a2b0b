//! JSON handlers for detections.
//!
//! Ingestion, the last-seen lookup, the item list and deletion. Store
//! failures are caught here and turned into the JSON error shapes callers
//! expect; nothing propagates past the handler.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use camwatch_core::detection::{Detection, DetectionPayload, MSG_INVALID_PAYLOAD};
use camwatch_core::search::normalize_term;
use camwatch_core::types::DbId;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: DbId,
}

/// `{found: true, detection}` or `{found: false, message}`.
#[derive(Debug, Serialize)]
pub struct LastSeenResponse {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detection: Option<Detection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    pub items: Vec<String>,
}

/// `success` means the delete completed; `deleted` says whether a row existed.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /api/detection
// ---------------------------------------------------------------------------

/// Validate, coerce and persist one detection posted by a camera.
pub async fn ingest(
    State(state): State<AppState>,
    body: Result<Json<DetectionPayload>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected detection body");
        AppError::BadRequest(MSG_INVALID_PAYLOAD.to_string())
    })?;

    let detection = payload.into_new_detection(chrono::Utc::now())?;
    let camera_id = detection.camera_id.clone();
    let video_id = detection.video_id.clone();
    let item = detection.item.clone();

    let id = state.store.insert(detection).await?;

    tracing::info!(id, %camera_id, %video_id, %item, "Detection saved");

    Ok((
        StatusCode::CREATED,
        Json(IngestResponse {
            success: true,
            message: "Detection saved",
            id,
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /api/last-seen/{item}
// ---------------------------------------------------------------------------

/// Most recent detection whose label contains `item`. Absence is not an error.
pub async fn last_seen(
    State(state): State<AppState>,
    Path(item): Path<String>,
) -> AppResult<Json<LastSeenResponse>> {
    let latest = match normalize_term(Some(&item)) {
        Some(term) => state.store.latest_by_item(&term).await?,
        None => None,
    };

    let response = match latest {
        Some(detection) => LastSeenResponse {
            found: true,
            detection: Some(detection),
            message: None,
        },
        None => LastSeenResponse {
            found: false,
            detection: None,
            message: Some(format!("No detections found for '{}'", item.trim())),
        },
    };

    Ok(Json(response))
}

// ---------------------------------------------------------------------------
// GET /api/items
// ---------------------------------------------------------------------------

/// Every distinct item label, sorted ascending.
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<ItemsResponse>> {
    let items = state.store.distinct_items().await?;
    Ok(Json(ItemsResponse { items }))
}

// ---------------------------------------------------------------------------
// POST /delete/{id}
// ---------------------------------------------------------------------------

/// Delete one detection. Unknown or malformed ids complete successfully
/// with `deleted: false`.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> (StatusCode, Json<DeleteResponse>) {
    let Ok(id) = raw_id.trim().parse::<DbId>() else {
        tracing::debug!(id = %raw_id, "Delete requested for malformed id");
        return (StatusCode::OK, Json(delete_done(false)));
    };

    match state.store.delete_by_id(id).await {
        Ok(deleted) => {
            tracing::info!(id, deleted, "Detection delete completed");
            (StatusCode::OK, Json(delete_done(deleted)))
        }
        Err(err) => {
            tracing::error!(id, error = %err, "Failed to delete detection");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DeleteResponse {
                    success: false,
                    deleted: None,
                    error: Some("Failed to delete detection".to_string()),
                }),
            )
        }
    }
}

fn delete_done(deleted: bool) -> DeleteResponse {
    DeleteResponse {
        success: true,
        deleted: Some(deleted),
        error: None,
    }
}
