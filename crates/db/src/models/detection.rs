//! Detection row model.

use camwatch_core::detection::Detection;
use camwatch_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `detections` table.
///
/// The client-supplied event time is stored as `detected_at`.
#[derive(Debug, Clone, FromRow)]
pub struct DetectionRow {
    pub id: DbId,
    pub camera_id: String,
    pub video_id: String,
    pub item: String,
    pub confidence: f64,
    pub detected_at: Timestamp,
    pub timestamp_sec: i32,
    pub created_at: Timestamp,
}

impl From<DetectionRow> for Detection {
    fn from(row: DetectionRow) -> Self {
        Detection {
            id: row.id,
            camera_id: row.camera_id,
            video_id: row.video_id,
            item: row.item,
            confidence: row.confidence,
            timestamp: row.detected_at,
            timestamp_sec: row.timestamp_sec,
            created_at: row.created_at,
        }
    }
}
