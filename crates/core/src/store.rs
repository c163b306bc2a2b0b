//! The detection store seam.
//!
//! Handlers hold an `Arc<dyn DetectionStore>` so the PostgreSQL store and the
//! in-memory store are interchangeable.

use async_trait::async_trait;

use crate::detection::{Detection, NewDetection};
use crate::error::CoreError;
use crate::types::DbId;

#[async_trait]
pub trait DetectionStore: Send + Sync {
    /// Persist a detection and return its assigned id. Duplicates are accepted.
    async fn insert(&self, detection: NewDetection) -> Result<DbId, CoreError>;

    /// Every detection, most recent `timestamp` first.
    async fn list_all(&self) -> Result<Vec<Detection>, CoreError>;

    /// Detections of one video, ascending by `timestamp_sec`.
    async fn list_by_video(&self, video_id: &str) -> Result<Vec<Detection>, CoreError>;

    /// Case-insensitive literal substring match on `item`, most recent first.
    async fn search(&self, item: &str) -> Result<Vec<Detection>, CoreError>;

    /// Unique item labels, ascending.
    async fn distinct_items(&self) -> Result<Vec<String>, CoreError>;

    /// Most recent detection whose item contains `item`.
    async fn latest_by_item(&self, item: &str) -> Result<Option<Detection>, CoreError>;

    /// Remove one detection. Returns `false` when no row had that id.
    async fn delete_by_id(&self, id: DbId) -> Result<bool, CoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn ping(&self) -> Result<(), CoreError>;
}
