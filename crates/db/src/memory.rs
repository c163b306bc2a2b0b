//! In-process [`DetectionStore`].
//!
//! Mirrors the PostgreSQL store's ordering and matching rules. Used by the
//! API integration tests and for running the dashboard without a database.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use camwatch_core::detection::{Detection, NewDetection};
use camwatch_core::error::CoreError;
use camwatch_core::search::{cmp_clip_offset, cmp_recent_first, distinct_items, item_matches};
use camwatch_core::store::DetectionStore;
use camwatch_core::types::DbId;
use tokio::sync::RwLock;

pub struct MemoryDetectionStore {
    rows: RwLock<Vec<Detection>>,
    next_id: AtomicI64,
}

impl Default for MemoryDetectionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDetectionStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored detections.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    async fn filtered(&self, needle: &str) -> Vec<Detection> {
        let mut hits: Vec<Detection> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|d| item_matches(&d.item, needle))
            .cloned()
            .collect();
        hits.sort_by(cmp_recent_first);
        hits
    }
}

#[async_trait]
impl DetectionStore for MemoryDetectionStore {
    async fn insert(&self, detection: NewDetection) -> Result<DbId, CoreError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.rows.write().await.push(detection.into_detection(id));
        Ok(id)
    }

    async fn list_all(&self) -> Result<Vec<Detection>, CoreError> {
        let mut all = self.rows.read().await.clone();
        all.sort_by(cmp_recent_first);
        Ok(all)
    }

    async fn list_by_video(&self, video_id: &str) -> Result<Vec<Detection>, CoreError> {
        let mut hits: Vec<Detection> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|d| d.video_id == video_id)
            .cloned()
            .collect();
        hits.sort_by(cmp_clip_offset);
        Ok(hits)
    }

    async fn search(&self, item: &str) -> Result<Vec<Detection>, CoreError> {
        Ok(self.filtered(item).await)
    }

    async fn distinct_items(&self) -> Result<Vec<String>, CoreError> {
        let rows = self.rows.read().await;
        Ok(distinct_items(rows.iter().map(|d| d.item.as_str())))
    }

    async fn latest_by_item(&self, item: &str) -> Result<Option<Detection>, CoreError> {
        Ok(self.filtered(item).await.into_iter().next())
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, CoreError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|d| d.id != id);
        Ok(rows.len() < before)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        Ok(())
    }
}
