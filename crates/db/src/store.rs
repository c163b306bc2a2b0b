//! PostgreSQL-backed [`DetectionStore`].

use async_trait::async_trait;
use camwatch_core::detection::{Detection, NewDetection};
use camwatch_core::error::CoreError;
use camwatch_core::store::DetectionStore;
use camwatch_core::types::DbId;

use crate::repositories::DetectionRepo;
use crate::DbPool;

/// Adapts [`DetectionRepo`] to the [`DetectionStore`] seam.
#[derive(Clone)]
pub struct PgDetectionStore {
    pool: DbPool,
}

impl PgDetectionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Driver errors surface as internal errors; the message stays server-side.
fn db_error(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("database error: {err}"))
}

#[async_trait]
impl DetectionStore for PgDetectionStore {
    async fn insert(&self, detection: NewDetection) -> Result<DbId, CoreError> {
        DetectionRepo::insert(&self.pool, &detection)
            .await
            .map_err(db_error)
    }

    async fn list_all(&self) -> Result<Vec<Detection>, CoreError> {
        DetectionRepo::list_all(&self.pool).await.map_err(db_error)
    }

    async fn list_by_video(&self, video_id: &str) -> Result<Vec<Detection>, CoreError> {
        DetectionRepo::list_by_video(&self.pool, video_id)
            .await
            .map_err(db_error)
    }

    async fn search(&self, item: &str) -> Result<Vec<Detection>, CoreError> {
        DetectionRepo::search(&self.pool, item)
            .await
            .map_err(db_error)
    }

    async fn distinct_items(&self) -> Result<Vec<String>, CoreError> {
        DetectionRepo::distinct_items(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn latest_by_item(&self, item: &str) -> Result<Option<Detection>, CoreError> {
        DetectionRepo::latest_by_item(&self.pool, item)
            .await
            .map_err(db_error)
    }

    async fn delete_by_id(&self, id: DbId) -> Result<bool, CoreError> {
        DetectionRepo::delete(&self.pool, id).await.map_err(db_error)
    }

    async fn ping(&self) -> Result<(), CoreError> {
        crate::health_check(&self.pool).await.map_err(db_error)
    }
}
