//! Repository for the `detections` table.

use camwatch_core::detection::{Detection, NewDetection};
use camwatch_core::types::DbId;
use sqlx::PgPool;

use crate::models::detection::DetectionRow;

/// Column list for `detections` queries.
const COLUMNS: &str =
    "id, camera_id, video_id, item, confidence, detected_at, timestamp_sec, created_at";

/// Newest event first, with `id` as a stable tie-breaker.
const RECENT_FIRST: &str = "ORDER BY detected_at DESC, id DESC";

/// Provides read/write/delete operations for detections.
pub struct DetectionRepo;

impl DetectionRepo {
    /// Insert a detection, returning the generated ID.
    pub async fn insert(pool: &PgPool, input: &NewDetection) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO detections \
                (camera_id, video_id, item, confidence, detected_at, timestamp_sec, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id",
        )
        .bind(&input.camera_id)
        .bind(&input.video_id)
        .bind(&input.item)
        .bind(input.confidence)
        .bind(input.timestamp)
        .bind(input.timestamp_sec)
        .bind(input.created_at)
        .fetch_one(pool)
        .await
    }

    /// List every detection, newest first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Detection>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM detections {RECENT_FIRST}");
        let rows = sqlx::query_as::<_, DetectionRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Detection::from).collect())
    }

    /// List the detections of one video in clip order.
    pub async fn list_by_video(pool: &PgPool, video_id: &str) -> Result<Vec<Detection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM detections WHERE video_id = $1 \
             ORDER BY timestamp_sec ASC, id ASC"
        );
        let rows = sqlx::query_as::<_, DetectionRow>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Detection::from).collect())
    }

    /// Case-insensitive literal substring search on `item`, newest first.
    ///
    /// Uses `strpos` rather than `LIKE`/`~*` so `%`, `_` and regex
    /// metacharacters in `needle` match only themselves. The scan is
    /// sequential; no index serves `strpos`.
    ///
    /// Case folding is PostgreSQL `lower()`, which follows the database
    /// collation. Non-ASCII letters fold like the in-memory store only on a
    /// UTF-8 database with a libc or ICU locale (not `C`).
    pub async fn search(pool: &PgPool, needle: &str) -> Result<Vec<Detection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM detections \
             WHERE strpos(lower(item), lower($1)) > 0 {RECENT_FIRST}"
        );
        let rows = sqlx::query_as::<_, DetectionRow>(&query)
            .bind(needle)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Detection::from).collect())
    }

    /// Most recent detection whose item contains `needle`.
    pub async fn latest_by_item(
        pool: &PgPool,
        needle: &str,
    ) -> Result<Option<Detection>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM detections \
             WHERE strpos(lower(item), lower($1)) > 0 {RECENT_FIRST} LIMIT 1"
        );
        let row = sqlx::query_as::<_, DetectionRow>(&query)
            .bind(needle)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Detection::from))
    }

    /// Unique item labels in code-point order.
    pub async fn distinct_items(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT item FROM (SELECT DISTINCT item FROM detections) AS labels \
             ORDER BY item COLLATE \"C\" ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Hard-delete a detection. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM detections WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
