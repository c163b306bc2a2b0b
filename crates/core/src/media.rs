//! Video media resolution.
//!
//! Videos live in a blob store under `videos/{video_id}.mp4`. Resolving a
//! video checks the object exists, grants public read, and returns the public
//! URL. The ACL grant is repeated on every resolve; it is idempotent, so
//! concurrent resolves of the same video need no coordination.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::CoreError;

/// Key prefix for video objects.
pub const VIDEO_PREFIX: &str = "videos";

/// File extension of stored clips.
pub const VIDEO_EXTENSION: &str = "mp4";

/// Object storage operations needed to serve video clips.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Whether an object exists at `key`.
    async fn exists(&self, key: &str) -> Result<bool, CoreError>;

    /// Grant anonymous read access to the object at `key`.
    async fn make_public(&self, key: &str) -> Result<(), CoreError>;

    /// Public URL for `key`. Does not check existence.
    fn public_url(&self, key: &str) -> String;
}

/// Map a video id to its object key.
pub fn video_object_key(video_id: &str) -> String {
    format!("{VIDEO_PREFIX}/{video_id}.{VIDEO_EXTENSION}")
}

/// Resolves video ids to playable URLs.
#[derive(Clone)]
pub struct MediaLocator {
    blobs: Arc<dyn BlobStore>,
}

impl MediaLocator {
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self { blobs }
    }

    /// Public URL of the video's clip, or `None` when no object backs it.
    pub async fn resolve(&self, video_id: &str) -> Result<Option<String>, CoreError> {
        let key = video_object_key(video_id);

        if !self.blobs.exists(&key).await? {
            return Ok(None);
        }

        self.blobs.make_public(&key).await?;
        Ok(Some(self.blobs.public_url(&key)))
    }
}
