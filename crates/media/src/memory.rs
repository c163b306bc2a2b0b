//! In-process [`BlobStore`] for tests and local runs without a bucket.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use camwatch_core::error::CoreError;
use camwatch_core::media::BlobStore;

use crate::public_object_url;

pub struct MemoryBlobStore {
    bucket: String,
    base_url: String,
    objects: Mutex<HashSet<String>>,
    public: Mutex<HashSet<String>>,
    grants: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new(base_url: impl Into<String>, bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            base_url: base_url.into(),
            objects: Mutex::new(HashSet::new()),
            public: Mutex::new(HashSet::new()),
            grants: AtomicUsize::new(0),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Store an (empty) object at `key`.
    pub fn put(&self, key: impl Into<String>) {
        lock(&self.objects).insert(key.into());
    }

    pub fn is_public(&self, key: &str) -> bool {
        lock(&self.public).contains(key)
    }

    /// Total `make_public` calls, including repeats.
    pub fn grant_count(&self) -> usize {
        self.grants.load(Ordering::Relaxed)
    }

    /// Make every call fail, as if the bucket were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::Relaxed);
    }

    fn check_available(&self) -> Result<(), CoreError> {
        if self.unavailable.load(Ordering::Relaxed) {
            Err(CoreError::Internal("blob store unavailable".into()))
        } else {
            Ok(())
        }
    }
}

/// The sets hold plain strings, so a poisoned lock is still consistent.
fn lock(set: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
    set.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn exists(&self, key: &str) -> Result<bool, CoreError> {
        self.check_available()?;
        Ok(lock(&self.objects).contains(key))
    }

    async fn make_public(&self, key: &str) -> Result<(), CoreError> {
        self.check_available()?;
        self.grants.fetch_add(1, Ordering::Relaxed);
        lock(&self.public).insert(key.to_string());
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.base_url, &self.bucket, key)
    }
}
