//! Video object storage.
//!
//! [`S3BlobStore`] talks to any S3-compatible bucket (Google Cloud Storage's
//! XML API by default). [`MemoryBlobStore`] is an in-process stand-in.

pub mod config;
pub mod memory;
pub mod s3;

pub use config::{ConfigError, StorageConfig, StorageCredentials};
pub use memory::MemoryBlobStore;
pub use s3::S3BlobStore;

/// Percent-encode each `/`-separated segment of an object key.
pub fn encode_key(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Build `{base}/{bucket}/{key}` with a normalized base and encoded key.
pub fn public_object_url(base: &str, bucket: &str, key: &str) -> String {
    format!(
        "{}/{}/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(bucket),
        encode_key(key)
    )
}
