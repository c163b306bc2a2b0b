//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod detection_repo;

pub use detection_repo::DetectionRepo;
