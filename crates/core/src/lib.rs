//! Domain layer for the camera detection dashboard.
//!
//! Holds the detection record types, ingestion coercion rules, literal
//! item matching, video grouping, and the store/blob-store seams that the
//! database, media and API crates plug into. Nothing here performs I/O.

pub mod detection;
pub mod error;
pub mod media;
pub mod search;
pub mod store;
pub mod types;
pub mod video;
