//! Route tables.
//!
//! ```text
//! GET  /health                    service + store health
//!
//! GET  /                          dashboard (videos grouped)   ?error=
//! GET  /search                    item search results          ?item=
//! GET  /video/{video_id}          one video + playable clip
//!
//! GET  /api/last-seen/{item}      latest matching detection
//! POST /api/detection             ingest one detection
//! GET  /api/items                 distinct item labels
//! POST /delete/{id}               delete one detection
//!
//! GET  /static/*                  stylesheet and scripts
//! ```

pub mod api;
pub mod health;
pub mod pages;
