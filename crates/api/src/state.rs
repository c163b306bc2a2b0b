use std::sync::Arc;

use camwatch_core::media::MediaLocator;
use camwatch_core::store::DetectionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Both collaborators are injected at startup; tests pass in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    /// Detection persistence.
    pub store: Arc<dyn DetectionStore>,
    /// Video clip URL resolution.
    pub media: MediaLocator,
}

impl AppState {
    pub fn new(store: Arc<dyn DetectionStore>, media: MediaLocator) -> Self {
        Self { store, media }
    }
}
