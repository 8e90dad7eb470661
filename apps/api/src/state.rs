use std::sync::Arc;

use crate::artifacts::ArtifactStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The artifact store is loaded once at startup and read-only
/// thereafter, so cloning the `Arc` per request is all the sharing needed.
#[derive(Clone)]
pub struct AppState {
    pub artifacts: Arc<ArtifactStore>,
}
