//! Application state shared across all handlers.

use skiff_core::SkiffConfig;
use skiff_extract::UploadStore;
use skiff_session::SessionStore;
use skiff_upstream::Provider;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state. The session store is the only mutable
/// resource; everything else is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<SkiffConfig>,
    pub sessions: SessionStore,
    pub uploads: UploadStore,
    pub upstream: Arc<dyn Provider>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: SkiffConfig, upstream: Arc<dyn Provider>) -> Self {
        let uploads = UploadStore::new(config.upload.dir.clone());
        Self {
            config: Arc::new(config),
            sessions: SessionStore::new(),
            uploads,
            upstream,
            start_time: Instant::now(),
        }
    }
}
