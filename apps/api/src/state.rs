use std::path::PathBuf;
use std::sync::Arc;

use crate::object_store::ObjectStore;
use crate::storage::JobBoardStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn JobBoardStore>,
    /// Durable storage for applicant documents.
    pub objects: Arc<dyn ObjectStore>,
    /// Local directory multipart files are buffered into before upload.
    pub upload_dir: PathBuf,
}
