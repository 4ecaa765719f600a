use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
}

/// A document found under the served root. Recomputed on every listing
/// request; nothing is cached between requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRef {
    /// Basename with extension
    pub name: String,
    /// Root-relative path, forward-slash separators on every platform
    pub path: String,
    /// Parent of `path`, "." for top-level files
    pub dir: String,
    /// Size snapshot taken at listing time
    pub size: u64,
}

/// Body of a save request
#[derive(Debug, Deserialize)]
pub struct SavePayload {
    pub content: String,
}
