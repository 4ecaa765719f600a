//! mdserve - a local server for browsing and editing markdown documents
//!
//! Serves the markdown files under a root directory through a small JSON API
//! and an embedded browser UI: list the tree, read a document (raw and
//! rendered), save edits back to disk. Every request path is sandboxed to
//! the served root.

pub mod config;
pub mod errors;
pub mod fs_utils;
pub mod handlers;
pub mod logger;
pub mod services;
pub mod templates;
pub mod types;
pub mod utils;


pub use config::Config;
pub use errors::ServeError;
pub use services::{FileService, MarkdownService};
pub use types::{AppState, DocumentRef, SavePayload};
pub use utils::{escape_attr, escape_html, local_ip};
