use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::errors::ServeError;

pub const DEFAULT_PORT: u16 = 4444;

/// Directory names never descended into during a listing walk.
pub const DEFAULT_EXCLUDED_DIRS: [&str; 5] = [".git", "node_modules", "__pycache__", ".venv", "venv"];

/// Application configuration, immutable for the lifetime of the process
pub struct Config {
    pub root_dir: Arc<PathBuf>,
    pub port: u16,
    pub extension: String,
    pub excluded_dirs: Vec<String>,
}

impl Config {
    /// Build configuration from the environment: the served root comes from
    /// the first positional argument or `MDSERVE_ROOT` (default: the current
    /// working directory), the port from `MDSERVE_PORT`.
    pub fn from_env() -> Result<Self, ServeError> {
        let root = env::args()
            .nth(1)
            .or_else(|| env::var("MDSERVE_ROOT").ok())
            .map(PathBuf::from)
            .map(Ok)
            .unwrap_or_else(env::current_dir)?;
        // Canonical root is what every sandbox check compares against
        let root = root.canonicalize()?;
        let port = env::var("MDSERVE_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        Ok(Self::with_root(root, port))
    }

    /// Create configuration over an explicit root directory
    pub fn with_root(root_dir: PathBuf, port: u16) -> Self {
        Self {
            root_dir: Arc::new(root_dir),
            port,
            extension: "md".to_string(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
        }
    }

    /// Socket address for binding; all interfaces so the server is reachable
    /// from the local network
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
