use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::net::TcpListener;

use mdserve::handlers::{handle_get_file, handle_index, handle_list_files, handle_save_file};
use mdserve::logger::Logger;
use mdserve::types::AppState;
use mdserve::{Config, ServeError, local_ip};

#[tokio::main]
async fn main() -> Result<(), ServeError> {
    if let Err(e) = Logger::init() {
        eprintln!("logger init failed: {}", e);
    }

    let config = Config::from_env()?;
    if !config.root_dir.is_dir() {
        return Err(ServeError::NotFound);
    }
    let addr = config.socket_addr();
    let root = config.root_dir.display().to_string();
    let port = config.port;
    let state = AppState { config: Arc::new(config) };

    let app = Router::new()
        .route("/", get(handle_index))
        .route("/api/files", get(handle_list_files))
        .route("/api/file/*path", get(handle_get_file).post(handle_save_file))
        .with_state(state);

    println!("mdserve started");
    println!("  serving:  {}", root);
    println!("  local:    http://localhost:{}", port);
    println!("  network:  http://{}:{}", local_ip(), port);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(ServeError::from)
}
