//! HTTP server for the Folio site manager.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - The public site as static files from the site root
//! - A password-gated admin panel with a session cookie
//! - JSON endpoints for reading and saving content documents
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "127.0.0.1".to_string(),
//!         port: 8484,
//!         site_root: PathBuf::from("."),
//!         data_dir: PathBuf::from("data"),
//!         admin_password: Some("hunter2".to_string()),
//!         session_key: None,
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► Rust axum server (folio-server)
//!                        │
//!                        ├─► /login, /logout (signed session cookie)
//!                        │
//!                        ├─► /admin, /api/* (session-gated handlers)
//!                        │       │
//!                        │       └─► DocStore (flat JSON documents)
//!                        │
//!                        └─► Static files (public site root)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod session;
mod state;
mod static_files;
mod views;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use folio_store::DocStore;
use rand::RngExt;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding the public site.
    pub site_root: PathBuf,
    /// Directory holding editable JSON documents.
    pub data_dir: PathBuf,
    /// Admin panel password (`None` disables login).
    pub admin_password: Option<String>,
    /// Secret for signing session tokens (`None` generates a per-process key).
    pub session_key: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8484,
            site_root: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
            admin_password: None,
            session_key: None,
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the site root is missing or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Resolve the site root once; every request path is verified against
    // this canonical form before a file is served
    let site_root = config.site_root.canonicalize().map_err(|e| {
        format!(
            "Site root {} is not accessible: {e}",
            config.site_root.display()
        )
    })?;

    if config.admin_password.is_none() {
        tracing::warn!("No admin password configured; admin panel logins are disabled");
    }

    // Signing key for session tokens. Without a configured key, sessions
    // do not survive a server restart.
    let secret = match &config.session_key {
        Some(key) => key.as_bytes().to_vec(),
        None => {
            tracing::warn!("No session key configured; using a random per-process key");
            let bytes: [u8; 32] = rand::rng().random();
            bytes.to_vec()
        }
    };
    let signer = session::TokenSigner::new(&secret).map_err(|e| e.to_string())?;

    // Create app state
    let state = Arc::new(AppState {
        store: DocStore::new(config.data_dir.clone()),
        site_root,
        admin_password: config.admin_password.clone(),
        signer,
    });

    // Create router
    let app = app::create_router(state);

    // Bind and run server
    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
///
/// # Arguments
///
/// * `config` - Folio configuration
#[must_use]
pub fn server_config_from_config(config: &folio_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        site_root: config.site_resolved.root.clone(),
        data_dir: config.content_resolved.data_dir.clone(),
        admin_password: config.admin.password.clone(),
        session_key: config.admin.session_key.clone(),
    }
}
