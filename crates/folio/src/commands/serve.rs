//! `folio serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Site root directory (overrides config).
    #[arg(short, long)]
    site_root: Option<PathBuf>,

    /// Content data directory (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        // Build CLI settings from args
        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            site_root: self.site_root,
            data_dir: self.data_dir,
        };

        // Load config
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Print startup info
        output.highlight(&format!("Folio v{version}"));
        output.info(&format!(
            "Serving {} on http://{}:{}",
            config.site_resolved.root.display(),
            config.server.host,
            config.server.port
        ));
        output.info(&format!(
            "Content directory: {}",
            config.content_resolved.data_dir.display()
        ));

        if config.admin.password.is_none() {
            output.warning("No admin password configured; /admin login is disabled");
        }
        if config.admin.session_key.is_none() {
            output.warning("No session key configured; sessions reset on restart");
        }

        // Build server config and run
        let server_config = server_config_from_config(&config);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
