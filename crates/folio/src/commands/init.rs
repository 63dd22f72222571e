//! `folio init` command implementation.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::CliError;
use crate::output::Output;

/// Starter configuration written by `folio init`.
const CONFIG_TEMPLATE: &str = r#"# Folio site configuration.
# String values support ${VAR} and ${VAR:-default} environment expansion.

[server]
host = "127.0.0.1"
port = 8484

[site]
# Directory served at /, relative to this file.
root = "."

[content]
# JSON document directory, relative to the site root.
data_dir = "data"

# Uncomment to enable the admin panel at /admin.
# [admin]
# password = "${FOLIO_ADMIN_PASSWORD}"
# session_key = "${FOLIO_SESSION_KEY}"
"#;

/// Starter landing page, written only when index.html is missing.
const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>My Site</title>
</head>
<body>
    <h1>My Site</h1>
    <p>Edit this page, then manage content at <a href="/admin">/admin</a>.</p>
</body>
</html>
"#;

/// Arguments for the init command.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Directory to initialize (default: current directory).
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Overwrite an existing configuration file.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    /// Execute the init command.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, a configuration
    /// file already exists (without `--force`), or writing a file fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        fs::create_dir_all(&self.directory)?;

        let config_path = self.directory.join(folio_config::CONFIG_FILENAME);
        if config_path.exists() && !self.force {
            return Err(CliError::Validation(format!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            )));
        }
        fs::write(&config_path, CONFIG_TEMPLATE)?;

        fs::create_dir_all(self.directory.join("data"))?;

        // Never clobber an existing landing page
        let index_path = self.directory.join("index.html");
        if !index_path.exists() {
            fs::write(&index_path, INDEX_TEMPLATE)?;
        }

        output.success(&format!(
            "Initialized site in {}",
            self.directory.display()
        ));
        output.info("Run `folio serve` from this directory to preview it");
        Ok(())
    }
}
