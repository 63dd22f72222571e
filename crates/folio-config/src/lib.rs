//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `admin.password`
//! - `admin.session_key`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override site root directory.
    pub site_root: Option<PathBuf>,
    /// Override content data directory.
    pub data_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site configuration (paths are relative strings from TOML).
    #[serde(default)]
    site: SiteConfigRaw,
    /// Content configuration (paths are relative strings from TOML).
    #[serde(default)]
    content: ContentConfigRaw,
    /// Admin panel configuration.
    pub admin: AdminConfig,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8484,
        }
    }
}

/// Raw site configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    root: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Directory holding the public site (index.html and assets).
    pub root: PathBuf,
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    data_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding the editable JSON content documents.
    pub data_dir: PathBuf,
}

/// Admin panel configuration.
///
/// Both fields are optional and usually provided via environment variable
/// expansion rather than written into the file. A missing password disables
/// admin login entirely; a missing session key means a fresh key is generated
/// per process.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Admin panel password. Unset disables login.
    pub password: Option<String>,
    /// Secret used to sign session tokens. Unset generates a per-process key.
    pub session_key: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`admin.password`").
        field: String,
        /// Error message (e.g., "${`FOLIO_ADMIN_PASSWORD`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(site_root) = &settings.site_root {
            self.site_resolved.root.clone_from(site_root);
        }
        if let Some(data_dir) = &settings.data_dir {
            self.content_resolved.data_dir.clone_from(data_dir);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfigRaw::default(),
            content: ContentConfigRaw::default(),
            admin: AdminConfig::default(),
            site_resolved: SiteConfig {
                root: base.to_path_buf(),
            },
            content_resolved: ContentConfig {
                data_dir: base.join("data"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid values.
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_admin()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate admin configuration.
    ///
    /// The fields are optional, but when present they must not be empty:
    /// an empty password or signing key silently weakens the admin gate.
    fn validate_admin(&self) -> Result<(), ConfigError> {
        if let Some(password) = &self.admin.password {
            require_non_empty(password, "admin.password")?;
        }
        if let Some(session_key) = &self.admin.session_key {
            require_non_empty(session_key, "admin.session_key")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        if let Some(ref password) = self.admin.password {
            self.admin.password = Some(expand::expand_env(password, "admin.password")?);
        }
        if let Some(ref session_key) = self.admin.session_key {
            self.admin.session_key = Some(expand::expand_env(session_key, "admin.session_key")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// The data directory resolves relative to the site root, so the default
    /// layout keeps content documents readable through the public static
    /// route while writes stay behind the authenticated API.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let root = config_dir.join(self.site.root.as_deref().unwrap_or("."));
        let data_dir = root.join(self.content.data_dir.as_deref().unwrap_or("data"));

        self.site_resolved = SiteConfig { root };
        self.content_resolved = ContentConfig { data_dir };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8484);
        assert_eq!(config.site_resolved.root, PathBuf::from("/test"));
        assert_eq!(
            config.content_resolved.data_dir,
            PathBuf::from("/test/data")
        );
        assert!(config.admin.password.is_none());
        assert!(config.admin.session_key.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8484);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_parse_admin_config() {
        let toml = r#"
[admin]
password = "hunter2"
session_key = "not-a-good-key"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.admin.password.as_deref(), Some("hunter2"));
        assert_eq!(config.admin.session_key.as_deref(), Some("not-a-good-key"));
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[site]
root = "public"

[content]
data_dir = "content"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.root, PathBuf::from("/project/public"));
        assert_eq!(
            config.content_resolved.data_dir,
            PathBuf::from("/project/public/content")
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let toml = "";
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site_resolved.root, PathBuf::from("/project"));
        assert_eq!(
            config.content_resolved.data_dir,
            PathBuf::from("/project/data")
        );
    }

    #[test]
    fn test_resolve_paths_absolute_data_dir() {
        let toml = r#"
[content]
data_dir = "/var/lib/folio/data"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.data_dir,
            PathBuf::from("/var/lib/folio/data")
        );
    }

    #[test]
    fn test_apply_cli_settings_host_and_port() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            host: Some("0.0.0.0".to_owned()),
            port: Some(9000),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_apply_cli_settings_paths() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            site_root: Some(PathBuf::from("/srv/site")),
            data_dir: Some(PathBuf::from("/srv/site/content")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site_resolved.root, PathBuf::from("/srv/site"));
        assert_eq!(
            config.content_resolved.data_dir,
            PathBuf::from("/srv/site/content")
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let config_before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.server.host, config_before.server.host);
        assert_eq!(config.server.port, config_before.server.port);
        assert_eq!(config.site_resolved.root, config_before.site_resolved.root);
    }

    #[test]
    fn test_expand_env_vars_admin_password() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TEST_FOLIO_PASSWORD", "s3cret");
        }

        let toml = r#"
[admin]
password = "${TEST_FOLIO_PASSWORD}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.admin.password.as_deref(), Some("s3cret"));

        unsafe {
            std::env::remove_var("TEST_FOLIO_PASSWORD");
        }
    }

    #[test]
    fn test_expand_env_vars_session_key_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TEST_FOLIO_SESSION_KEY");
        }

        let toml = r#"
[admin]
session_key = "${TEST_FOLIO_SESSION_KEY:-fallback-key}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.admin.session_key.as_deref(), Some("fallback-key"));
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MISSING_VAR_CONFIG_TEST");
        }

        let toml = r#"
[admin]
password = "${MISSING_VAR_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let result = config.expand_env_vars();

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_CONFIG_TEST"));
        assert!(err.to_string().contains("admin.password"));
    }

    #[test]
    fn test_expand_env_vars_literal_unchanged() {
        let toml = r#"
[server]
host = "127.0.0.1"

[admin]
password = "plain-password"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.admin.password.as_deref(), Some("plain-password"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_admin_password_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.admin.password = Some(String::new());
        assert_validation_error(&config, &["admin.password", "empty"]);
    }

    #[test]
    fn test_validate_admin_session_key_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.admin.session_key = Some(String::new());
        assert_validation_error(&config, &["admin.session_key", "empty"]);
    }

    #[test]
    fn test_validate_unset_admin_fields_pass() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.admin.password.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_missing_path_is_not_found() {
        let result = Config::load(Some(Path::new("/nonexistent/folio.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
