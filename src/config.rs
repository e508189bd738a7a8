//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides. Every
//! setting defaults to the legacy file layout, so running without any
//! configuration keeps working.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Legacy accounts file location, relative to the working directory.
pub const DEFAULT_ACCOUNTS_PATH: &str = "accounts.json";

/// Legacy dashboard skeleton location.
pub const DEFAULT_DASHBOARD_TEMPLATE_PATH: &str = "dash.json.template";

/// Legacy panel template location.
pub const DEFAULT_PANEL_TEMPLATE_PATH: &str = "panel.json.template";

/// Legacy output file location.
pub const DEFAULT_OUTPUT_PATH: &str = "out.json";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input and output file locations
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// Account list: a JSON array of objects, each with a `name` field
    #[serde(default = "default_accounts")]
    pub accounts: PathBuf,

    /// Dashboard skeleton the generated panels are merged into
    #[serde(default = "default_dashboard_template")]
    pub dashboard_template: PathBuf,

    /// Per-panel template carrying the substitution tokens
    #[serde(default = "default_panel_template")]
    pub panel_template: PathBuf,

    /// Where the assembled dashboard is written
    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_accounts() -> PathBuf {
    PathBuf::from(DEFAULT_ACCOUNTS_PATH)
}

fn default_dashboard_template() -> PathBuf {
    PathBuf::from(DEFAULT_DASHBOARD_TEMPLATE_PATH)
}

fn default_panel_template() -> PathBuf {
    PathBuf::from(DEFAULT_PANEL_TEMPLATE_PATH)
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            accounts: default_accounts(),
            dashboard_template: default_dashboard_template(),
            panel_template: default_panel_template(),
            output: default_output(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        // Try default config locations
        let config_paths = [
            dirs::config_dir().map(|p| p.join("dashgen").join("config.toml")),
            Some(PathBuf::from("./dashgen.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        // Fall back to environment-only config
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Path overrides
        if let Ok(accounts) = std::env::var("DASHGEN_ACCOUNTS") {
            self.paths.accounts = PathBuf::from(accounts);
        }
        if let Ok(template) = std::env::var("DASHGEN_DASHBOARD_TEMPLATE") {
            self.paths.dashboard_template = PathBuf::from(template);
        }
        if let Ok(template) = std::env::var("DASHGEN_PANEL_TEMPLATE") {
            self.paths.panel_template = PathBuf::from(template);
        }
        if let Ok(output) = std::env::var("DASHGEN_OUTPUT") {
            self.paths.output = PathBuf::from(output);
        }

        // Logging overrides
        if let Ok(level) = std::env::var("DASHGEN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("DASHGEN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# dashgen Configuration
#
# Environment variables override these settings:
# - DASHGEN_ACCOUNTS
# - DASHGEN_DASHBOARD_TEMPLATE
# - DASHGEN_PANEL_TEMPLATE
# - DASHGEN_OUTPUT
# - DASHGEN_LOG_LEVEL
# - DASHGEN_LOG_FORMAT

[paths]
# Account list: a JSON array of objects, each with a "name" field
accounts = "accounts.json"

# Dashboard skeleton the generated panels are merged into
dashboard_template = "dash.json.template"

# Per-panel template with $$NAME$$, $$X_POS$$ and $$Y_POS$$ tokens
panel_template = "panel.json.template"

# Where the assembled dashboard is written
output = "out.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_layout() {
        let config = Config::default();

        assert_eq!(config.paths.accounts, PathBuf::from("accounts.json"));
        assert_eq!(
            config.paths.dashboard_template,
            PathBuf::from("dash.json.template")
        );
        assert_eq!(
            config.paths.panel_template,
            PathBuf::from("panel.json.template")
        );
        assert_eq!(config.paths.output, PathBuf::from("out.json"));
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [paths]
            output = "dashboards/vaults.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.paths.output, PathBuf::from("dashboards/vaults.json"));
        assert_eq!(config.paths.accounts, PathBuf::from("accounts.json"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_default_config_file_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.paths.output, PathBuf::from("out.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [paths]
            accounts = "vaults.json"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.paths.accounts, PathBuf::from("vaults.json"));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_env_overrides() {
        // The only test that touches these variables, so no cross-test races
        std::env::set_var("DASHGEN_ACCOUNTS", "env/accounts.json");
        std::env::set_var("DASHGEN_LOG_LEVEL", "trace");

        let config = Config::from_env();
        assert_eq!(config.paths.accounts, PathBuf::from("env/accounts.json"));
        assert_eq!(config.logging.level, "trace");
        // Untouched settings keep their defaults
        assert_eq!(config.paths.output, PathBuf::from("out.json"));

        std::env::remove_var("DASHGEN_ACCOUNTS");
        std::env::remove_var("DASHGEN_LOG_LEVEL");
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = Config::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[paths\noutput = ").unwrap();
        assert!(matches!(
            Config::load(&bad),
            Err(ConfigError::Parse { .. })
        ));
    }
}
