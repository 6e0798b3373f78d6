//! Configuration management for plotdoc.
//!
//! Parses `plotdoc.toml` configuration files with serde and provides
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
//! - `plotly.script_url`
//! - `plotly.width`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default plotly.js bundle.
pub const DEFAULT_SCRIPT_URL: &str = "https://cdn.plot.ly/plotly-2.16.3.min.js";

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "plotdoc.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the plotly.js bundle URL.
    pub script_url: Option<String>,
    /// Override whether the loader script is appended.
    pub include_script: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Plot embedding configuration.
    pub plotly: PlotlyConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[plotly]` section.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotlyConfig {
    /// plotly.js bundle URL (http(s) or root-relative).
    pub script_url: String,
    /// Append the plotly.js bundle and loader to documents with plots.
    pub include_script: bool,
    /// Whether plots resize with their container.
    pub responsive: bool,
    /// CSS width of plot containers.
    pub width: String,
}

impl Default for PlotlyConfig {
    fn default() -> Self {
        Self {
            script_url: DEFAULT_SCRIPT_URL.to_owned(),
            include_script: true,
            responsive: true,
            width: "100%".to_owned(),
        }
    }
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
        /// Config field path (e.g., "`plotly.script_url`").
        field: String,
        /// Error message (e.g., "${`PLOTLY_CDN`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `plotdoc.toml` in the current directory and parents,
    /// falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let start = std::env::current_dir().unwrap_or_default();
        Self::load_from(&start, config_path, cli_settings)
    }

    /// Like [`load`](Self::load), discovering from `start` instead of the
    /// current directory.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load).
    pub fn load_from(
        start: &Path,
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = discover_config(start) {
            tracing::debug!(path = %discovered.display(), "Discovered config file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(script_url) = &settings.script_url {
            self.plotly.script_url.clone_from(script_url);
        }
        if let Some(include_script) = settings.include_script {
            self.plotly.include_script = include_script;
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.plotly.script_url, "plotly.script_url")?;
        require_script_url(&self.plotly.script_url, "plotly.script_url")?;
        require_non_empty(self.plotly.width.trim(), "plotly.width")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.plotly.script_url = expand::expand_env(&self.plotly.script_url, "plotly.script_url")?;
        self.plotly.width = expand::expand_env(&self.plotly.width, "plotly.width")?;
        Ok(())
    }
}

/// Search for a config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require an http(s) URL or a root-relative path.
fn require_script_url(url: &str, field: &str) -> Result<(), ConfigError> {
    let root_relative = url.starts_with('/') && !url.starts_with("//");
    if !root_relative && !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http://, https:// or /"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.plotly.script_url, DEFAULT_SCRIPT_URL);
        assert!(config.plotly.include_script);
        assert!(config.plotly.responsive);
        assert_eq!(config.plotly.width, "100%");
        assert!(config.config_path.is_none());
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.plotly.script_url, DEFAULT_SCRIPT_URL);
    }

    #[test]
    fn test_parse_plotly_config() {
        let toml = r#"
[plotly]
script_url = "/static/plotly.min.js"
include_script = false
responsive = false
width = "640px"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.plotly.script_url, "/static/plotly.min.js");
        assert!(!config.plotly.include_script);
        assert!(!config.plotly.responsive);
        assert_eq!(config.plotly.width, "640px");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = toml::from_str("[plotly]\nheight = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[plotly]\nwidth = \"80%\"\n");

        let config = Config::load_from(dir.path(), Some(&path), None).unwrap();
        assert_eq!(config.plotly.width, "80%");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = Config::load_from(dir.path(), Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == missing));
    }

    #[test]
    fn test_discovers_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[plotly]\nresponsive = false\n");
        let nested = dir.path().join("docs/posts");
        std::fs::create_dir_all(&nested).unwrap();

        let config = Config::load_from(&nested, None, None).unwrap();
        assert!(!config.plotly.responsive);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_no_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(discover_config(dir.path()), None);
    }

    #[test]
    fn test_invalid_script_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[plotly]\nscript_url = \"ftp://cdn/plotly.js\"\n");

        let err = Config::load_from(dir.path(), Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("plotly.script_url"));
    }

    #[test]
    fn test_protocol_relative_script_url_rejected() {
        assert!(require_script_url("//cdn.plot.ly/plotly.js", "f").is_err());
        assert!(require_script_url("/static/plotly.js", "f").is_ok());
        assert!(require_script_url("https://cdn.plot.ly/plotly.js", "f").is_ok());
    }

    #[test]
    fn test_empty_width_rejected() {
        let mut config = Config::default();
        config.plotly.width = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: plotly.width cannot be empty");
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[plotly\n");

        let err = Config::load_from(dir.path(), Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_expansion_with_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[plotly]\nscript_url = \"${PLOTDOC_TEST_UNSET_CDN:-https://cdn.example.com/plotly.js}\"\n",
        );

        let config = Config::load_from(dir.path(), Some(&path), None).unwrap();
        assert_eq!(config.plotly.script_url, "https://cdn.example.com/plotly.js");
    }

    #[test]
    fn test_env_expansion_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[plotly]\nwidth = \"${PLOTDOC_TEST_UNSET_WIDTH}\"\n");

        let err = Config::load_from(dir.path(), Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "plotly.width"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let settings = CliSettings {
            script_url: Some("/vendor/plotly.js".to_owned()),
            include_script: Some(false),
        };
        let dir = tempfile::tempdir().unwrap();

        let config = Config::load_from(dir.path(), None, Some(&settings)).unwrap();
        assert_eq!(config.plotly.script_url, "/vendor/plotly.js");
        assert!(!config.plotly.include_script);
        assert!(config.plotly.responsive); // Unchanged
    }

    #[test]
    fn test_cli_settings_are_validated() {
        let settings = CliSettings {
            script_url: Some("plotly.js".to_owned()),
            ..CliSettings::default()
        };
        let dir = tempfile::tempdir().unwrap();

        let err = Config::load_from(dir.path(), None, Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
