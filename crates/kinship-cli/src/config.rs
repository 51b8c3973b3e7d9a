//! Configuration file parsing for the CLI.
//!
//! Loads the database location, lifecycle options, log filter and output
//! defaults from a TOML file.

use kinship_service::LifecycleConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// No home directory to resolve default paths against
    #[error("Could not find home directory")]
    NoHome,
}

/// CLI configuration loaded from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KinshipConfig {
    /// SQLite database file (default: `~/.kinship/kinship.db`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Relationship lifecycle options
    #[serde(default)]
    pub lifecycle: LifecycleConfig,

    /// Logging options
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Output defaults
    #[serde(default)]
    pub output: OutputConfig,
}

/// Logging options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_filter")]
    pub filter: String,
}

/// Output defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (ids only) format
    Quiet,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            color: true,
        }
    }
}

fn default_filter() -> String {
    "warn".to_string()
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_true() -> bool {
    true
}

impl KinshipConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: KinshipConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load from `explicit` if given, else from the default location if a
    /// file exists there, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, Self::default_path())
    }

    fn load_with(
        explicit: Option<&Path>,
        default_path: Result<PathBuf, ConfigError>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_path {
            Ok(path) if path.exists() => Self::from_file(path),
            Ok(_) => Ok(Self::default()),
            Err(e) => {
                tracing::debug!(error = %e, "no default config location, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `~/.kinship`
    pub fn home() -> Result<PathBuf, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHome)?;
        Ok(home.join(".kinship"))
    }

    /// `~/.kinship/config.toml`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Database file to open
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::home()?.join("kinship.db")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinship_service::FriendListScope;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = KinshipConfig::default();
        assert!(config.database_path.is_none());
        assert_eq!(config.lifecycle.friend_list_scope, FriendListScope::Both);
        assert_eq!(config.logging.filter, "warn");
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.output.color);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            database_path = "/var/lib/kinship/kinship.db"

            [lifecycle]
            friend_list_scope = "initiated"

            [logging]
            filter = "kinship_service=debug"

            [output]
            format = "json"
            color = false
        "#;

        let config: KinshipConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.database_path.as_deref(),
            Some(Path::new("/var/lib/kinship/kinship.db"))
        );
        assert_eq!(config.lifecycle.friend_list_scope, FriendListScope::Initiated);
        assert_eq!(config.logging.filter, "kinship_service=debug");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: KinshipConfig = toml::from_str("[output]\nformat = \"quiet\"\n").unwrap();
        assert_eq!(config.output.format, OutputFormat::Quiet);
        assert!(config.output.color);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_path = \"here.db\"").unwrap();

        let config = KinshipConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.database_path().unwrap(), PathBuf::from("here.db"));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"yaml\"").unwrap();

        let result = KinshipConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_no_home_falls_back_to_defaults() {
        let config = KinshipConfig::load_with(None, Err(ConfigError::NoHome)).unwrap();
        assert!(config.database_path.is_none());
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_absent_default_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            KinshipConfig::load_with(None, Ok(dir.path().join("config.toml"))).unwrap();
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = KinshipConfig::load(Some(Path::new("/nonexistent/kinship.toml")));
        assert!(matches!(result, Err(ConfigError::FileRead(_))));
    }
}
