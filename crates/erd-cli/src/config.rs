//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use erd::{ErdError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for ErdError {
    fn from(err: ConfigError) -> Self {
        ErdError::Config(err.to_string())
    }
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// Given with `--config`
    Explicit,
    /// `erd/config.toml` under the working directory
    Local,
    /// The platform configuration directory
    System,
}

/// Locate the configuration file to use, if any.
///
/// Candidates are tried in this order:
/// 1. Explicit path if provided (returned even when it does not exist)
/// 2. Local project directory (`erd/config.toml`)
/// 3. Platform-specific config directory
///
/// # Arguments
///
/// * `explicit_path` - Path given on the command line
fn find_config(explicit_path: Option<&Path>) -> Option<(ConfigSource, PathBuf)> {
    if let Some(path) = explicit_path {
        return Some((ConfigSource::Explicit, path.to_path_buf()));
    }

    let local = PathBuf::from("erd/config.toml");
    if local.exists() {
        return Some((ConfigSource::Local, local));
    }

    let Some(dirs) = ProjectDirs::from("com", "erd", "erd") else {
        debug!("Could not determine platform-specific config directory");
        return None;
    };
    let system = dirs.config_dir().join("config.toml");
    if system.exists() {
        return Some((ConfigSource::System, system));
    }
    debug!(path = system.display().to_string(); "System configuration file not found");
    None
}

/// Find and load configuration, falling back to defaults when no file is
/// found.
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ErdError> {
    let explicit_path: Option<&Path> = explicit_path.as_ref().map(|path| path.as_ref());
    match find_config(explicit_path) {
        Some((source, path)) => {
            info!(source:?, path = path.display().to_string(); "Loading configuration");
            load_config_file(&path)
        }
        None => {
            debug!("No configuration file found, using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Parse the TOML file at `path`.
///
/// # Errors
///
/// Returns [`ConfigError::MissingFile`] if nothing exists at `path`, and
/// [`ConfigError::Parse`] if the contents are not a valid configuration.
fn load_config_file(path: &Path) -> Result<AppConfig, ErdError> {
    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use erd::config::QuoteValues;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[parser]\nstrict = false\n\n[format]\nquote_values = \"always\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(!config.parser().strict());
        assert_eq!(config.parser().span_capacity(), 64);
        assert_eq!(config.format().indent(), 2);
        assert_eq!(config.format().quote_values(), QuoteValues::Always);
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");

        let found = find_config(Some(path.as_path()));
        assert_eq!(found, Some((ConfigSource::Explicit, path)));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let err = load_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ErdError::Config(ref msg) if msg.starts_with("Missing configuration file")));
    }

    #[test]
    fn test_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[format]\nquote_values = \"sometimes\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ErdError::Config(ref msg) if msg.starts_with("Failed to parse TOML")));
    }
}
