//! Locating and reading the CLI's TOML configuration.
//!
//! The first file found wins: the `--config` path, `archimate/config.toml`
//! under the working directory, then `config.toml` in the platform
//! configuration directory. Without any of them the defaults apply.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use archimate::{ArchimateError, config::AppConfig};

const LOCAL_CONFIG: &str = "archimate/config.toml";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration-related errors for CLI
///
/// Every variant names the file it concerns so the report can point at it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Failed to read configuration file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ConfigError {
    /// The configuration file the error is about.
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Parse { path, .. }
            | ConfigError::MissingFile(path)
            | ConfigError::Read { path, .. } => path,
        }
    }
}

/// The error travels inside [`ArchimateError::Io`] so the report can recover
/// it with a downcast.
impl From<ConfigError> for ArchimateError {
    fn from(err: ConfigError) -> Self {
        ArchimateError::Io(io::Error::other(err))
    }
}

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Passed with `--config`; it has to exist.
    Explicit(PathBuf),
    Local(PathBuf),
    System(PathBuf),
    Default,
}

impl ConfigSource {
    /// Picks the configuration source without reading it.
    pub fn resolve(explicit_path: Option<&Path>) -> Self {
        if let Some(path) = explicit_path {
            return ConfigSource::Explicit(path.to_path_buf());
        }

        let local = Path::new(LOCAL_CONFIG);
        if local.is_file() {
            return ConfigSource::Local(local.to_path_buf());
        }

        match ProjectDirs::from("com", "archimate", "archimate") {
            Some(dirs) => {
                let system = dirs.config_dir().join(CONFIG_FILE_NAME);
                if system.is_file() {
                    return ConfigSource::System(system);
                }
                debug!(path:% = system.display(); "System configuration file not found");
            }
            None => debug!("Could not determine platform-specific config directory"),
        }

        ConfigSource::Default
    }

    /// The file to read, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigSource::Explicit(path) | ConfigSource::Local(path) | ConfigSource::System(path) => {
                Some(path)
            }
            ConfigSource::Default => None,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ConfigSource::Explicit(_) => "explicit",
            ConfigSource::Local(_) => "local",
            ConfigSource::System(_) => "system",
            ConfigSource::Default => "default",
        }
    }

    /// Reads the configuration from this source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable or not a
    /// valid configuration.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        let Some(path) = self.path() else {
            debug!("No configuration file found, using default configuration");
            return Ok(AppConfig::default());
        };
        info!(path:% = path.display(), source = self.label(); "Loading configuration");

        let content = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => ConfigError::MissingFile(path.to_path_buf()),
            _ => ConfigError::Read {
                path: path.to_path_buf(),
                source: err,
            },
        })?;

        toml::from_str(&content).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

/// Resolves and loads the configuration for a CLI run.
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, ArchimateError> {
    let source = ConfigSource::resolve(explicit_path.as_ref().map(|path| path.as_ref()));
    Ok(source.load()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archimate::layout::LayoutAlgorithm;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_path_wins() {
        let path = Path::new("elsewhere/custom.toml");
        let source = ConfigSource::resolve(Some(path));

        assert_eq!(source, ConfigSource::Explicit(path.to_path_buf()));
        assert_eq!(source.path(), Some(path));
    }

    #[test]
    fn test_explicit_config_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\nalgorithm = \"circular\"\n").expect("Failed to write");

        let config = load_config(Some(&path)).expect("Failed to load config");
        assert_eq!(config.layout().algorithm(), LayoutAlgorithm::Circular);
        assert!(config.layout().include_relationships());
    }

    #[test]
    fn test_default_source_uses_defaults() {
        let config = ConfigSource::Default.load().expect("Failed to load defaults");
        assert_eq!(config.layout().algorithm(), LayoutAlgorithm::Grid);
    }

    #[test]
    fn test_config_errors_name_the_file() {
        let dir = tempdir().expect("Failed to create temp directory");

        let missing = dir.path().join("absent.toml");
        let err = ConfigSource::Explicit(missing.clone())
            .load()
            .expect_err("missing file");
        assert!(matches!(&err, ConfigError::MissingFile(path) if *path == missing));

        let invalid = dir.path().join("invalid.toml");
        fs::write(&invalid, "[layout]\nalgorithm = \"spiral\"\n").expect("Failed to write");
        let err = ConfigSource::Explicit(invalid.clone())
            .load()
            .expect_err("invalid layout");
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), invalid.as_path());
        assert!(err.to_string().contains("Failed to parse TOML configuration"));
    }

    #[test]
    fn test_config_error_converts_to_io() {
        let dir = tempdir().expect("Failed to create temp directory");
        let missing = dir.path().join("absent.toml");

        let err = load_config(Some(&missing)).expect_err("missing file");
        let ArchimateError::Io(io_err) = &err else {
            panic!("Expected an I/O error");
        };
        let inner = io_err
            .get_ref()
            .and_then(|inner| inner.downcast_ref::<ConfigError>());
        assert!(matches!(inner, Some(ConfigError::MissingFile(_))));
    }
}
