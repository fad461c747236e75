//! Defaults file for the dedupe binary.
//!
//! Settings are layered with figment, later layers winning:
//!
//! 1. Built-in defaults ([`Config::default`])
//! 2. TOML file: `--config PATH`, else `<platform config dir>/dedupe/config.toml`
//! 3. Environment variables prefixed `DEDUPE_` (e.g. `DEDUPE_IO_THREADS=8`)
//! 4. Explicit command-line flags (applied by the caller)
//!
//! ```toml
//! by = "name"
//! recursive = true
//! output = "json"
//! io_threads = 8
//! trash = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::duplicates::finder::DEFAULT_IO_THREADS;
use crate::scanner::KeyStrategy;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "DEDUPE_";

/// Errors raised while loading or saving the defaults file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// The layered configuration could not be extracted.
    #[error("Invalid configuration: {0}")]
    Invalid(#[from] figment::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The platform config directory could not be determined.
    #[error("Failed to determine config directory")]
    NoConfigDir,

    /// Reading or writing the file failed.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// User defaults for dedupe runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default key strategy.
    pub by: KeyStrategy,
    /// Recurse into subdirectories by default.
    pub recursive: bool,
    /// Default output format.
    pub output: OutputFormat,
    /// Number of hashing threads.
    pub io_threads: usize,
    /// Move removed files to the trash instead of unlinking them.
    pub trash: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            by: KeyStrategy::Hash,
            recursive: false,
            output: OutputFormat::Plain,
            io_threads: DEFAULT_IO_THREADS,
            trash: false,
        }
    }
}

impl Config {
    /// Load the layered configuration.
    ///
    /// With `path` the file must exist; without it the platform default
    /// location is used when present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if an explicit file is missing or any layer
    /// holds invalid values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => {
                if !p.is_file() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                Some(p.to_path_buf())
            }
            None => Self::default_path().ok().filter(|p| p.is_file()),
        };

        if let Some(ref file) = file {
            log::debug!("Loading config from {}", file.display());
        }

        let config: Self = Self::figment(file.as_deref()).extract()?;
        Ok(config)
    }

    /// Build the figment for the given file (defaults < file < env).
    #[must_use]
    pub fn figment(file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = file {
            figment = figment.merge(Toml::file(file));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    /// Write the configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if serialization or writing fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Default platform-specific configuration path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConfigDir`] when no home directory is known.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let project_dirs =
            ProjectDirs::from("com", "dedupe", "dedupe").ok_or(ConfigError::NoConfigDir)?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
