// Runner Configuration
// Compiler, source suffix and default jobs directory, loaded from YAML

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up under the user's config directory
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for discovering, compiling and running jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Directory used when none is given or the given one is invalid
    pub jobs_dir: PathBuf,

    /// Compiler program, resolved through PATH when not a path
    pub compiler: String,

    /// Extra arguments placed before the source path
    pub compiler_args: Vec<String>,

    /// Suffix that marks a file as a job source
    pub source_suffix: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            jobs_dir: PathBuf::from("jobs"),
            compiler: "gcc".to_string(),
            compiler_args: Vec::new(),
            source_suffix: ".c".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: RunnerConfig =
            serde_yaml::from_str(content).map_err(|source| ConfigError::Parse {
                path: origin.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an explicit file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content, path)
    }

    /// Load from `explicit` if given, otherwise from the user config
    /// directory when that file exists, otherwise fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading user configuration");
                Self::from_file(path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/cbatch/config.yaml`, when the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cbatch").join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.compiler.trim().is_empty() {
            return Err(ConfigError::Invalid("compiler must not be empty".into()));
        }
        if self.source_suffix.len() < 2 || !self.source_suffix.starts_with('.') {
            return Err(ConfigError::Invalid(format!(
                "source_suffix must look like '.c', got '{}'",
                self.source_suffix
            )));
        }
        Ok(())
    }

    pub fn with_jobs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.jobs_dir = dir.into();
        self
    }

    pub fn with_compiler(mut self, compiler: impl Into<String>) -> Self {
        self.compiler = compiler.into();
        self
    }

    pub fn with_compiler_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compiler_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Locate the compiler on PATH (or as a direct path)
    pub fn locate_compiler(&self) -> Option<PathBuf> {
        which::which(&self.compiler).ok()
    }
}
