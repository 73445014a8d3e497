// Service Errors
// Failures surfaced by the validation, lookup and configuration helpers.
// The core build/run operations never return these; they report outcomes.

use crate::config::ConfigError;

use std::path::PathBuf;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Jobs directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Job '{name}' not found in {}", .directory.display())]
    JobNotFound { name: String, directory: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
