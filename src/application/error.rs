//! Application-level errors (wraps domain and directory errors)

use std::path::PathBuf;

use itertools::Itertools;
use thiserror::Error;

use crate::domain::{DeviceRecord, DomainError};
use crate::infrastructure::DirectoryError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Directory(#[from] DirectoryError),

    #[error(
        "unable to determine balena auth token: could not find token file ({}) or config file ({})",
        .token_file.display(),
        .config_file.display()
    )]
    CredentialSourceMissing {
        token_file: PathBuf,
        config_file: PathBuf,
    },

    #[error("auth token file empty: {0}")]
    EmptyTokenFile(PathBuf),

    #[error("auth token not found in config file: {0}")]
    TokenNotFoundInConfig(PathBuf),

    #[error("no device found matching '{0}'")]
    DeviceNotFound(String),

    #[error(
        "found multiple devices matching '{query}':\n    {}\nUse a longer name or UUID prefix, or --exact for an exact name.",
        format_candidates(.candidates)
    )]
    AmbiguousQuery {
        query: String,
        candidates: Vec<DeviceRecord>,
    },

    #[error("unable to find '{0}' CLI on the system path")]
    CliNotFound(String),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// One `name (uuid)` per line, for warnings and errors.
pub fn format_candidates(candidates: &[DeviceRecord]) -> String {
    candidates.iter().map(ToString::to_string).join("\n    ")
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
