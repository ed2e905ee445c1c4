//! Infrastructure-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Infrastructure errors wrap application errors and add I/O-level concerns.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl InfraError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}

/// Failures talking to the device directory.
///
/// "Device not found" is not an error here; lookups return `Option`/empty lists.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("{operation} rejected: not authorized (check your balena auth token)")]
    Unauthorized { operation: String },

    #[error("{operation} failed with HTTP status {status}")]
    Status { operation: String, status: u16 },

    #[error("{operation} failed: {message}")]
    Transport { operation: String, message: String },

    #[error("{operation} returned a malformed response: {message}")]
    Payload { operation: String, message: String },

    #[error("directory returned an invalid device: {0}")]
    InvalidRecord(#[from] DomainError),
}

impl DirectoryError {
    pub fn from_status(operation: &str, status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized {
                operation: operation.to_string(),
            },
            _ => Self::Status {
                operation: operation.to_string(),
                status,
            },
        }
    }
}

pub type DirectoryResult<T> = Result<T, DirectoryError>;
