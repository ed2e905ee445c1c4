//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input, independent of I/O.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid device UUID: '{0}'")]
    InvalidDeviceId(String),

    #[error("device name/UUID not specified for '{0}' command")]
    MissingIdentifierArgument(String),
}
