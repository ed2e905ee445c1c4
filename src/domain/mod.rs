//! Domain layer: device identity, queries and command-line classification
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arguments;
pub mod credential;
pub mod device;
pub mod error;
pub mod query;

pub use arguments::locate_identifier_slot;
pub use credential::Credential;
pub use device::{is_hex_like, DeviceId, DeviceRecord, RawDevice, CANONICAL_ID_LEN};
pub use error::DomainError;
pub use query::{Query, TypeHint};

/// Expand `~`, `$VAR` and `${VAR}` in a path-like string.
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
