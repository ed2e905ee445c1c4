//! Device identity: canonical UUIDs and directory records

use std::fmt;

use serde::Deserialize;

use crate::domain::DomainError;

/// Length of a canonical balena device UUID (128 bits, hex encoded).
pub const CANONICAL_ID_LEN: usize = 32;

/// True if `s` is non-empty and consists only of ASCII hex digits.
pub fn is_hex_like(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Device UUID as reported by the directory.
///
/// Always hex; usually [`CANONICAL_ID_LEN`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceId(String);

impl DeviceId {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if !is_hex_like(raw) {
            return Err(DomainError::InvalidDeviceId(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Parse only full-length identifiers.
    pub fn parse_canonical(raw: &str) -> Result<Self, DomainError> {
        if raw.len() != CANONICAL_ID_LEN {
            return Err(DomainError::InvalidDeviceId(raw.to_string()));
        }
        Self::parse(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0.starts_with(prefix)
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One device as known to the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRecord {
    pub id: DeviceId,
    pub name: String,
}

impl DeviceRecord {
    pub fn new(id: DeviceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Device row as returned by the API (`$select=uuid,device_name`).
///
/// Only ever converted into a [`DeviceRecord`]; the rest of the crate never
/// sees API field names.
#[derive(Debug, Clone, Deserialize)]
pub struct RawDevice {
    pub uuid: String,
    #[serde(default)]
    pub device_name: Option<String>,
}

impl TryFrom<RawDevice> for DeviceRecord {
    type Error = DomainError;

    fn try_from(raw: RawDevice) -> Result<Self, Self::Error> {
        let id = DeviceId::parse(&raw.uuid)?;
        Ok(DeviceRecord::new(id, raw.device_name.unwrap_or_default()))
    }
}
