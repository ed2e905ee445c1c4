//! Device queries: the raw string plus how the caller wants it interpreted

use crate::domain::device::{is_hex_like, CANONICAL_ID_LEN};

/// How a query string should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeHint {
    /// Try UUID and name matching; only unique results are accepted.
    #[default]
    Unspecified,
    /// Only match device names.
    Name,
    /// Only match UUIDs (full or partial).
    Uuid,
    /// Do not query; forward the string as given.
    ///
    /// The wrapper never resolves these. Handed to the resolver anyway, it
    /// searches names and UUIDs like `Unspecified` but accepts a single UUID
    /// prefix hit outright.
    Verbatim,
}

impl TypeHint {
    pub fn from_flags(name: bool, uuid: bool, raw: bool) -> Self {
        if raw {
            TypeHint::Verbatim
        } else if name {
            TypeHint::Name
        } else if uuid {
            TypeHint::Uuid
        } else {
            TypeHint::Unspecified
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub raw: String,
    pub hint: TypeHint,
}

impl Query {
    pub fn new(raw: impl Into<String>, hint: TypeHint) -> Self {
        Self {
            raw: raw.into(),
            hint,
        }
    }

    pub fn is_hex_like(&self) -> bool {
        is_hex_like(&self.raw)
    }

    /// Hex string of canonical UUID length.
    pub fn is_full_uuid(&self) -> bool {
        self.is_hex_like() && self.raw.len() == CANONICAL_ID_LEN
    }

    /// Hex string shorter than a canonical UUID.
    pub fn is_partial_uuid(&self) -> bool {
        self.is_hex_like() && self.raw.len() < CANONICAL_ID_LEN
    }

    pub fn forces_name(&self) -> bool {
        self.hint == TypeHint::Name
    }

    pub fn forces_uuid(&self) -> bool {
        self.hint == TypeHint::Uuid
    }
}
