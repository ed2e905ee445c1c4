//! Device name/UUID resolution
//!
//! Turns a user-supplied string into exactly one device. Lookups run in this
//! order, each only if the previous ones did not settle the answer:
//!
//! 1. full UUID point lookup (32 hex chars, unless `--name`)
//! 2. device name prefix search (unless `--uuid`)
//! 3. UUID prefix search (shorter hex strings, unless `--name`)
//!
//! Without a type hint, single hits from steps 2 and 3 are only candidates;
//! the final answer must be unique across both. Any hint other than
//! `Unspecified` accepts a single UUID prefix hit.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::application::{format_candidates, ApplicationError, ApplicationResult};
use crate::domain::{DeviceId, DeviceRecord, Query, TypeHint};
use crate::infrastructure::traits::{DeviceDirectory, SearchField};

/// Outcome of a single lookup step.
#[derive(Debug)]
enum Attempt {
    /// Definitive match, stop searching.
    Accepted(DeviceRecord),
    /// Possible matches, decided during reconciliation.
    Candidates(Vec<DeviceRecord>),
}

/// Service for resolving device queries against the directory.
pub struct DeviceResolver {
    directory: Arc<dyn DeviceDirectory>,
}

impl DeviceResolver {
    pub fn new(directory: Arc<dyn DeviceDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve `query` to a single device.
    ///
    /// With `exact_match_fallback`, several name matches are narrowed to the one
    /// whose name equals the query exactly, if there is exactly one.
    #[instrument(skip(self, query), fields(query = %query.raw))]
    pub fn resolve(
        &self,
        query: &Query,
        exact_match_fallback: bool,
    ) -> ApplicationResult<DeviceRecord> {
        if query.is_full_uuid() && !query.forces_name() {
            if let Some(record) = self.lookup_full_uuid(query)? {
                return Ok(record);
            }
        }

        let mut candidates = Vec::new();

        if !query.forces_uuid() {
            match self.search_names(query, exact_match_fallback)? {
                Attempt::Accepted(record) => return Ok(record),
                Attempt::Candidates(found) => candidates.extend(found),
            }
        }

        if !query.forces_name() && query.is_partial_uuid() {
            match self.search_uuid_prefix(query)? {
                Attempt::Accepted(record) => return Ok(record),
                Attempt::Candidates(found) => candidates.extend(found),
            }
        }

        reconcile(query, candidates)
    }

    fn lookup_full_uuid(&self, query: &Query) -> ApplicationResult<Option<DeviceRecord>> {
        debug!("Trying absolute UUID query for '{}'.", query.raw);
        let id = DeviceId::parse_canonical(&query.raw)?;
        let record = self
            .directory
            .device_name(&id)?
            .map(|name| DeviceRecord::new(id, name));
        match &record {
            Some(record) => debug!("Found device {} by absolute UUID.", record),
            None => debug!("No device with UUID '{}'.", query.raw),
        }
        Ok(record)
    }

    fn search_names(
        &self,
        query: &Query,
        exact_match_fallback: bool,
    ) -> ApplicationResult<Attempt> {
        debug!("Trying device name query for '{}'.", query.raw);
        let mut found = self.directory.search_prefix(SearchField::Name, &query.raw)?;

        match found.len() {
            0 => Ok(Attempt::Candidates(found)),
            1 if query.forces_name() => {
                let record = found.remove(0);
                debug!("Found device {} by name.", record);
                Ok(Attempt::Accepted(record))
            }
            1 => {
                debug!("Found candidate device {} by name.", found[0]);
                Ok(Attempt::Candidates(found))
            }
            _ => {
                warn!(
                    "Found multiple devices matching partial name string:\n    {}",
                    format_candidates(&found)
                );
                if exact_match_fallback {
                    let mut exact = found.iter().filter(|record| record.name == query.raw);
                    if let (Some(record), None) = (exact.next(), exact.next()) {
                        warn!("Using exact match: {}.", record);
                        return Ok(Attempt::Accepted(record.clone()));
                    }
                }
                Ok(Attempt::Candidates(found))
            }
        }
    }

    fn search_uuid_prefix(&self, query: &Query) -> ApplicationResult<Attempt> {
        debug!("Trying partial UUID query for '{}'.", query.raw);
        let mut found = self.directory.search_prefix(SearchField::Uuid, &query.raw)?;

        match found.len() {
            0 => Ok(Attempt::Candidates(found)),
            1 if query.hint != TypeHint::Unspecified => {
                let record = found.remove(0);
                debug!("Found device {} by partial UUID match.", record);
                Ok(Attempt::Accepted(record))
            }
            1 => {
                debug!("Found candidate device {} by partial UUID match.", found[0]);
                Ok(Attempt::Candidates(found))
            }
            _ => {
                warn!(
                    "Found multiple devices matching partial UUID string:\n    {}",
                    format_candidates(&found)
                );
                Ok(Attempt::Candidates(found))
            }
        }
    }
}

/// Pick the single remaining candidate, or fail.
///
/// Name and UUID prefix hits are counted together, so a device matching
/// both ways is ambiguous.
fn reconcile(
    query: &Query,
    mut candidates: Vec<DeviceRecord>,
) -> ApplicationResult<DeviceRecord> {
    match candidates.len() {
        0 => Err(ApplicationError::DeviceNotFound(query.raw.clone())),
        1 => {
            let record = candidates.remove(0);
            debug!("Returning {}.", record);
            Ok(record)
        }
        _ => Err(ApplicationError::AmbiguousQuery {
            query: query.raw.clone(),
            candidates,
        }),
    }
}
