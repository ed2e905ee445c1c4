//! balena API device directory over HTTP
//!
//! The API speaks OData ("pine"): device rows live at
//! `<api_url>/<version>/device` and filtering happens through `$filter`.
//! Two directories share one [`PineClient`]; they differ only in where
//! prefix matching happens.

use serde::Deserialize;
use tracing::{debug, trace};

use crate::domain::{Credential, DeviceId, DeviceRecord, RawDevice};
use crate::infrastructure::error::{DirectoryError, DirectoryResult};
use crate::infrastructure::traits::{DeviceDirectory, SearchField};

const SELECT_FIELDS: &str = "uuid,device_name";

#[derive(Debug, Deserialize)]
struct PineResponse {
    d: Vec<RawDevice>,
}

/// Quote a string for use inside an OData `$filter` expression.
pub fn odata_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `$filter` expression for a prefix match on `field`.
pub fn startswith_filter(field: SearchField, prefix: &str) -> String {
    format!("startswith({},{})", field.api_field(), odata_literal(prefix))
}

/// `$filter` expression for an exact UUID match.
pub fn uuid_eq_filter(id: &DeviceId) -> String {
    format!("uuid eq {}", odata_literal(id.as_str()))
}

/// Keep only the records whose `field` starts with `prefix`.
pub fn filter_by_prefix(
    records: Vec<DeviceRecord>,
    field: SearchField,
    prefix: &str,
) -> Vec<DeviceRecord> {
    records
        .into_iter()
        .filter(|record| field.matches(record, prefix))
        .collect()
}

/// Authenticated session against the balena API.
pub struct PineClient {
    agent: ureq::Agent,
    endpoint: String,
    credential: Credential,
}

impl PineClient {
    pub fn new(api_url: &str, api_version: &str, credential: Credential) -> Self {
        let endpoint = format!("{}/{}/device", api_url.trim_end_matches('/'), api_version);
        debug!("PineClient: endpoint={}", endpoint);
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoint,
            credential,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch device rows, optionally filtered server-side.
    pub fn devices(
        &self,
        filter: Option<&str>,
        operation: &str,
    ) -> DirectoryResult<Vec<DeviceRecord>> {
        trace!("{}: GET {} filter={:?}", operation, self.endpoint, filter);

        let mut request = self
            .agent
            .get(&self.endpoint)
            .set(
                "Authorization",
                &format!("Bearer {}", self.credential.expose()),
            )
            .query("$select", SELECT_FIELDS);
        if let Some(filter) = filter {
            request = request.query("$filter", filter);
        }

        let response = request
            .call()
            .map_err(|e| ureq_error_to_directory_error(e, operation))?;
        let body: PineResponse = response.into_json().map_err(|e| DirectoryError::Payload {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;

        debug!("{}: {} device(s) returned", operation, body.d.len());
        body.d
            .into_iter()
            .map(|raw| DeviceRecord::try_from(raw).map_err(DirectoryError::from))
            .collect()
    }

    /// Point lookup by full UUID.
    pub fn device_name(&self, id: &DeviceId) -> DirectoryResult<Option<String>> {
        let filter = uuid_eq_filter(id);
        let devices = self.devices(Some(&filter), "device lookup")?;
        Ok(devices
            .into_iter()
            .find(|record| &record.id == id)
            .map(|record| record.name))
    }
}

fn ureq_error_to_directory_error(error: ureq::Error, operation: &str) -> DirectoryError {
    match error {
        ureq::Error::Status(status, _) => DirectoryError::from_status(operation, status),
        ureq::Error::Transport(transport) => {
            let message = match transport.kind() {
                ureq::ErrorKind::Dns => "DNS resolution failed".to_string(),
                ureq::ErrorKind::ConnectionFailed => "connection failed".to_string(),
                _ => transport.to_string(),
            };
            DirectoryError::Transport {
                operation: operation.to_string(),
                message,
            }
        }
    }
}

/// Prefix matching done by the API (`startswith` filter).
pub struct ServerFilteredDirectory {
    client: PineClient,
}

impl ServerFilteredDirectory {
    pub fn new(client: PineClient) -> Self {
        Self { client }
    }
}

impl DeviceDirectory for ServerFilteredDirectory {
    fn device_name(&self, id: &DeviceId) -> DirectoryResult<Option<String>> {
        self.client.device_name(id)
    }

    fn search_prefix(
        &self,
        field: SearchField,
        prefix: &str,
    ) -> DirectoryResult<Vec<DeviceRecord>> {
        let filter = startswith_filter(field, prefix);
        self.client.devices(Some(&filter), "device search")
    }
}

/// Prefix matching done locally over the full device listing.
///
/// For API deployments without `startswith` support.
pub struct ClientFilteredDirectory {
    client: PineClient,
}

impl ClientFilteredDirectory {
    pub fn new(client: PineClient) -> Self {
        Self { client }
    }
}

impl DeviceDirectory for ClientFilteredDirectory {
    fn device_name(&self, id: &DeviceId) -> DirectoryResult<Option<String>> {
        self.client.device_name(id)
    }

    fn search_prefix(
        &self,
        field: SearchField,
        prefix: &str,
    ) -> DirectoryResult<Vec<DeviceRecord>> {
        let all = self.client.devices(None, "device listing")?;
        Ok(filter_by_prefix(all, field, prefix))
    }
}
