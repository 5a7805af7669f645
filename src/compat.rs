//! Which API endpoints the frontend may call, given the configuration and
//! what the upstream systems support.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ConsoleConfig;
use crate::hooks::License;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointCompatibilityEndpoint {
    #[schema(example = "/api/kafka-connect")]
    pub endpoint: String,
    #[schema(example = "GET")]
    pub method: String,
    pub is_supported: bool,
}

impl EndpointCompatibilityEndpoint {
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>, is_supported: bool) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            is_supported,
        }
    }

    fn same_endpoint(&self, other: &Self) -> bool {
        self.endpoint == other.endpoint && self.method.eq_ignore_ascii_case(&other.method)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointCompatibility {
    pub kafka_version: String,
    pub endpoints: Vec<EndpointCompatibilityEndpoint>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndpointCompatibilityResponse {
    pub endpoint_compatibility: EndpointCompatibility,
    pub licenses: Vec<License>,
}

/// Endpoint support as computed from configuration alone.
pub fn baseline(config: &ConsoleConfig) -> Vec<EndpointCompatibilityEndpoint> {
    let connect = config.connect.is_enabled();
    vec![
        EndpointCompatibilityEndpoint::new("/api/topics", "GET", true),
        EndpointCompatibilityEndpoint::new("/api/consumer-groups", "GET", true),
        EndpointCompatibilityEndpoint::new("/api/acls", "GET", true),
        EndpointCompatibilityEndpoint::new("/api/quotas", "GET", true),
        EndpointCompatibilityEndpoint::new("/api/users", "GET", true),
        EndpointCompatibilityEndpoint::new("/api/users", "POST", true),
        EndpointCompatibilityEndpoint::new("/api/users", "DELETE", true),
        EndpointCompatibilityEndpoint::new("/api/operations/configs", "PATCH", true),
        EndpointCompatibilityEndpoint::new("/api/kafka-connect/clusters", "GET", connect),
    ]
}

/// Merges hook overrides into the baseline: entries naming an existing
/// endpoint replace it in place, new ones are appended, the rest are kept.
pub fn merge(
    mut baseline: Vec<EndpointCompatibilityEndpoint>,
    overrides: Option<Vec<EndpointCompatibilityEndpoint>>,
) -> Vec<EndpointCompatibilityEndpoint> {
    for entry in overrides.unwrap_or_default() {
        match baseline.iter_mut().find(|existing| existing.same_endpoint(&entry)) {
            Some(existing) => *existing = entry,
            None => baseline.push(entry),
        }
    }
    baseline
}
