use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::compat::EndpointCompatibilityEndpoint;
use crate::connect::ClusterFeature;

use super::HookContext;

/// Expiry used for licenses that never run out.
pub const UNRESTRICTED_EXPIRY: i64 = i32::MAX as i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LicenseSource {
    Console,
    Cluster,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LicenseType {
    OpenSource,
    FreeTrial,
    Enterprise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub source: LicenseSource,
    #[serde(rename = "type")]
    pub license_type: LicenseType,
    /// Unix timestamp in seconds.
    pub expires_at: i64,
}

impl License {
    pub fn open_source() -> Self {
        Self {
            source: LicenseSource::Console,
            license_type: LicenseType::OpenSource,
            expires_at: UNRESTRICTED_EXPIRY,
        }
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.expires_at >= UNRESTRICTED_EXPIRY
    }
}

/// Hooks that describe the deployment to the frontend: license, feature
/// toggles and which endpoints it may call.
#[async_trait]
pub trait ConsoleHooks: Send + Sync {
    /// License the frontend renders warnings and gated UI from.
    async fn console_license_information(&self, ctx: &HookContext) -> License;

    /// Toggleable features baked into the frontend bootstrap page at startup,
    /// so it can decide what to render before its first API call.
    fn enabled_features(&self) -> Vec<String>;

    /// Features supported by one Kafka Connect cluster. Unknown clusters yield
    /// an empty list.
    async fn enabled_connect_cluster_features(&self, ctx: &HookContext, cluster_name: &str) -> Vec<ClusterFeature>;

    /// Overrides merged into the endpoint compatibility computed by the
    /// console. `None` keeps the computed list as is.
    fn endpoint_compatibility(&self) -> Option<Vec<EndpointCompatibilityEndpoint>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn open_source_license_wire_shape() {
        let license = License::open_source();
        assert_eq!(
            serde_json::to_value(&license).unwrap(),
            json!({"source": "console", "type": "open_source", "expiresAt": 2147483647})
        );
    }

    #[test]
    fn expiry_semantics() {
        let license = License::open_source();
        assert!(license.is_unrestricted());
        assert!(!license.is_expired(Utc::now()));

        let trial = License {
            source: LicenseSource::Cluster,
            license_type: LicenseType::FreeTrial,
            expires_at: 1_700_000_000,
        };
        assert!(!trial.is_unrestricted());
        assert!(trial.is_expired(Utc.timestamp_opt(1_700_000_000, 0).unwrap()));
        assert!(!trial.is_expired(Utc.timestamp_opt(1_699_999_999, 0).unwrap()));
        assert_eq!(trial.expires_at_utc().map(|t| t.timestamp()), Some(1_700_000_000));
    }
}
