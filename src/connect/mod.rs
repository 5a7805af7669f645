//! Kafka Connect integration: configured clusters and their metadata.

mod client;

pub use client::{ConnectClient, ConnectClientError, ConnectorPluginInfo, RootInfo};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{ConnectClusterConfig, ConnectConfig};
use crate::errors::{AppError, RestError};

/// Optional capabilities of a single connect cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClusterFeature {
    SecretStore,
}

/// Information about the Kafka Connect cluster we are talking to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ClusterInfo {
    #[serde(rename = "clusterName")]
    pub name: String,
    pub host: String,
    #[serde(rename = "clusterVersion")]
    pub version: String,
    pub plugins: Vec<ConnectorPluginInfo>,
    /// Filled in by the HTTP layer from the console hooks.
    #[serde(rename = "enabledFeatures", default, skip_serializing_if = "Vec::is_empty")]
    pub enabled_features: Vec<ClusterFeature>,
}

#[derive(Debug, Clone)]
pub struct ConnectCluster {
    pub cfg: ConnectClusterConfig,
    pub client: ConnectClient,
}

#[derive(Debug, Clone, Default)]
pub struct ConnectService {
    clusters: Vec<ConnectCluster>,
}

impl ConnectService {
    pub fn new(config: &ConnectConfig) -> Result<Self, AppError> {
        let clusters = config
            .clusters
            .iter()
            .map(|cfg| {
                let client = ConnectClient::new(&cfg.url, config.request_timeout)
                    .map_err(|err| AppError::configuration(format!("connect cluster `{}`: {err}", cfg.name)))?;
                Ok(ConnectCluster {
                    cfg: cfg.clone(),
                    client,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self { clusters })
    }

    pub fn is_enabled(&self) -> bool {
        !self.clusters.is_empty()
    }

    pub fn clusters(&self) -> &[ConnectCluster] {
        &self.clusters
    }

    pub fn cluster_by_name(&self, cluster_name: &str) -> Result<&ConnectCluster, RestError> {
        self.clusters
            .iter()
            .find(|c| c.cfg.name == cluster_name)
            .ok_or_else(|| {
                RestError::not_found(format!("Could not find a connect cluster with name '{cluster_name}'"))
                    .with_field("cluster_name", cluster_name)
                    .silent()
            })
    }

    /// Fetches version and plugins of a connect cluster.
    ///
    /// Either upstream call failing fails the whole lookup with a 503; partial
    /// results are never returned. `enabled_features` is always empty here.
    pub async fn get_cluster_info(&self, cluster_name: &str) -> Result<ClusterInfo, RestError> {
        let cluster = self.cluster_by_name(cluster_name)?;

        let root = cluster.client.get_root().await.map_err(|err| {
            RestError::service_unavailable(format!("Failed to get cluster info: {err}"))
                .with_field("cluster_name", cluster_name)
                .with_source(err)
        })?;

        let plugins = cluster.client.get_connector_plugins().await.map_err(|err| {
            RestError::service_unavailable(format!("Failed to get cluster plugins: {err}"))
                .with_field("cluster_name", cluster_name)
                .with_source(err)
        })?;

        Ok(ClusterInfo {
            name: cluster.cfg.name.clone(),
            host: cluster.cfg.url.clone(),
            version: root.version,
            plugins,
            enabled_features: Vec::new(),
        })
    }
}
