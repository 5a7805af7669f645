use std::time::Duration;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, thiserror::Error)]
pub enum ConnectClientError {
    #[error("invalid connect url `{0}`")]
    InvalidUrl(String),
    #[error("request to kafka connect failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("kafka connect responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// `GET /` of the Kafka Connect REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootInfo {
    pub version: String,
    pub commit: Option<String>,
    pub kafka_cluster_id: Option<String>,
}

/// One entry of `GET /connector-plugins`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConnectorPluginInfo {
    #[schema(example = "io.confluent.connect.s3.S3SinkConnector")]
    pub class: String,
    #[serde(rename = "type")]
    #[schema(example = "sink")]
    pub plugin_type: String,
    pub version: Option<String>,
}

/// Minimal Kafka Connect REST client.
#[derive(Debug, Clone)]
pub struct ConnectClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl ConnectClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConnectClientError> {
        // A trailing slash keeps `join` from dropping the last path segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = reqwest::Url::parse(&normalized).map_err(|_| ConnectClientError::InvalidUrl(base_url.to_string()))?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub async fn get_root(&self) -> Result<RootInfo, ConnectClientError> {
        self.get_json("").await
    }

    pub async fn get_connector_plugins(&self) -> Result<Vec<ConnectorPluginInfo>, ConnectClientError> {
        self.get_json("connector-plugins").await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ConnectClientError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|_| ConnectClientError::InvalidUrl(format!("{}{path}", self.base_url)))?;

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectClientError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}
