use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::hooks::{ActionSet, TopicAction};

pub const DEFAULT_MAX_RESULTS: usize = 50;
pub const MAX_RESULTS_LIMIT: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub topic_name: String,
    pub is_internal: bool,
    pub partition_count: i32,
    pub replication_factor: i16,
}

/// A topic as rendered by the list endpoint, annotated with what the caller may do with it.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicListItem {
    #[serde(flatten)]
    pub topic: TopicSummary,
    #[schema(value_type = Vec<String>, example = json!(["all"]))]
    pub allowed_actions: ActionSet<TopicAction>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTopicsResponse {
    pub topics: Vec<TopicListItem>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTopicRequest {
    #[schema(example = "orders")]
    pub topic_name: String,
    #[schema(example = 3)]
    pub partition_count: Option<i32>,
    #[schema(example = 1)]
    pub replication_factor: Option<i16>,
    #[serde(default)]
    pub configs: Vec<ConfigEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConfigEntry {
    #[schema(example = "cleanup.policy")]
    pub name: String,
    #[schema(example = "delete")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicConfigResponse {
    pub topic_name: String,
    pub config_entries: Vec<ConfigEntry>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishRecordRequest {
    pub partition_id: Option<i32>,
    pub key: Option<String>,
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublishRecordResponse {
    pub topic_name: String,
    pub partition_id: i32,
    pub offset: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopicMessage {
    pub partition_id: i32,
    pub offset: i64,
    pub timestamp: DateTime<Utc>,
    pub key: Option<String>,
    pub value: String,
}

/// Message search as sent by the client over the websocket.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesRequest {
    #[serde(default)]
    pub topic_name: String,
    /// `-1` (or absent) searches all partitions.
    pub partition_id: Option<i32>,
    /// `-1` (or absent) starts from the oldest offset.
    pub start_offset: Option<i64>,
    pub max_results: Option<usize>,
    /// Substring every returned value must contain.
    pub filter_interpreter_code: Option<String>,
}

impl ListMessagesRequest {
    pub fn for_topic(topic_name: impl Into<String>) -> Self {
        Self {
            topic_name: topic_name.into(),
            ..Self::default()
        }
    }

    pub fn uses_filter(&self) -> bool {
        self.filter_interpreter_code
            .as_deref()
            .map(|code| !code.trim().is_empty())
            .unwrap_or(false)
    }

    /// Applies defaults and validates bounds.
    pub fn normalize(&self) -> Result<MessageSearch, AppError> {
        if self.topic_name.trim().is_empty() {
            return Err(AppError::bad_request("topic name must be set"));
        }

        let max_results = self.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        if max_results == 0 || max_results > MAX_RESULTS_LIMIT {
            return Err(AppError::bad_request(format!(
                "max results must be between 1 and {MAX_RESULTS_LIMIT}"
            )));
        }

        let filter = self
            .filter_interpreter_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(String::from);

        Ok(MessageSearch {
            topic_name: self.topic_name.clone(),
            partition_id: self.partition_id.filter(|id| *id >= 0),
            start_offset: self.start_offset.filter(|offset| *offset >= 0),
            max_results,
            filter,
        })
    }
}

/// Normalized message search parameters, as executed and audited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSearch {
    pub topic_name: String,
    pub partition_id: Option<i32>,
    pub start_offset: Option<i64>,
    pub max_results: usize,
    pub filter: Option<String>,
}

/// One resource of a bulk configuration patch.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchConfigResource {
    #[schema(example = "topic")]
    pub resource_type: String,
    pub resource_name: String,
    pub configs: Vec<ConfigEntry>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchConfigsRequest {
    pub resources: Vec<PatchConfigResource>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatchConfigsResponse {
    pub patched_resources: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_applies_defaults() {
        let req = ListMessagesRequest {
            partition_id: Some(-1),
            start_offset: Some(-1),
            filter_interpreter_code: Some("   ".to_string()),
            ..ListMessagesRequest::for_topic("orders")
        };

        let search = req.normalize().expect("valid request");
        assert_eq!(search.topic_name, "orders");
        assert_eq!(search.partition_id, None);
        assert_eq!(search.start_offset, None);
        assert_eq!(search.max_results, DEFAULT_MAX_RESULTS);
        assert_eq!(search.filter, None);
        assert!(!req.uses_filter());
    }

    #[test]
    fn normalize_rejects_out_of_range_max_results() {
        let req = ListMessagesRequest {
            max_results: Some(MAX_RESULTS_LIMIT + 1),
            ..ListMessagesRequest::for_topic("orders")
        };
        assert!(matches!(req.normalize(), Err(AppError::BadRequest(_))));

        let req = ListMessagesRequest {
            max_results: Some(0),
            ..ListMessagesRequest::for_topic("orders")
        };
        assert!(matches!(req.normalize(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn normalize_requires_topic() {
        assert!(matches!(
            ListMessagesRequest::default().normalize(),
            Err(AppError::BadRequest(_))
        ));
    }
}
