//! Boundary to the Kafka cluster.
//!
//! The console only needs the administrative operations below; the wire
//! protocol client lives behind [`KafkaAdmin`].

mod memory;

pub use memory::{InMemoryKafka, MAX_PARTITIONS};

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::models::acl::{AclBinding, DeleteAclsRequest, QuotaEntry};
use crate::models::consumer_group::ConsumerGroupSummary;
use crate::models::topic::{
    ConfigEntry, CreateTopicRequest, MessageSearch, PublishRecordRequest, TopicMessage, TopicSummary,
};
use crate::models::user::CreateUserRequest;

#[derive(Debug, thiserror::Error)]
pub enum KafkaError {
    #[error("topic `{0}` does not exist")]
    TopicNotFound(String),
    #[error("topic `{0}` already exists")]
    TopicExists(String),
    #[error("partition {partition} does not exist on topic `{topic}`")]
    PartitionNotFound { topic: String, partition: i32 },
    #[error("consumer group `{0}` does not exist")]
    GroupNotFound(String),
    #[error("consumer group `{0}` still has active members")]
    GroupNotEmpty(String),
    #[error("user `{0}` does not exist")]
    UserNotFound(String),
    #[error("user `{0}` already exists")]
    UserExists(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("kafka cluster unavailable: {0}")]
    Unavailable(String),
}

impl KafkaError {
    pub fn status(&self) -> StatusCode {
        match self {
            KafkaError::TopicNotFound(_)
            | KafkaError::PartitionNotFound { .. }
            | KafkaError::GroupNotFound(_)
            | KafkaError::UserNotFound(_) => StatusCode::NOT_FOUND,
            KafkaError::TopicExists(_) | KafkaError::UserExists(_) | KafkaError::GroupNotEmpty(_) => StatusCode::CONFLICT,
            KafkaError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            KafkaError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

pub type KafkaResult<T> = Result<T, KafkaError>;

#[async_trait]
pub trait KafkaAdmin: Send + Sync {
    async fn cluster_version(&self) -> KafkaResult<String>;

    async fn list_topics(&self) -> KafkaResult<Vec<TopicSummary>>;
    async fn create_topic(&self, req: &CreateTopicRequest) -> KafkaResult<TopicSummary>;
    async fn delete_topic(&self, topic_name: &str) -> KafkaResult<()>;
    async fn topic_config(&self, topic_name: &str) -> KafkaResult<Vec<ConfigEntry>>;
    /// Upserts the given entries; an entry without a value resets it to the broker default.
    async fn alter_topic_config(&self, topic_name: &str, entries: &[ConfigEntry]) -> KafkaResult<Vec<ConfigEntry>>;

    /// Appends a record and returns `(partition, offset)`.
    async fn produce(&self, topic_name: &str, record: &PublishRecordRequest) -> KafkaResult<(i32, i64)>;
    async fn list_messages(&self, search: &MessageSearch) -> KafkaResult<Vec<TopicMessage>>;

    async fn list_consumer_groups(&self) -> KafkaResult<Vec<ConsumerGroupSummary>>;
    async fn delete_consumer_group(&self, group_id: &str) -> KafkaResult<()>;

    async fn list_users(&self) -> KafkaResult<Vec<String>>;
    async fn create_user(&self, req: &CreateUserRequest) -> KafkaResult<()>;
    async fn delete_user(&self, user_name: &str) -> KafkaResult<()>;

    async fn list_acls(&self) -> KafkaResult<Vec<AclBinding>>;
    async fn create_acl(&self, acl: &AclBinding) -> KafkaResult<()>;
    /// Returns how many bindings matched and were removed.
    async fn delete_acls(&self, filter: &DeleteAclsRequest) -> KafkaResult<usize>;

    async fn list_quotas(&self) -> KafkaResult<Vec<QuotaEntry>>;
}
