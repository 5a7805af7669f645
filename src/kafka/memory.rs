use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::acl::{AclBinding, DeleteAclsRequest, QuotaEntry};
use crate::models::consumer_group::ConsumerGroupSummary;
use crate::models::topic::{
    ConfigEntry, CreateTopicRequest, MessageSearch, PublishRecordRequest, TopicMessage, TopicSummary,
};
use crate::models::user::{CreateUserRequest, ScramMechanism};
use crate::utils::utc_now;

use super::{KafkaAdmin, KafkaError, KafkaResult};

const DEFAULT_PARTITIONS: i32 = 1;
const DEFAULT_REPLICATION_FACTOR: i16 = 1;
/// Upper bound on partitions per topic; each one is allocated up front.
pub const MAX_PARTITIONS: i32 = 10_000;

#[derive(Debug)]
struct TopicState {
    summary: TopicSummary,
    configs: Vec<ConfigEntry>,
    partitions: Vec<Vec<TopicMessage>>,
}

#[derive(Debug, Default)]
struct ClusterState {
    topics: BTreeMap<String, TopicState>,
    groups: BTreeMap<String, ConsumerGroupSummary>,
    users: BTreeMap<String, ScramMechanism>,
    acls: Vec<AclBinding>,
    quotas: Vec<QuotaEntry>,
}

/// Kafka stand-in that keeps everything in process memory.
#[derive(Debug)]
pub struct InMemoryKafka {
    version: String,
    state: RwLock<ClusterState>,
}

impl Default for InMemoryKafka {
    fn default() -> Self {
        Self::new("3.7.0")
    }
}

impl InMemoryKafka {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            state: RwLock::new(ClusterState::default()),
        }
    }

    pub fn with_topic(mut self, name: &str, partitions: i32) -> Self {
        let topic = new_topic(name, partitions.clamp(1, MAX_PARTITIONS), DEFAULT_REPLICATION_FACTOR, Vec::new());
        self.state.get_mut().topics.insert(name.to_string(), topic);
        self
    }

    pub fn with_consumer_group(mut self, group: ConsumerGroupSummary) -> Self {
        self.state.get_mut().groups.insert(group.group_id.clone(), group);
        self
    }

    pub fn with_user(mut self, name: &str, mechanism: ScramMechanism) -> Self {
        self.state.get_mut().users.insert(name.to_string(), mechanism);
        self
    }

    pub fn with_quota(mut self, quota: QuotaEntry) -> Self {
        self.state.get_mut().quotas.push(quota);
        self
    }
}

fn new_topic(name: &str, partitions: i32, replication_factor: i16, configs: Vec<ConfigEntry>) -> TopicState {
    TopicState {
        summary: TopicSummary {
            topic_name: name.to_string(),
            is_internal: name.starts_with("__"),
            partition_count: partitions,
            replication_factor,
        },
        configs,
        partitions: (0..partitions).map(|_| Vec::new()).collect(),
    }
}

fn partition_for(key: Option<&str>, partitions: usize) -> usize {
    match key {
        Some(key) => {
            let mut hasher = DefaultHasher::new();
            key.hash(&mut hasher);
            (hasher.finish() % partitions as u64) as usize
        }
        None => 0,
    }
}

#[async_trait]
impl KafkaAdmin for InMemoryKafka {
    async fn cluster_version(&self) -> KafkaResult<String> {
        Ok(self.version.clone())
    }

    async fn list_topics(&self) -> KafkaResult<Vec<TopicSummary>> {
        let state = self.state.read().await;
        Ok(state.topics.values().map(|t| t.summary.clone()).collect())
    }

    async fn create_topic(&self, req: &CreateTopicRequest) -> KafkaResult<TopicSummary> {
        let name = req.topic_name.as_str();
        if name.is_empty() || name.trim() != name {
            return Err(KafkaError::InvalidRequest(format!("invalid topic name '{name}'")));
        }

        let partitions = req.partition_count.unwrap_or(DEFAULT_PARTITIONS);
        if !(1..=MAX_PARTITIONS).contains(&partitions) {
            return Err(KafkaError::InvalidRequest(format!(
                "partition count must be between 1 and {MAX_PARTITIONS}"
            )));
        }
        let replication_factor = req.replication_factor.unwrap_or(DEFAULT_REPLICATION_FACTOR);

        let mut state = self.state.write().await;
        if state.topics.contains_key(name) {
            return Err(KafkaError::TopicExists(name.to_string()));
        }

        let topic = new_topic(name, partitions, replication_factor, req.configs.clone());
        let summary = topic.summary.clone();
        state.topics.insert(name.to_string(), topic);
        Ok(summary)
    }

    async fn delete_topic(&self, topic_name: &str) -> KafkaResult<()> {
        let mut state = self.state.write().await;
        state
            .topics
            .remove(topic_name)
            .map(|_| ())
            .ok_or_else(|| KafkaError::TopicNotFound(topic_name.to_string()))
    }

    async fn topic_config(&self, topic_name: &str) -> KafkaResult<Vec<ConfigEntry>> {
        let state = self.state.read().await;
        state
            .topics
            .get(topic_name)
            .map(|t| t.configs.clone())
            .ok_or_else(|| KafkaError::TopicNotFound(topic_name.to_string()))
    }

    async fn alter_topic_config(&self, topic_name: &str, entries: &[ConfigEntry]) -> KafkaResult<Vec<ConfigEntry>> {
        let mut state = self.state.write().await;
        let topic = state
            .topics
            .get_mut(topic_name)
            .ok_or_else(|| KafkaError::TopicNotFound(topic_name.to_string()))?;

        for entry in entries {
            topic.configs.retain(|c| c.name != entry.name);
            if entry.value.is_some() {
                topic.configs.push(entry.clone());
            }
        }
        topic.configs.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(topic.configs.clone())
    }

    async fn produce(&self, topic_name: &str, record: &PublishRecordRequest) -> KafkaResult<(i32, i64)> {
        let mut state = self.state.write().await;
        let topic = state
            .topics
            .get_mut(topic_name)
            .ok_or_else(|| KafkaError::TopicNotFound(topic_name.to_string()))?;

        let partition = match record.partition_id {
            Some(id) if id >= 0 && (id as usize) < topic.partitions.len() => id as usize,
            Some(id) => {
                return Err(KafkaError::PartitionNotFound {
                    topic: topic_name.to_string(),
                    partition: id,
                })
            }
            None => partition_for(record.key.as_deref(), topic.partitions.len()),
        };

        let log = &mut topic.partitions[partition];
        let offset = log.len() as i64;
        log.push(TopicMessage {
            partition_id: partition as i32,
            offset,
            timestamp: utc_now(),
            key: record.key.clone(),
            value: record.value.clone(),
        });

        Ok((partition as i32, offset))
    }

    async fn list_messages(&self, search: &MessageSearch) -> KafkaResult<Vec<TopicMessage>> {
        let state = self.state.read().await;
        let topic = state
            .topics
            .get(&search.topic_name)
            .ok_or_else(|| KafkaError::TopicNotFound(search.topic_name.clone()))?;

        let partitions: Vec<&Vec<TopicMessage>> = match search.partition_id {
            Some(id) => vec![topic.partitions.get(id as usize).ok_or_else(|| KafkaError::PartitionNotFound {
                topic: search.topic_name.clone(),
                partition: id,
            })?],
            None => topic.partitions.iter().collect(),
        };

        let start = search.start_offset.unwrap_or(0);
        let messages = partitions
            .into_iter()
            .flat_map(|log| log.iter())
            .filter(|m| m.offset >= start)
            .filter(|m| search.filter.as_deref().map(|f| m.value.contains(f)).unwrap_or(true))
            .take(search.max_results)
            .cloned()
            .collect();

        Ok(messages)
    }

    async fn list_consumer_groups(&self) -> KafkaResult<Vec<ConsumerGroupSummary>> {
        let state = self.state.read().await;
        Ok(state.groups.values().cloned().collect())
    }

    async fn delete_consumer_group(&self, group_id: &str) -> KafkaResult<()> {
        let mut state = self.state.write().await;
        match state.groups.get(group_id) {
            None => Err(KafkaError::GroupNotFound(group_id.to_string())),
            Some(group) if group.members > 0 => Err(KafkaError::GroupNotEmpty(group_id.to_string())),
            Some(_) => {
                state.groups.remove(group_id);
                Ok(())
            }
        }
    }

    async fn list_users(&self) -> KafkaResult<Vec<String>> {
        let state = self.state.read().await;
        Ok(state.users.keys().cloned().collect())
    }

    async fn create_user(&self, req: &CreateUserRequest) -> KafkaResult<()> {
        if req.username.trim().is_empty() || req.password.is_empty() {
            return Err(KafkaError::InvalidRequest("username and password must be set".to_string()));
        }

        let mut state = self.state.write().await;
        if state.users.contains_key(&req.username) {
            return Err(KafkaError::UserExists(req.username.clone()));
        }
        state.users.insert(req.username.clone(), req.mechanism);
        Ok(())
    }

    async fn delete_user(&self, user_name: &str) -> KafkaResult<()> {
        let mut state = self.state.write().await;
        state
            .users
            .remove(user_name)
            .map(|_| ())
            .ok_or_else(|| KafkaError::UserNotFound(user_name.to_string()))
    }

    async fn list_acls(&self) -> KafkaResult<Vec<AclBinding>> {
        let state = self.state.read().await;
        Ok(state.acls.clone())
    }

    async fn create_acl(&self, acl: &AclBinding) -> KafkaResult<()> {
        let mut state = self.state.write().await;
        if !state.acls.contains(acl) {
            state.acls.push(acl.clone());
        }
        Ok(())
    }

    async fn delete_acls(&self, filter: &DeleteAclsRequest) -> KafkaResult<usize> {
        let mut state = self.state.write().await;
        let before = state.acls.len();
        state.acls.retain(|acl| !filter.matches(acl));
        Ok(before - state.acls.len())
    }

    async fn list_quotas(&self) -> KafkaResult<Vec<QuotaEntry>> {
        let state = self.state.read().await;
        Ok(state.quotas.clone())
    }
}
