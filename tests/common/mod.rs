#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::body::{self, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tokio::sync::mpsc;
use tower::util::ServiceExt; // for `oneshot`

use kafka_console::config::ConsoleConfig;
use kafka_console::create_app;
use kafka_console::errors::RestError;
use kafka_console::hooks::{
    ActionSet, AuthorizationHooks, ConnectClusterAction, ConsumerGroupAction, Decision, HookContext, Hooks,
    TopicAction, PRINCIPAL_HEADER,
};
use kafka_console::kafka::{InMemoryKafka, KafkaAdmin};
use kafka_console::models::topic::MessageSearch;

pub fn config(pairs: &[(&str, &str)]) -> ConsoleConfig {
    let env: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    ConsoleConfig::from_lookup(move |key| env.get(key).cloned()).expect("test config must be valid")
}

pub fn kafka() -> InMemoryKafka {
    InMemoryKafka::default()
        .with_topic("orders", 2)
        .with_topic("payments", 1)
}

pub async fn app(hooks: Hooks) -> Result<Router> {
    app_with(config(&[]), hooks, Arc::new(kafka())).await
}

pub async fn app_with(config: ConsoleConfig, hooks: Hooks, kafka: Arc<dyn KafkaAdmin>) -> Result<Router> {
    Ok(create_app(config, hooks, kafka).await?)
}

/// Sends a request as `alice` and returns the status with the decoded JSON body
/// (`Value::Null` for empty bodies).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Result<(StatusCode, Value)> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri)
        .header(PRINCIPAL_HEADER, "alice");
    let body = match body {
        Some(json) => {
            req = req.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let resp = app.clone().oneshot(req.body(body)?).await?;
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), 10_485_760).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    Ok((status, value))
}

/// Authorization hooks driven by a fixed table.
///
/// Topics missing from `topics` get no actions at all. Every call first
/// sleeps for `delay` and then fails with `failure` when set.
pub struct Policy {
    pub topics: HashMap<String, ActionSet<TopicAction>>,
    pub groups: ActionSet<ConsumerGroupAction>,
    pub clusters: ActionSet<ConnectClusterAction>,
    /// Per-cluster actions taking precedence over `clusters`.
    pub cluster_actions: HashMap<String, ActionSet<ConnectClusterAction>>,
    pub admin: bool,
    pub protected_users: Vec<String>,
    pub failure: Option<String>,
    pub delay: Option<Duration>,
    pub audit: Option<mpsc::UnboundedSender<MessageSearch>>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            topics: HashMap::new(),
            groups: ActionSet::All,
            clusters: ActionSet::All,
            cluster_actions: HashMap::new(),
            admin: true,
            protected_users: Vec::new(),
            failure: None,
            delay: None,
            audit: None,
        }
    }
}

impl Policy {
    pub fn topic(mut self, name: &str, actions: ActionSet<TopicAction>) -> Self {
        self.topics.insert(name.to_string(), actions);
        self
    }

    pub fn into_hooks(self) -> Hooks {
        Hooks::builder().authorization(Arc::new(self)).build()
    }

    async fn gate(&self) -> Result<(), RestError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(message) => Err(RestError::service_unavailable(message.clone())),
            None => Ok(()),
        }
    }

    async fn admin(&self) -> Decision {
        self.gate().await?;
        Ok(self.admin)
    }
}

#[async_trait]
impl AuthorizationHooks for Policy {
    async fn allowed_topic_actions(&self, _ctx: &HookContext, topic_name: &str) -> Result<ActionSet<TopicAction>, RestError> {
        self.gate().await?;
        Ok(self.topics.get(topic_name).cloned().unwrap_or_else(ActionSet::none))
    }

    fn print_list_messages_audit_log(&self, _ctx: &HookContext, search: &MessageSearch) {
        if let Some(audit) = &self.audit {
            let _ = audit.send(search.clone());
        }
    }

    async fn can_list_acls(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    async fn can_create_acl(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    async fn can_delete_acl(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    async fn can_list_quotas(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    async fn allowed_consumer_group_actions(
        &self,
        _ctx: &HookContext,
        _group_name: &str,
    ) -> Result<ActionSet<ConsumerGroupAction>, RestError> {
        self.gate().await?;
        Ok(self.groups.clone())
    }

    async fn can_patch_partition_reassignments(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    async fn can_patch_configs(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    async fn allowed_connect_cluster_actions(
        &self,
        _ctx: &HookContext,
        cluster_name: &str,
    ) -> Result<ActionSet<ConnectClusterAction>, RestError> {
        self.gate().await?;
        Ok(self
            .cluster_actions
            .get(cluster_name)
            .cloned()
            .unwrap_or_else(|| self.clusters.clone()))
    }

    async fn can_list_kafka_users(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    async fn can_create_kafka_users(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    async fn can_delete_kafka_users(&self, _ctx: &HookContext) -> Decision {
        self.admin().await
    }

    fn is_protected_kafka_user(&self, user_name: &str) -> bool {
        self.protected_users.iter().any(|u| u == user_name)
    }
}
