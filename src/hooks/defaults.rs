use async_trait::async_trait;
use axum::Router;

use crate::app::AppState;
use crate::compat::EndpointCompatibilityEndpoint;
use crate::connect::ClusterFeature;
use crate::errors::RestError;

use super::{
    ActionSet, AuthorizationHooks, ConnectClusterAction, ConsoleHooks, ConsumerGroupAction, Decision, HookContext,
    License, RouteHooks, TopicAction,
};

/// Hooks used when an embedder supplies none: routing is untouched, every
/// action is allowed and no extra features are advertised.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHooks;

impl DefaultHooks {
    pub fn new() -> Self {
        Self
    }
}

impl RouteHooks for DefaultHooks {
    fn config_api_router(&self, router: Router<AppState>) -> Router<AppState> {
        router
    }

    fn config_ws_router(&self, router: Router<AppState>) -> Router<AppState> {
        router
    }

    fn config_internal_router(&self, router: Router<AppState>) -> Router<AppState> {
        router
    }

    fn config_router(&self, router: Router<AppState>) -> Router<AppState> {
        router
    }
}

#[async_trait]
impl AuthorizationHooks for DefaultHooks {
    async fn allowed_topic_actions(&self, _ctx: &HookContext, _topic_name: &str) -> Result<ActionSet<TopicAction>, RestError> {
        Ok(ActionSet::All)
    }

    async fn can_list_acls(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    async fn can_create_acl(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    async fn can_delete_acl(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    async fn can_list_quotas(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    async fn allowed_consumer_group_actions(
        &self,
        _ctx: &HookContext,
        _group_name: &str,
    ) -> Result<ActionSet<ConsumerGroupAction>, RestError> {
        Ok(ActionSet::All)
    }

    async fn can_patch_partition_reassignments(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    async fn can_patch_configs(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    async fn allowed_connect_cluster_actions(
        &self,
        _ctx: &HookContext,
        _cluster_name: &str,
    ) -> Result<ActionSet<ConnectClusterAction>, RestError> {
        Ok(ActionSet::All)
    }

    async fn can_list_kafka_users(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    async fn can_create_kafka_users(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    async fn can_delete_kafka_users(&self, _ctx: &HookContext) -> Decision {
        Ok(true)
    }

    fn is_protected_kafka_user(&self, _user_name: &str) -> bool {
        false
    }
}

#[async_trait]
impl ConsoleHooks for DefaultHooks {
    async fn console_license_information(&self, _ctx: &HookContext) -> License {
        License::open_source()
    }

    fn enabled_features(&self) -> Vec<String> {
        Vec::new()
    }

    async fn enabled_connect_cluster_features(&self, _ctx: &HookContext, _cluster_name: &str) -> Vec<ClusterFeature> {
        Vec::new()
    }

    fn endpoint_compatibility(&self) -> Option<Vec<EndpointCompatibilityEndpoint>> {
        None
    }
}
