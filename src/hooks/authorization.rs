use async_trait::async_trait;

use crate::errors::RestError;
use crate::models::topic::{ListMessagesRequest, MessageSearch};

use super::{ActionSet, ConnectClusterAction, ConsumerGroupAction, Decision, HookContext, TopicAction};

/// Interception points for every endpoint where access rules may apply.
///
/// Topics, consumer groups and connect clusters are enumerable: their
/// per-operation checks are provided methods that consult the matching
/// `allowed_*_actions` enumerator, so an implementation that only answers the
/// enumerators stays consistent with what the UI is told. Overriding a
/// provided check is allowed but the override must agree with the enumerator.
///
/// Implementations are shared across all in-flight requests.
#[async_trait]
pub trait AuthorizationHooks: Send + Sync {
    // Topic hooks

    async fn allowed_topic_actions(&self, ctx: &HookContext, topic_name: &str) -> Result<ActionSet<TopicAction>, RestError>;

    async fn can_see_topic(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::SeeTopic).await
    }

    async fn can_create_topic(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::CreateTopic).await
    }

    async fn can_edit_topic_config(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::EditTopicConfig).await
    }

    async fn can_delete_topic(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::DeleteTopic).await
    }

    async fn can_publish_topic_records(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::PublishTopicRecords).await
    }

    async fn can_delete_topic_records(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::DeleteTopicRecords).await
    }

    async fn can_view_topic_partitions(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::ViewPartitions).await
    }

    async fn can_view_topic_config(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::ViewConfig).await
    }

    async fn can_view_topic_messages(&self, ctx: &HookContext, req: &ListMessagesRequest) -> Decision {
        topic_permits(self, ctx, &req.topic_name, TopicAction::ViewMessages).await
    }

    async fn can_use_message_search_filters(&self, ctx: &HookContext, req: &ListMessagesRequest) -> Decision {
        topic_permits(self, ctx, &req.topic_name, TopicAction::UseSearchFilter).await
    }

    async fn can_view_topic_consumers(&self, ctx: &HookContext, topic_name: &str) -> Decision {
        topic_permits(self, ctx, topic_name, TopicAction::ViewConsumers).await
    }

    /// Records who searched for what. Called once per message search, after the
    /// view decision, on a blocking worker that the request never waits for.
    fn print_list_messages_audit_log(&self, _ctx: &HookContext, _search: &MessageSearch) {}

    // ACL hooks

    async fn can_list_acls(&self, ctx: &HookContext) -> Decision;
    async fn can_create_acl(&self, ctx: &HookContext) -> Decision;
    async fn can_delete_acl(&self, ctx: &HookContext) -> Decision;

    // Quota hooks

    async fn can_list_quotas(&self, ctx: &HookContext) -> Decision;

    // Consumer group hooks

    async fn allowed_consumer_group_actions(
        &self,
        ctx: &HookContext,
        group_name: &str,
    ) -> Result<ActionSet<ConsumerGroupAction>, RestError>;

    async fn can_see_consumer_group(&self, ctx: &HookContext, group_name: &str) -> Decision {
        Ok(self
            .allowed_consumer_group_actions(ctx, group_name)
            .await?
            .permits(ConsumerGroupAction::SeeConsumerGroup))
    }

    async fn can_edit_consumer_group(&self, ctx: &HookContext, group_name: &str) -> Decision {
        Ok(self
            .allowed_consumer_group_actions(ctx, group_name)
            .await?
            .permits(ConsumerGroupAction::EditConsumerGroup))
    }

    async fn can_delete_consumer_group(&self, ctx: &HookContext, group_name: &str) -> Decision {
        Ok(self
            .allowed_consumer_group_actions(ctx, group_name)
            .await?
            .permits(ConsumerGroupAction::DeleteConsumerGroup))
    }

    // Cluster operation hooks

    async fn can_patch_partition_reassignments(&self, ctx: &HookContext) -> Decision;
    async fn can_patch_configs(&self, ctx: &HookContext) -> Decision;

    // Kafka Connect hooks

    async fn allowed_connect_cluster_actions(
        &self,
        ctx: &HookContext,
        cluster_name: &str,
    ) -> Result<ActionSet<ConnectClusterAction>, RestError>;

    async fn can_view_connect_cluster(&self, ctx: &HookContext, cluster_name: &str) -> Decision {
        Ok(self
            .allowed_connect_cluster_actions(ctx, cluster_name)
            .await?
            .permits(ConnectClusterAction::ViewConnectCluster))
    }

    async fn can_edit_connect_cluster(&self, ctx: &HookContext, cluster_name: &str) -> Decision {
        Ok(self
            .allowed_connect_cluster_actions(ctx, cluster_name)
            .await?
            .permits(ConnectClusterAction::EditConnectCluster))
    }

    async fn can_delete_connect_cluster(&self, ctx: &HookContext, cluster_name: &str) -> Decision {
        Ok(self
            .allowed_connect_cluster_actions(ctx, cluster_name)
            .await?
            .permits(ConnectClusterAction::DeleteConnectCluster))
    }

    // Kafka user hooks

    async fn can_list_kafka_users(&self, ctx: &HookContext) -> Decision;
    async fn can_create_kafka_users(&self, ctx: &HookContext) -> Decision;
    async fn can_delete_kafka_users(&self, ctx: &HookContext) -> Decision;

    /// Reserved identities that must survive any policy, e.g. the
    /// credentials this console itself connects with.
    fn is_protected_kafka_user(&self, user_name: &str) -> bool;
}

async fn topic_permits<H>(hooks: &H, ctx: &HookContext, topic_name: &str, action: TopicAction) -> Decision
where
    H: AuthorizationHooks + ?Sized,
{
    Ok(hooks.allowed_topic_actions(ctx, topic_name).await?.permits(action))
}
