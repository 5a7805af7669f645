use serde::Serialize;
use utoipa::ToSchema;

use crate::hooks::{ActionSet, ConnectClusterAction};

/// A configured connect cluster as rendered by the list endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConnectClusterListItem {
    pub cluster_name: String,
    pub host: String,
    #[schema(value_type = Vec<String>, example = json!(["all"]))]
    pub allowed_actions: ActionSet<ConnectClusterAction>,
    pub can_view_cluster: bool,
    pub can_edit_cluster: bool,
    pub can_delete_cluster: bool,
}

impl ConnectClusterListItem {
    pub fn new(
        cluster_name: impl Into<String>,
        host: impl Into<String>,
        allowed_actions: ActionSet<ConnectClusterAction>,
    ) -> Self {
        Self {
            cluster_name: cluster_name.into(),
            host: host.into(),
            can_view_cluster: allowed_actions.permits(ConnectClusterAction::ViewConnectCluster),
            can_edit_cluster: allowed_actions.permits(ConnectClusterAction::EditConnectCluster),
            can_delete_cluster: allowed_actions.permits(ConnectClusterAction::DeleteConnectCluster),
            allowed_actions,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConnectClustersResponse {
    pub clusters: Vec<ConnectClusterListItem>,
}
