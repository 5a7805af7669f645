use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::hooks::{ActionSet, ConsumerGroupAction};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerGroupSummary {
    pub group_id: String,
    #[schema(example = "Stable")]
    pub state: String,
    pub members: usize,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerGroupListItem {
    #[serde(flatten)]
    pub group: ConsumerGroupSummary,
    #[schema(value_type = Vec<String>, example = json!(["all"]))]
    pub allowed_actions: ActionSet<ConsumerGroupAction>,
    pub no_edit_perms: bool,
    pub no_delete_perms: bool,
    pub is_in_use: bool,
}

impl ConsumerGroupListItem {
    pub fn new(group: ConsumerGroupSummary, allowed_actions: ActionSet<ConsumerGroupAction>) -> Self {
        let no_edit_perms = !allowed_actions.permits(ConsumerGroupAction::EditConsumerGroup);
        let no_delete_perms = !allowed_actions.permits(ConsumerGroupAction::DeleteConsumerGroup);
        let is_in_use = !group.state.eq_ignore_ascii_case("empty");
        Self {
            group,
            allowed_actions,
            no_edit_perms,
            no_delete_perms,
            is_in_use,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetConsumerGroupsResponse {
    pub consumer_groups: Vec<ConsumerGroupListItem>,
}
