use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AclBinding {
    #[schema(example = "Topic")]
    pub resource_type: String,
    #[schema(example = "orders")]
    pub resource_name: String,
    #[schema(example = "User:analytics")]
    pub principal: String,
    #[schema(example = "*")]
    pub host: String,
    #[schema(example = "Read")]
    pub operation: String,
    #[schema(example = "Allow")]
    pub permission_type: String,
}

/// Every set field must match; `None` matches anything.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAclsRequest {
    pub resource_type: Option<String>,
    pub resource_name: Option<String>,
    pub principal: Option<String>,
    pub operation: Option<String>,
}

impl DeleteAclsRequest {
    pub fn matches(&self, acl: &AclBinding) -> bool {
        fn field(filter: &Option<String>, value: &str) -> bool {
            filter.as_deref().map(|f| f == value).unwrap_or(true)
        }

        field(&self.resource_type, &acl.resource_type)
            && field(&self.resource_name, &acl.resource_name)
            && field(&self.principal, &acl.principal)
            && field(&self.operation, &acl.operation)
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetAclsResponse {
    pub acl_resources: Vec<AclBinding>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAclsResponse {
    pub deleted: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuotaEntry {
    #[schema(example = "user")]
    pub entity_type: String,
    #[schema(example = "analytics")]
    pub entity_name: Option<String>,
    #[schema(example = "producer_byte_rate")]
    pub key: String,
    pub value: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuotaResponse {
    pub items: Vec<QuotaEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_filter_matches_set_fields_only() {
        let acl = AclBinding {
            resource_type: "Topic".to_string(),
            resource_name: "orders".to_string(),
            principal: "User:analytics".to_string(),
            host: "*".to_string(),
            operation: "Read".to_string(),
            permission_type: "Allow".to_string(),
        };

        assert!(DeleteAclsRequest::default().matches(&acl));

        let by_principal = DeleteAclsRequest {
            principal: Some("User:analytics".to_string()),
            ..DeleteAclsRequest::default()
        };
        assert!(by_principal.matches(&acl));

        let other_topic = DeleteAclsRequest {
            resource_name: Some("payments".to_string()),
            ..by_principal
        };
        assert!(!other_topic.matches(&acl));
    }
}
