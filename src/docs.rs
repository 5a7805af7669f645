use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::app::AppState;
use crate::hooks::PRINCIPAL_HEADER;
use crate::{compat, connect, hooks, models, routes};

#[derive(OpenApi)]
#[openapi(
	paths(
		routes::topics::list_topics,
		routes::topics::create_topic,
		routes::topics::delete_topic,
		routes::topics::get_topic_config,
		routes::topics::patch_topic_config,
		routes::topics::publish_record,
		routes::consumer_groups::list_consumer_groups,
		routes::consumer_groups::delete_consumer_group,
		routes::users::list_users,
		routes::users::create_user,
		routes::users::delete_user,
		routes::acls::list_acls,
		routes::acls::create_acl,
		routes::acls::delete_acls,
		routes::acls::list_quotas,
		routes::operations::patch_configs,
		routes::connect::list_clusters,
		routes::connect::get_cluster_info,
		routes::console::get_endpoint_compatibility,
		routes::health::health,
		routes::health::startup
	),
	components(
		schemas(
			models::topic::TopicSummary,
			models::topic::TopicListItem,
			models::topic::GetTopicsResponse,
			models::topic::CreateTopicRequest,
			models::topic::ConfigEntry,
			models::topic::TopicConfigResponse,
			models::topic::PublishRecordRequest,
			models::topic::PublishRecordResponse,
			models::topic::TopicMessage,
			models::topic::ListMessagesRequest,
			models::topic::PatchConfigResource,
			models::topic::PatchConfigsRequest,
			models::topic::PatchConfigsResponse,
			models::consumer_group::ConsumerGroupSummary,
			models::consumer_group::ConsumerGroupListItem,
			models::consumer_group::GetConsumerGroupsResponse,
			models::user::ScramMechanism,
			models::user::GetUsersResponse,
			models::user::CreateUserRequest,
			models::acl::AclBinding,
			models::acl::DeleteAclsRequest,
			models::acl::GetAclsResponse,
			models::acl::DeleteAclsResponse,
			models::acl::QuotaEntry,
			models::acl::QuotaResponse,
			models::connect::ConnectClusterListItem,
			models::connect::GetConnectClustersResponse,
			connect::ClusterInfo,
			connect::ClusterFeature,
			connect::ConnectorPluginInfo,
			compat::EndpointCompatibilityEndpoint,
			compat::EndpointCompatibility,
			compat::EndpointCompatibilityResponse,
			hooks::License,
			hooks::LicenseSource,
			hooks::LicenseType,
			routes::health::HealthResponse
		)
	),
	modifiers(&PrincipalHeader),
	tags(
		(name = "Topics", description = "Topic management and records"),
		(name = "Consumer Groups", description = "Consumer group management"),
		(name = "Users", description = "SCRAM user management"),
		(name = "ACLs", description = "Access control lists"),
		(name = "Quotas", description = "Client quotas"),
		(name = "Operations", description = "Cluster wide operations"),
		(name = "Kafka Connect", description = "Kafka Connect clusters"),
		(name = "Console", description = "Console capabilities"),
		(name = "Health", description = "Operational probes")
	)
)]
pub struct ApiDoc;

/// Documents the header a fronting proxy uses to pass the principal.
struct PrincipalHeader;

impl Modify for PrincipalHeader {
	fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
		if let Some(components) = openapi.components.as_mut() {
			components.add_security_scheme(
				"principalHeader",
				SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(PRINCIPAL_HEADER))),
			);
		}
	}
}

pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
	let mut doc = serde_json::to_value(ApiDoc::openapi())?;

	ensure_servers(&mut doc, port);

	let doc: utoipa::openapi::OpenApi = serde_json::from_value(doc)?;
	Ok(doc)
}

pub fn openapi_router(doc: utoipa::openapi::OpenApi) -> Router<AppState> {
	let doc = Arc::new(doc);
	Router::new().route(
		"/api-docs/openapi.json",
		get(move || {
			let doc = Arc::clone(&doc);
			async move { Json(doc.as_ref().clone()) }
		}),
	)
}

fn ensure_servers(doc: &mut Value, port: u16) {
	let server_url = format!("http://localhost:{}", port);

	match doc.get_mut("servers") {
		Some(Value::Array(arr)) => {
			let has = arr.iter().any(|v| v.get("url").and_then(Value::as_str) == Some(server_url.as_str()));
			if !has {
				arr.push(json!({ "url": server_url }));
			}
		}
		_ => {
			doc["servers"] = json!([{ "url": server_url }]);
		}
	}
}
