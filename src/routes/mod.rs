pub mod acls;
pub mod connect;
pub mod console;
pub mod consumer_groups;
pub mod frontend;
pub mod health;
pub mod messages;
pub mod operations;
pub mod topics;
pub mod users;

use axum::http::Uri;
use axum::routing::{delete, get, patch, post};
use axum::Router;

use crate::app::AppState;
use crate::errors::AppError;

/// REST surface, nested under `/api`.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/topics", get(topics::list_topics).post(topics::create_topic))
        .route("/topics/:topic", delete(topics::delete_topic))
        .route(
            "/topics/:topic/configuration",
            get(topics::get_topic_config).patch(topics::patch_topic_config),
        )
        .route("/topics/:topic/records", post(topics::publish_record))
        .route("/consumer-groups", get(consumer_groups::list_consumer_groups))
        .route("/consumer-groups/:group", delete(consumer_groups::delete_consumer_group))
        .route("/users", get(users::list_users).post(users::create_user))
        .route("/users/:user", delete(users::delete_user))
        .route(
            "/acls",
            get(acls::list_acls).post(acls::create_acl).delete(acls::delete_acls),
        )
        .route("/quotas", get(acls::list_quotas))
        .route("/operations/configs", patch(operations::patch_configs))
        .route("/kafka-connect/clusters", get(connect::list_clusters))
        .route("/kafka-connect/clusters/:cluster", get(connect::get_cluster_info))
        .route("/console/endpoints", get(console::get_endpoint_compatibility))
        .fallback(api_not_found)
}

/// Websocket surface, merged into the REST surface under `/api`.
pub fn ws_router() -> Router<AppState> {
    Router::new().route("/topics/:topic/messages", get(messages::messages_ws))
}

/// Operational probes, nested under `/admin`.
pub fn internal_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/startup", get(health::startup))
}

/// Root surface: the frontend bootstrap page catches everything unclaimed.
pub fn frontend_router() -> Router<AppState> {
    Router::new()
        .route("/", get(frontend::index))
        .fallback(frontend::index)
}

async fn api_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("no API route for {}", uri.path()))
}
