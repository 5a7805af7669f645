mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

use kafka_console::hooks::Hooks;
use kafka_console::kafka::{InMemoryKafka, KafkaAdmin};

#[tokio::test]
async fn bulk_patch_with_missing_topic_changes_nothing() -> Result<()> {
    let kafka = Arc::new(common::kafka());
    let app = common::app_with(common::config(&[]), Hooks::default(), kafka.clone()).await?;

    let patch = json!({"resources": [
        {"resourceType": "topic", "resourceName": "orders", "configs": [{"name": "retention.ms", "value": "1000"}]},
        {"resourceType": "topic", "resourceName": "ghost", "configs": [{"name": "retention.ms", "value": "1000"}]}
    ]});
    let (status, _) = common::send(&app, "PATCH", "/api/operations/configs", Some(patch)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(kafka.topic_config("orders").await?.is_empty(), "orders was patched before the lookup failed");

    Ok(())
}

#[tokio::test]
async fn bulk_patch_applies_every_resource() -> Result<()> {
    let kafka = Arc::new(common::kafka());
    let app = common::app_with(common::config(&[]), Hooks::default(), kafka.clone()).await?;

    let patch = json!({"resources": [
        {"resourceType": "topic", "resourceName": "orders", "configs": [{"name": "retention.ms", "value": "1000"}]},
        {"resourceType": "TOPIC", "resourceName": "payments", "configs": [{"name": "cleanup.policy", "value": "compact"}]}
    ]});
    let (status, body) = common::send(&app, "PATCH", "/api/operations/configs", Some(patch)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["patchedResources"], 2);

    assert_eq!(kafka.topic_config("orders").await?.len(), 1);
    assert_eq!(kafka.topic_config("payments").await?[0].value.as_deref(), Some("compact"));

    Ok(())
}

#[tokio::test]
async fn unsupported_resource_type_is_bad_request() -> Result<()> {
    let kafka = Arc::new(InMemoryKafka::default().with_topic("orders", 1));
    let app = common::app_with(common::config(&[]), Hooks::default(), kafka.clone()).await?;

    let patch = json!({"resources": [
        {"resourceType": "topic", "resourceName": "orders", "configs": [{"name": "retention.ms", "value": "1000"}]},
        {"resourceType": "broker", "resourceName": "1", "configs": []}
    ]});
    let (status, body) = common::send(&app, "PATCH", "/api/operations/configs", Some(patch)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad_request");
    assert!(kafka.topic_config("orders").await?.is_empty());

    Ok(())
}
