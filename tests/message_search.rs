mod common;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::http::StatusCode;
use tokio::sync::mpsc;

use common::Policy;
use kafka_console::app::AppState;
use kafka_console::hooks::{ActionSet, HookContext, TopicAction};
use kafka_console::kafka::{InMemoryKafka, KafkaAdmin};
use kafka_console::models::topic::{ListMessagesRequest, PublishRecordRequest};
use kafka_console::routes::messages::search_messages;

async fn seeded_kafka() -> Result<Arc<InMemoryKafka>> {
    let kafka = Arc::new(InMemoryKafka::default().with_topic("orders", 1));
    for value in ["order created", "order shipped", "refund created"] {
        kafka
            .produce(
                "orders",
                &PublishRecordRequest {
                    partition_id: None,
                    key: None,
                    value: value.to_string(),
                },
            )
            .await?;
    }
    Ok(kafka)
}

fn state(policy: Policy, kafka: Arc<InMemoryKafka>) -> Result<AppState> {
    Ok(AppState::new(common::config(&[]), policy.into_hooks(), kafka)?)
}

fn ctx() -> HookContext {
    HookContext::background(Duration::from_secs(1)).with_principal("alice")
}

#[tokio::test]
async fn search_is_audited_exactly_once() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let policy = Policy {
        audit: Some(tx),
        ..Policy::default()
    }
    .topic("orders", ActionSet::All);
    let state = state(policy, seeded_kafka().await?)?;

    let req = ListMessagesRequest {
        filter_interpreter_code: Some("created".to_string()),
        ..ListMessagesRequest::for_topic("orders")
    };
    let messages = search_messages(&state, &ctx(), req).await?;
    assert_eq!(messages.len(), 2);

    let audited = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await?
        .expect("audit hook was invoked");
    assert_eq!(audited.topic_name, "orders");
    assert_eq!(audited.filter.as_deref(), Some("created"));
    assert_eq!(audited.max_results, 50);

    // the policy (and with it the sender) is owned by the state
    drop(state);
    assert!(rx.recv().await.is_none(), "audit hook ran more than once");

    Ok(())
}

#[tokio::test]
async fn filters_need_their_own_permission() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let policy = Policy {
        audit: Some(tx),
        ..Policy::default()
    }
    .topic("orders", ActionSet::only([TopicAction::SeeTopic, TopicAction::ViewMessages]));
    let state = state(policy, seeded_kafka().await?)?;

    let plain = search_messages(&state, &ctx(), ListMessagesRequest::for_topic("orders")).await?;
    assert_eq!(plain.len(), 3);

    let filtered = ListMessagesRequest {
        filter_interpreter_code: Some("refund".to_string()),
        ..ListMessagesRequest::for_topic("orders")
    };
    let err = search_messages(&state, &ctx(), filtered)
        .await
        .expect_err("filter must be refused");
    assert_eq!(err.status(), StatusCode::FORBIDDEN);

    drop(state);
    let mut audited = 0;
    while rx.recv().await.is_some() {
        audited += 1;
    }
    assert_eq!(audited, 1, "a refused search must not be audited");

    Ok(())
}

#[tokio::test]
async fn blank_filters_do_not_count_as_filters() -> Result<()> {
    let policy = Policy::default().topic("orders", ActionSet::only([TopicAction::ViewMessages]));
    let state = state(policy, seeded_kafka().await?)?;

    let req = ListMessagesRequest {
        filter_interpreter_code: Some("   ".to_string()),
        ..ListMessagesRequest::for_topic("orders")
    };
    assert_eq!(search_messages(&state, &ctx(), req).await?.len(), 3);

    Ok(())
}

#[tokio::test]
async fn invalid_bounds_are_rejected_after_authorization() -> Result<()> {
    let state = state(Policy::default().topic("orders", ActionSet::All), seeded_kafka().await?)?;

    let req = ListMessagesRequest {
        max_results: Some(10_000),
        ..ListMessagesRequest::for_topic("orders")
    };
    let err = search_messages(&state, &ctx(), req).await.expect_err("too many results");
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
