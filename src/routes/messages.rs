//! Live message search over a websocket.
//!
//! The client opens `/api/topics/{topic}/messages` and sends one
//! [`ListMessagesRequest`] as a text frame. The server answers with a stream of
//! [`SearchFrame`]s and closes the socket after `done` or `error`.

use std::sync::Arc;
use std::time::Instant as StdInstant;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::Response;
use serde::Serialize;
use tokio::time::Instant;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::hooks::{authorize, HookContext};
use crate::models::topic::{ListMessagesRequest, TopicMessage};

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SearchFrame {
    Phase { phase: &'static str },
    Message { message: TopicMessage },
    #[serde(rename_all = "camelCase")]
    Done { elapsed_ms: u128, messages_consumed: usize },
    Error { status: u16, message: String },
}

/// Authorizes, audits and runs a message search.
///
/// The audit hook runs on the blocking pool and is never awaited; a slow
/// audit sink does not delay the search.
pub async fn search_messages(
    state: &AppState,
    ctx: &HookContext,
    req: ListMessagesRequest,
) -> AppResult<Vec<TopicMessage>> {
    let authz = &state.hooks.authorization;

    authorize(
        ctx,
        &format!("view messages of topic '{}'", req.topic_name),
        authz.can_view_topic_messages(ctx, &req),
    )
    .await?;

    if req.uses_filter() {
        authorize(
            ctx,
            &format!("use search filters on topic '{}'", req.topic_name),
            authz.can_use_message_search_filters(ctx, &req),
        )
        .await?;
    }

    let search = req.normalize()?;

    let audit_hooks = Arc::clone(authz);
    let audit_ctx = ctx.clone();
    let audit_search = search.clone();
    tokio::task::spawn_blocking(move || audit_hooks.print_list_messages_audit_log(&audit_ctx, &audit_search));

    Ok(state.kafka.list_messages(&search).await?)
}

pub async fn messages_ws(
    State(state): State<AppState>,
    ctx: HookContext,
    Path(topic): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| stream_search(socket, state, ctx, topic))
}

async fn stream_search(mut socket: WebSocket, state: AppState, ctx: HookContext, topic: String) {
    let mut req = match socket.recv().await {
        Some(Ok(Message::Text(text))) => match serde_json::from_str::<ListMessagesRequest>(&text) {
            Ok(req) => req,
            Err(err) => {
                let err = AppError::bad_request(format!("invalid search request: {err}"));
                send_frame(&mut socket, &error_frame(&err)).await;
                return;
            }
        },
        Some(Ok(_)) => {
            let err = AppError::bad_request("expected a JSON search request as text frame");
            send_frame(&mut socket, &error_frame(&err)).await;
            return;
        }
        Some(Err(err)) => {
            tracing::debug!(error = %err, "message search socket failed before request");
            return;
        }
        None => return,
    };
    req.topic_name = topic;

    // the upgrade may have happened long before the request frame arrived
    let ctx = ctx.with_deadline(Instant::now() + state.config.hook_timeout);
    let started = StdInstant::now();

    if !send_frame(&mut socket, &SearchFrame::Phase { phase: "Searching" }).await {
        return;
    }

    match search_messages(&state, &ctx, req).await {
        Ok(messages) => {
            let consumed = messages.len();
            for message in messages {
                if !send_frame(&mut socket, &SearchFrame::Message { message }).await {
                    return;
                }
            }
            send_frame(
                &mut socket,
                &SearchFrame::Done {
                    elapsed_ms: started.elapsed().as_millis(),
                    messages_consumed: consumed,
                },
            )
            .await;
        }
        Err(err) => {
            send_frame(&mut socket, &error_frame(&err)).await;
        }
    }

    let _ = socket.send(Message::Close(None)).await;
}

fn error_frame(err: &AppError) -> SearchFrame {
    SearchFrame::Error {
        status: err.status().as_u16(),
        message: err.to_string(),
    }
}

/// Returns `false` once the client is gone.
async fn send_frame(socket: &mut WebSocket, frame: &SearchFrame) -> bool {
    let text = match serde_json::to_string(frame) {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!(error = %err, "failed to encode search frame");
            return false;
        }
    };
    socket.send(Message::Text(text)).await.is_ok()
}
