use std::future::Future;
use std::time::Duration;

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};
use serde::Serialize;
use tokio::time::Instant;
use uuid::Uuid;

use crate::app::AppState;
use crate::errors::{AppError, RestError};

/// Header a fronting proxy uses to pass the authenticated principal.
pub const PRINCIPAL_HEADER: &str = "x-forwarded-user";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request context handed to every hook.
///
/// Dropping the future that holds it cancels the call; `deadline` bounds how
/// long the HTTP layer waits for a hook before failing the request.
#[derive(Debug, Clone, Serialize)]
pub struct HookContext {
    pub request_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,
    #[serde(with = "http_serde_method")]
    pub method: Method,
    #[serde(with = "http_serde_uri")]
    pub uri: Uri,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip)]
    pub deadline: Instant,
}

impl HookContext {
    /// Context for work not tied to an inbound request (startup, tests).
    pub fn background(timeout: Duration) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            principal: None,
            method: Method::GET,
            uri: Uri::from_static("/"),
            ip: None,
            user_agent: None,
            deadline: Instant::now() + timeout,
        }
    }

    pub fn from_request(method: &Method, uri: &Uri, headers: &HeaderMap, timeout: Duration) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let ip = header("x-forwarded-for")
            .map(|s| s.split(',').next().unwrap_or(&s).trim().to_string())
            .or_else(|| header("x-real-ip"));

        let request_id = header(REQUEST_ID_HEADER)
            .and_then(|id| Uuid::parse_str(&id).ok())
            .unwrap_or_else(Uuid::new_v4);

        Self {
            request_id,
            principal: header(PRINCIPAL_HEADER),
            method: method.clone(),
            uri: uri.clone(),
            ip,
            user_agent: header(axum::http::header::USER_AGENT.as_str()),
            deadline: Instant::now() + timeout,
        }
    }

    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = deadline;
        self
    }

    /// Runs a hook call against this context's deadline.
    ///
    /// An expired deadline is an operational failure, never an implicit allow.
    pub async fn guard<T, F>(&self, call: F) -> Result<T, RestError>
    where
        F: Future<Output = Result<T, RestError>>,
    {
        match tokio::time::timeout_at(self.deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(RestError::timeout("authorization check did not complete before the request deadline")
                .with_field("request_id", self.request_id.to_string())
                .with_field("uri", self.uri.to_string())),
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for HookContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(HookContext::from_request(
            &parts.method,
            &parts.uri,
            &parts.headers,
            state.config.hook_timeout,
        ))
    }
}

mod http_serde_method {
    use axum::http::Method;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(method: &Method, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(method.as_str())
    }
}

mod http_serde_uri {
    use axum::http::Uri;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(uri: &Uri, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn from_request_reads_proxy_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(PRINCIPAL_HEADER, HeaderValue::from_static("alice"));
        headers.insert("x-forwarded-for", HeaderValue::from_static("10.0.0.7, 10.0.0.1"));
        headers.insert("user-agent", HeaderValue::from_static("console-test"));

        let uri: Uri = "/api/topics/orders/messages".parse().unwrap();
        let ctx = HookContext::from_request(&Method::GET, &uri, &headers, Duration::from_secs(1));

        assert_eq!(ctx.principal.as_deref(), Some("alice"));
        assert_eq!(ctx.ip.as_deref(), Some("10.0.0.7"));
        assert_eq!(ctx.user_agent.as_deref(), Some("console-test"));
        assert_eq!(ctx.uri.path(), "/api/topics/orders/messages");
    }

    #[tokio::test]
    async fn guard_turns_expired_deadline_into_timeout() {
        let ctx = HookContext::background(Duration::from_millis(10));
        let result: Result<bool, RestError> = ctx
            .guard(async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(true)
            })
            .await;

        let err = result.expect_err("a slow hook must not allow");
        assert_eq!(err.status, axum::http::StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn guard_passes_through_fast_results() {
        let ctx = HookContext::background(Duration::from_secs(1));
        assert!(matches!(ctx.guard(async { Ok::<_, RestError>(false) }).await, Ok(false)));
    }
}
