mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use kafka_console::app::AppState;
use kafka_console::hooks::{Hooks, RouteHooks};

/// Adds one route per surface and records the order it was called in.
#[derive(Default)]
struct ExtraRoutes {
    calls: AtomicUsize,
    order: Mutex<Vec<&'static str>>,
}

impl ExtraRoutes {
    fn record(&self, surface: &'static str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.order.lock().expect("order lock").push(surface);
    }
}

impl RouteHooks for ExtraRoutes {
    fn config_api_router(&self, router: Router<AppState>) -> Router<AppState> {
        self.record("api");
        router.route("/custom", get(|| async { Json(json!({"custom": true})) }))
    }

    fn config_ws_router(&self, router: Router<AppState>) -> Router<AppState> {
        self.record("ws");
        router
    }

    fn config_internal_router(&self, router: Router<AppState>) -> Router<AppState> {
        self.record("internal");
        router.route("/ready", get(|| async { "ready" }))
    }

    fn config_router(&self, router: Router<AppState>) -> Router<AppState> {
        self.record("router");
        router.route("/login", get(|| async { "login page" }))
    }
}

#[tokio::test]
async fn each_surface_is_configured_exactly_once_in_order() -> Result<()> {
    let extra = Arc::new(ExtraRoutes::default());
    let hooks = Hooks::builder().route(extra.clone()).build();

    let _app = common::app(hooks).await?;

    assert_eq!(extra.calls.load(Ordering::SeqCst), 4);
    assert_eq!(*extra.order.lock().expect("order lock"), vec!["api", "ws", "internal", "router"]);

    Ok(())
}

#[tokio::test]
async fn hook_routes_are_served_next_to_builtins() -> Result<()> {
    let hooks = Hooks::builder().route(Arc::new(ExtraRoutes::default())).build();
    let app = common::app(hooks).await?;

    let (status, body) = common::send(&app, "GET", "/api/custom", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"custom": true}));

    let (status, body) = common::send(&app, "GET", "/admin/ready", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ready"));

    let (status, body) = common::send(&app, "GET", "/login", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("login page"));

    // built-in routes of the same surfaces still work
    let (status, _) = common::send(&app, "GET", "/api/topics", None).await?;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = common::send(&app, "GET", "/admin/health", None).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn unknown_api_paths_get_json_not_found() -> Result<()> {
    let app = common::app(Hooks::default()).await?;

    let (status, body) = common::send(&app, "GET", "/api/custom", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    Ok(())
}
