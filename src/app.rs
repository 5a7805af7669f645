use std::sync::Arc;

use axum::http::Method;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ConsoleConfig;
use crate::connect::ConnectService;
use crate::docs;
use crate::errors::AppError;
use crate::hooks::{HookContext, Hooks};
use crate::kafka::KafkaAdmin;
use crate::routes::{self, frontend};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConsoleConfig>,
    pub hooks: Hooks,
    pub kafka: Arc<dyn KafkaAdmin>,
    pub connect: Arc<ConnectService>,
    /// Bootstrap page with the enabled features already substituted.
    pub index_html: Arc<str>,
}

impl AppState {
    pub fn new(config: ConsoleConfig, hooks: Hooks, kafka: Arc<dyn KafkaAdmin>) -> Result<Self, AppError> {
        let connect = ConnectService::new(&config.connect)?;
        let index_html = frontend::render_index(&hooks.console.enabled_features());

        Ok(Self {
            config: Arc::new(config),
            hooks,
            kafka,
            connect: Arc::new(connect),
            index_html,
        })
    }
}

/// Builds the full router.
///
/// Each route hook is invoked exactly once, in the order api, ws, internal,
/// root, on a router that already carries the built-in routes of its surface.
pub async fn create_app(config: ConsoleConfig, hooks: Hooks, kafka: Arc<dyn KafkaAdmin>) -> Result<Router, AppError> {
    let openapi = docs::build_openapi(config.port)?;
    let state = AppState::new(config, hooks, kafka)?;

    let license = state
        .hooks
        .console
        .console_license_information(&HookContext::background(state.config.hook_timeout))
        .await;
    tracing::info!(
        source = ?license.source,
        license_type = ?license.license_type,
        expires_at = license.expires_at,
        "console license loaded"
    );
    tracing::info!(
        connect_clusters = state.connect.clusters().len(),
        hook_timeout_ms = state.config.hook_timeout.as_millis() as u64,
        "console configured"
    );

    let route_hooks = Arc::clone(&state.hooks.route);
    let api = route_hooks.config_api_router(routes::api_router());
    let ws = route_hooks.config_ws_router(routes::ws_router());
    let internal = route_hooks.config_internal_router(routes::internal_router());
    let root = route_hooks.config_router(routes::frontend_router());

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_origin(Any)
        .allow_headers(Any);

    let router = Router::new()
        .nest("/api", api.merge(ws))
        .nest("/admin", internal)
        .merge(docs::openapi_router(openapi))
        .merge(root)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
