use axum::Router;

use crate::app::AppState;

/// Extension points for the four router surfaces.
///
/// Each method receives the fully built surface and returns it, optionally
/// with extra routes or layers. They are called exactly once, in declaration
/// order, while the app is assembled and before any request is served.
pub trait RouteHooks: Send + Sync {
    /// Router for all `/api` routes.
    fn config_api_router(&self, router: Router<AppState>) -> Router<AppState>;

    /// Router for websocket routes (mounted under `/api`).
    fn config_ws_router(&self, router: Router<AppState>) -> Router<AppState>;

    /// Router for internal `/admin` routes.
    fn config_internal_router(&self, router: Router<AppState>) -> Router<AppState>;

    /// Router for everything that is neither `/api` nor `/admin`; serves the frontend.
    fn config_router(&self, router: Router<AppState>) -> Router<AppState>;
}
