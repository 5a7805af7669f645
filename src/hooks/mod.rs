//! Hooks - extension points of the console
//!
//! Three independent hook families let an embedder change behaviour without
//! touching request handling:
//! - [`RouteHooks`]: extend the api, websocket, internal and frontend routers
//! - [`AuthorizationHooks`]: allow/deny every resource operation
//! - [`ConsoleHooks`]: license, feature toggles and endpoint compatibility
//!
//! Any family left unset falls back to [`DefaultHooks`], which permits everything.

mod actions;
mod authorization;
mod console;
mod context;
mod decision;
mod defaults;
mod route;

pub use actions::{Action, ActionSet, ConnectClusterAction, ConsumerGroupAction, TopicAction, UnknownAction, WILDCARD};
pub use authorization::AuthorizationHooks;
pub use console::{ConsoleHooks, License, LicenseSource, LicenseType, UNRESTRICTED_EXPIRY};
pub use context::{HookContext, PRINCIPAL_HEADER, REQUEST_ID_HEADER};
pub use decision::{authorize, Decision};
pub use defaults::DefaultHooks;
pub use route::RouteHooks;

use std::sync::Arc;

/// The hook registry. Built once at startup and read-only afterwards; cloning
/// only bumps reference counts.
#[derive(Clone)]
pub struct Hooks {
    pub route: Arc<dyn RouteHooks>,
    pub authorization: Arc<dyn AuthorizationHooks>,
    pub console: Arc<dyn ConsoleHooks>,
}

impl Hooks {
    pub fn builder() -> HooksBuilder {
        HooksBuilder::default()
    }
}

impl Default for Hooks {
    fn default() -> Self {
        HooksBuilder::default().build()
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct HooksBuilder {
    route: Option<Arc<dyn RouteHooks>>,
    authorization: Option<Arc<dyn AuthorizationHooks>>,
    console: Option<Arc<dyn ConsoleHooks>>,
}

impl HooksBuilder {
    pub fn route(mut self, hooks: Arc<dyn RouteHooks>) -> Self {
        self.route = Some(hooks);
        self
    }

    pub fn authorization(mut self, hooks: Arc<dyn AuthorizationHooks>) -> Self {
        self.authorization = Some(hooks);
        self
    }

    pub fn console(mut self, hooks: Arc<dyn ConsoleHooks>) -> Self {
        self.console = Some(hooks);
        self
    }

    /// Fills every unset family from one shared [`DefaultHooks`] instance.
    pub fn build(self) -> Hooks {
        let defaults = Arc::new(DefaultHooks::new());
        Hooks {
            route: self.route.unwrap_or_else(|| defaults.clone()),
            authorization: self.authorization.unwrap_or_else(|| defaults.clone()),
            console: self.console.unwrap_or(defaults),
        }
    }
}
