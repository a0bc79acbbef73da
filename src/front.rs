//! The front controller: the request-handling entry point.
//!
//! Bridges configuration, the sealed router, and the dispatcher. One
//! `Front` is built at bootstrap and then handles requests one at a
//! time; it holds no per-request state, so it can be shared across
//! worker threads.

use crate::config::AppConfig;
use crate::dispatcher::{DispatchError, Dispatcher, RenderedPage};
use crate::events::{EventListener, NullEventListener};
use crate::registry::ControllerRegistry;
use crate::request::Params;
use crate::route::RouteTable;
use crate::router::Router;
use std::sync::Arc;
use tracing::{debug, info};

/// Front controller wiring config, router, and dispatcher together.
pub struct Front {
    config: AppConfig,
    router: Router,
    dispatcher: Dispatcher,
    listener: Arc<dyn EventListener>,
}

impl Front {
    /// Assemble an application with no event listener.
    ///
    /// Taking the route table by value seals it; registration is over
    /// once the front controller exists.
    #[must_use]
    pub fn new(config: AppConfig, table: RouteTable, registry: ControllerRegistry) -> Self {
        Self::with_listener(config, table, registry, Arc::new(NullEventListener))
    }

    /// Assemble an application that notifies the given listener at the
    /// four request lifecycle points.
    #[must_use]
    pub fn with_listener(
        config: AppConfig,
        table: RouteTable,
        registry: ControllerRegistry,
        listener: Arc<dyn EventListener>,
    ) -> Self {
        info!(project = %config.project, "front controller assembled");
        Front {
            config,
            router: Router::new(table),
            dispatcher: Dispatcher::with_listener(registry, Arc::clone(&listener)),
            listener,
        }
    }

    /// The sealed router, for reverse routing and route inspection.
    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Handle one request path end to end.
    pub fn handle(&self, path: &str) -> Result<RenderedPage, DispatchError> {
        self.handle_with(path, Params::new())
    }

    /// Handle one request path, seeding the parameter map with query
    /// or form parameters from the transport layer.
    pub fn handle_with(&self, path: &str, seed: Params) -> Result<RenderedPage, DispatchError> {
        let path = self.strip_path_root(path);
        let resolved = self.router.resolve_with(path, seed);

        self.listener
            .request_initialised(&resolved.controller, &resolved.action);

        self.dispatcher.dispatch(&resolved)
    }

    // Requests arrive with the deployment prefix still attached; routing
    // only ever sees the application-relative path.
    fn strip_path_root<'a>(&self, path: &'a str) -> &'a str {
        let root = self.config.path_root.trim_end_matches('/');
        if root.is_empty() {
            return path;
        }
        match path.strip_prefix(root) {
            Some(rest) => {
                debug!(path_root = %root, rest = %rest, "stripped path root");
                rest
            }
            None => path,
        }
    }
}

impl std::fmt::Debug for Front {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Front")
            .field("config", &self.config)
            .field("router", &self.router)
            .finish_non_exhaustive()
    }
}
