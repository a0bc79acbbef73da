//! Controller registry: name to factory, populated at bootstrap.
//!
//! Controller resolution is an explicit dispatch table rather than
//! dynamic class-name instantiation: the application registers a
//! factory per controller name, and the dispatcher looks names up at
//! dispatch time. An unregistered name is an ordinary resolution
//! outcome, not an error.

use crate::controller::Controller;
use std::collections::HashMap;
use tracing::{info, warn};

/// Constructor for one controller. A fresh instance is built per
/// request (and per cross-controller forward hop).
pub type ControllerFactory = Box<dyn Fn() -> Box<dyn Controller> + Send + Sync>;

/// Map of controller names to their factories.
#[derive(Default)]
pub struct ControllerRegistry {
    factories: HashMap<String, ControllerFactory>,
}

impl ControllerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a controller factory under a name.
    ///
    /// Registering the same name again replaces the previous factory;
    /// requests already holding an instance are unaffected.
    pub fn register<C, F>(&mut self, name: &str, factory: F)
    where
        C: Controller + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        if self
            .factories
            .insert(name.to_string(), Box::new(move || Box::new(factory())))
            .is_some()
        {
            warn!(controller = name, "replaced existing controller factory");
        } else {
            info!(
                controller = name,
                total_controllers = self.factories.len(),
                "controller registered"
            );
        }
    }

    /// Construct a fresh controller instance by name.
    #[must_use]
    pub fn construct(&self, name: &str) -> Option<Box<dyn Controller>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// Whether a controller with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered controller names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Number of registered controllers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl std::fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("controllers", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}
