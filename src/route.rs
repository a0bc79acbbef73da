//! Declarative routes and the prioritized route table.
//!
//! A [`Route`] is a path pattern made of literal segments and variable
//! segments (`:name`), each variable optionally constrained by a regex.
//! Routes are registered into a [`RouteTable`] under a unique name via
//! a chainable builder, and the table doubles as the reverse-routing
//! lookup used by view helpers to generate URLs.
//!
//! Registration order is match priority: routes are greedy, and an
//! overlap between two routes is resolved in favor of the one declared
//! first. Declare specific routes before general ones.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Controller name used when a route or fallback does not name one.
pub const DEFAULT_CONTROLLER: &str = "Index";

/// Action name used when a route or fallback does not name one.
pub const DEFAULT_ACTION: &str = "index";

// Variables without an explicit constraint accept any alphanumeric,
// underscore, or dash token. Anchored to the single segment only.
static DEFAULT_CONSTRAINT: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?i)^[\w\-]+$").expect("default constraint pattern is valid")
});

/// Errors raised by route registration and reverse lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A route with this name has already been declared.
    #[error("the route `{0}` has already been declared")]
    DuplicateRoute(String),
    /// No route with this name exists in the table.
    #[error("the route `{0}` does not exist")]
    UnknownRoute(String),
}

/// One fragment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly, case-sensitive.
    Literal(String),
    /// Binds the request segment under this name, subject to the
    /// variable's constraint regex.
    Variable(String),
}

/// The (controller, action) pair a route resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub controller: String,
    pub action: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Endpoint {
            controller: DEFAULT_CONTROLLER.to_string(),
            action: DEFAULT_ACTION.to_string(),
        }
    }
}

/// A single named route: pattern, per-variable constraints, endpoint.
///
/// Built once at bootstrap through [`RouteTable::register`] and
/// immutable afterwards. An empty pattern is a deliberate fallback
/// shape: with zero fragments to test it matches any request path and
/// consumes nothing, resolving to its endpoint (default
/// `Index`/`index`).
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    pattern: String,
    segments: Vec<Segment>,
    constraints: HashMap<String, Regex>,
    endpoint: Endpoint,
}

impl Route {
    fn new(name: &str) -> Self {
        Route {
            name: name.to_string(),
            pattern: String::new(),
            segments: Vec::new(),
            constraints: HashMap::new(),
            endpoint: Endpoint::default(),
        }
    }

    /// The unique name this route was registered under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original pattern string, e.g. `foo/:bar`.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The parsed pattern fragments.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The endpoint this route dispatches to.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The constraint regex for a variable, falling back to the
    /// built-in `[\w\-]+` token pattern.
    pub(crate) fn constraint(&self, variable: &str) -> &Regex {
        self.constraints
            .get(variable)
            .unwrap_or(&DEFAULT_CONSTRAINT)
    }

    fn set_pattern(&mut self, pattern: &str) {
        self.pattern = pattern.trim_matches('/').to_string();
        self.segments = self
            .pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Variable(name.to_string()),
                None => Segment::Literal(s.to_string()),
            })
            .collect();
    }

    fn set_constraint(&mut self, variable: &str, pattern: &str) {
        // Constraints are anchored to the single segment and evaluated
        // case-insensitively, Unicode-aware. A malformed pattern is a
        // programmer error caught at bootstrap, not a runtime failure.
        #[allow(clippy::expect_used)]
        let regex = Regex::new(&format!("(?i)^{pattern}$"))
            .expect("invalid route constraint pattern");
        self.constraints.insert(variable.to_string(), regex);
    }
}

/// Chainable builder handed out by [`RouteTable::register`].
///
/// The route already lives in the table; each call fills it in.
pub struct RouteBuilder<'a> {
    route: &'a mut Route,
}

impl RouteBuilder<'_> {
    /// Set the path pattern, e.g. `foo/:bar/:acme`.
    pub fn pattern(self, pattern: &str) -> Self {
        self.route.set_pattern(pattern);
        self
    }

    /// Constrain one variable with a regex, e.g. `("bar", r"\d+")`.
    ///
    /// The pattern is wrapped as `^...$` with case-insensitive,
    /// Unicode-aware matching, exactly like the default constraint.
    pub fn constrain(self, variable: &str, pattern: &str) -> Self {
        self.route.set_constraint(variable, pattern);
        self
    }

    /// Constrain several variables at once.
    pub fn constraints<'p>(self, pairs: impl IntoIterator<Item = (&'p str, &'p str)>) -> Self {
        for (variable, pattern) in pairs {
            self.route.set_constraint(variable, pattern);
        }
        self
    }

    /// Set the endpoint this route dispatches to.
    pub fn endpoint(self, controller: &str, action: &str) -> Self {
        self.route.endpoint = Endpoint {
            controller: controller.to_string(),
            action: action.to_string(),
        };
        self
    }
}

/// An insertion-ordered, uniquely named collection of routes.
///
/// Populated during bootstrap and sealed by handing ownership to the
/// router; there is no mutation API beyond registration.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new route under a unique name.
    ///
    /// Returns a builder for filling in pattern, constraints, and
    /// endpoint. Duplicate names are a registration-time error; they
    /// would break reverse routing.
    pub fn register(&mut self, name: &str) -> Result<RouteBuilder<'_>, RouteError> {
        if self.routes.iter().any(|r| r.name == name) {
            return Err(RouteError::DuplicateRoute(name.to_string()));
        }
        debug!(route = name, position = self.routes.len(), "route registered");
        self.routes.push(Route::new(name));
        // Just pushed, so the slot exists.
        let idx = self.routes.len() - 1;
        Ok(RouteBuilder {
            route: &mut self.routes[idx],
        })
    }

    /// Look a route up by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// All routes, in registration (match-priority) order.
    #[must_use]
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Build a URL from a route name and parameters.
    ///
    /// Each `:name` marker is substituted with the URL-encoded value
    /// from `params`. Markers with no supplied value are left verbatim;
    /// the caller is responsible for supplying every variable. This
    /// quirk is part of the contract, not silently repaired.
    pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let route = self
            .get(name)
            .ok_or_else(|| RouteError::UnknownRoute(name.to_string()))?;

        let mut url = route.pattern.clone();
        for (variable, value) in params {
            url = url.replace(&format!(":{variable}"), &urlencoding::encode(value));
        }
        Ok(url)
    }
}
