//! Router hot path: route scanning and positional fallback.

use crate::request::{tokenize_path, Params};
use crate::route::{RouteTable, DEFAULT_ACTION, DEFAULT_CONTROLLER};
use tracing::{debug, info};

use super::matcher::match_path;

/// The outcome of routing one request: a resolved endpoint plus the
/// parameter map the controller will see.
///
/// Created once per incoming request by the [`Router`], consumed by the
/// dispatcher, and discarded at end of request.
#[derive(Debug, Clone)]
pub struct ResolvedRequest {
    /// The original request path.
    pub raw_path: String,
    /// Name of the route that matched, absent when the positional
    /// convention produced the endpoint.
    pub matched_route: Option<String>,
    /// Resolved controller name.
    pub controller: String,
    /// Resolved action name.
    pub action: String,
    /// Bound route variables plus free-form path parameters.
    pub params: Params,
}

/// Matches request paths against a sealed [`RouteTable`], falling back
/// to the `/controller/action/key/value/...` convention.
///
/// Routes are tried in registration order and the first match wins;
/// routing exits as soon as a valid route is located. Taking the table
/// by value seals it: once a `Router` exists there is no registration
/// API left, so the router is safe to share across request-handling
/// threads.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    /// Seal a route table and build the router over it.
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        info!(routes_count = table.len(), "routing table sealed");
        Router { table }
    }

    /// The sealed table, for reverse routing from view helpers.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Print all registered routes to stdout.
    ///
    /// Useful for verifying bootstrap registration order, which is the
    /// match-priority order.
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.table.len());
        for route in self.table.routes() {
            let endpoint = route.endpoint();
            println!(
                "[route] {} {} -> {}::{}",
                route.name(),
                route.pattern(),
                endpoint.controller,
                endpoint.action
            );
        }
    }

    /// Resolve a request path into an endpoint and parameter map.
    #[must_use]
    pub fn resolve(&self, path: &str) -> ResolvedRequest {
        self.resolve_with(path, Params::new())
    }

    /// Resolve a request path, seeding the parameter map with query or
    /// form parameters from the transport layer.
    ///
    /// Path-derived parameters are pushed after the seed, so they take
    /// priority under the map's last-write-wins lookup.
    #[must_use]
    pub fn resolve_with(&self, path: &str, seed: Params) -> ResolvedRequest {
        let segments = tokenize_path(path);
        debug!(path = %path, segments = segments.len(), "route match attempt");

        // Phase one: declared routes, first registered first tried.
        for route in self.table.routes() {
            let Some(matched) = match_path(route, &segments) else {
                continue;
            };

            let endpoint = route.endpoint();
            let mut params = seed.clone();
            for (name, value) in matched.variables.iter() {
                params.push(name, value.clone());
            }
            // Everything after the consumed prefix is free-form
            // key/value parameters; controller and action are fixed by
            // the endpoint in this branch.
            params.extend_from_segments(&segments[matched.consumed..]);

            info!(
                path = %path,
                route = route.name(),
                controller = %endpoint.controller,
                action = %endpoint.action,
                consumed_prefix = %matched.consumed_prefix,
                "route matched"
            );

            return ResolvedRequest {
                raw_path: path.to_string(),
                matched_route: Some(route.name().to_string()),
                controller: endpoint.controller.clone(),
                action: endpoint.action.clone(),
                params,
            };
        }

        // Phase two: positional convention over the entire path.
        let controller = segments
            .first()
            .map(|s| ucfirst(s))
            .unwrap_or_else(|| DEFAULT_CONTROLLER.to_string());
        let action = segments
            .get(1)
            .map(|s| (*s).to_string())
            .unwrap_or_else(|| DEFAULT_ACTION.to_string());

        let mut params = seed;
        if segments.len() > 2 {
            params.extend_from_segments(&segments[2..]);
        }

        info!(
            path = %path,
            controller = %controller,
            action = %action,
            "no route matched, positional fallback"
        );

        ResolvedRequest {
            raw_path: path.to_string(),
            matched_route: None,
            controller,
            action,
            params,
        }
    }
}

/// Uppercase the leading character, leaving the rest untouched.
fn ucfirst(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
