//! Per-segment matching of a tokenized request path against one route.
//!
//! Matching is prefix-style and greedy: the test walks the *route's*
//! pattern length, left to right, and ignores any request segments
//! beyond it. Trailing segments are free-form parameters handled by the
//! router, never by the matcher. Constraint regexes anchor to the
//! single segment's token only.

use crate::request::Params;
use crate::route::{Route, Segment};
use tracing::trace;

/// The result of a successful match: bound variables plus how much of
/// the request the route consumed.
#[derive(Debug, Clone)]
pub struct PathMatch {
    /// Variables bound during the walk, in pattern order.
    pub variables: Params,
    /// Number of request segments the pattern consumed.
    pub consumed: usize,
    /// The matched portion of the path, e.g. `/foo/123`, used for
    /// stripping downstream.
    pub consumed_prefix: String,
}

/// Test one route against a tokenized request path.
///
/// Returns `None` as soon as a fragment fails; a route with an empty
/// pattern passes vacuously, consuming nothing.
pub(crate) fn match_path(route: &Route, request: &[&str]) -> Option<PathMatch> {
    // The request must carry at least as many segments as the pattern.
    if request.len() < route.segments().len() {
        return None;
    }

    let mut variables = Params::new();
    let mut consumed_prefix = String::new();

    for (i, fragment) in route.segments().iter().enumerate() {
        let candidate = request[i];
        match fragment {
            Segment::Literal(literal) => {
                if literal != candidate {
                    trace!(
                        route = route.name(),
                        index = i,
                        expected = %literal,
                        got = %candidate,
                        "literal fragment mismatch"
                    );
                    return None;
                }
            }
            Segment::Variable(name) => {
                if !route.constraint(name).is_match(candidate) {
                    trace!(
                        route = route.name(),
                        index = i,
                        variable = %name,
                        got = %candidate,
                        "constraint rejected fragment"
                    );
                    return None;
                }
                variables.push(name.as_str(), candidate);
            }
        }
        consumed_prefix.push('/');
        consumed_prefix.push_str(candidate);
    }

    Some(PathMatch {
        variables,
        consumed: route.segments().len(),
        consumed_prefix,
    })
}
