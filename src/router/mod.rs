//! # Router Module
//!
//! Path matching and route resolution. The router scans the declared
//! routes in registration order, using per-segment matching with regex
//! constraints, and falls back to the positional
//! `/controller/action/key/value/...` convention when nothing matches.
//!
//! ## Two-phase resolution
//!
//! 1. **Declared routes**: each [`crate::route::Route`] is tested via
//!    the matcher; the first match wins and its endpoint is bound.
//!    Unconsumed trailing segments become free-form parameters.
//! 2. **Positional fallback**: segment 0 names the controller (leading
//!    character uppercased, default `Index`), segment 1 the action
//!    (default `index`), and the remaining segments are chunked into
//!    `(key, value)` pairs, an unpaired trailing key binding to the
//!    `true` sentinel.
//!
//! ## Example
//!
//! ```rust
//! use forerunner::{RouteTable, Router};
//!
//! let mut table = RouteTable::new();
//! table
//!     .register("Post")
//!     .expect("unique name")
//!     .pattern("blog/:id")
//!     .constrain("id", r"\d+")
//!     .endpoint("Blog", "view");
//!
//! let router = Router::new(table);
//! let resolved = router.resolve("/blog/42/draft");
//! assert_eq!(resolved.controller, "Blog");
//! assert_eq!(resolved.action, "view");
//! assert_eq!(resolved.params.text("id"), Some("42"));
//! ```

mod core;
mod matcher;
#[cfg(test)]
mod tests;

pub use self::core::{ResolvedRequest, Router};
pub use matcher::PathMatch;
