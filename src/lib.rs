//! # forerunner
//!
//! A small MVC front-controller core: prioritized route matching with
//! typed variable segments, a positional convention fallback, and a
//! controller dispatch state machine with cascading error fallback and
//! same-request forwarding.
//!
//! ## Architecture
//!
//! The library is organized into a handful of modules, leaf first:
//!
//! - **[`route`]** - declarative routes, the prioritized route table,
//!   and reverse routing
//! - **[`request`]** - request path tokenization and GET-style
//!   parameter maps
//! - **[`router`]** - first-match-wins route scanning with positional
//!   `/controller/action/key/value/...` fallback
//! - **[`registry`]** - controller name to factory dispatch table
//! - **[`controller`]** - the controller contract (init hook, actions,
//!   forward, terminal render)
//! - **[`dispatcher`]** - the resolution state machine with error
//!   fallback and single-render guarantee
//! - **[`events`]** - fire-and-forget lifecycle notifications
//! - **[`config`]** - TOML + environment application configuration
//! - **[`front`]** - the front controller tying it all together
//!
//! ## Request flow
//!
//! raw path → [`Router`] (declared routes in registration order, else
//! positional fallback) → [`ResolvedRequest`] → [`Dispatcher`]
//! (construct controller → `init` → locate action → invoke → render) →
//! [`RenderedPage`].
//!
//! ## Example
//!
//! ```rust
//! use forerunner::{
//!     ActionOutcome, AppConfig, Context, Controller, ControllerRegistry, Front, RouteTable,
//! };
//!
//! struct Hello;
//!
//! impl Controller for Hello {
//!     fn has_action(&self, action: &str) -> bool {
//!         action == "index"
//!     }
//!     fn invoke(&mut self, _action: &str, ctx: &mut Context) -> ActionOutcome {
//!         let name = ctx.param_text("name").unwrap_or("world").to_string();
//!         ctx.assign("greeting", format!("hello, {name}"));
//!         ActionOutcome::Render
//!     }
//!     fn render(&mut self, ctx: &mut Context) -> String {
//!         ctx.get("greeting").unwrap_or_default().to_string()
//!     }
//! }
//!
//! struct Errors;
//!
//! impl Controller for Errors {
//!     fn has_action(&self, action: &str) -> bool {
//!         action == "notFound"
//!     }
//!     fn invoke(&mut self, _action: &str, _ctx: &mut Context) -> ActionOutcome {
//!         ActionOutcome::Render
//!     }
//!     fn render(&mut self, _ctx: &mut Context) -> String {
//!         "not found".to_string()
//!     }
//! }
//!
//! let mut table = RouteTable::new();
//! table
//!     .register("Hello")
//!     .expect("unique name")
//!     .pattern("hello/:name")
//!     .endpoint("Hello", "index");
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("Hello", || Hello);
//! registry.register("Error", || Errors);
//!
//! let front = Front::new(AppConfig::default(), table, registry);
//! let page = front.handle("/hello/rust").expect("dispatch");
//! assert_eq!(page.body, "hello, rust");
//! ```
//!
//! ## Routing contract
//!
//! Routes are greedy and tried in registration order; declare specific
//! routes before general ones. A matched route fixes the endpoint, and
//! trailing path segments become free-form parameters. When no route
//! matches, the whole path is read positionally. Both phases feed the
//! same parameter semantics: pairs of segments become `key → value`,
//! an unpaired trailing segment becomes `key → true`.

pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod events;
pub mod front;
pub mod registry;
pub mod request;
pub mod route;
pub mod router;

pub use config::AppConfig;
pub use controller::{ActionOutcome, Context, Controller};
pub use dispatcher::{DispatchError, Dispatcher, RenderedPage, ResolutionOutcome};
pub use events::{EventListener, NullEventListener};
pub use front::Front;
pub use registry::{ControllerFactory, ControllerRegistry};
pub use request::{ParamValue, Params};
pub use route::{Endpoint, Route, RouteError, RouteTable, Segment};
pub use router::{ResolvedRequest, Router};
