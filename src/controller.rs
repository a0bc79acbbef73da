//! The controller contract the dispatcher drives.
//!
//! A controller is polymorphic over a small capability set: an optional
//! `init` lifecycle hook, named actions, forwarding, and a terminal
//! `render` step. The dispatcher does not care how a controller
//! implements these, only that they behave per its state machine.

use crate::request::{ParamValue, Params};
use crate::router::ResolvedRequest;
use std::collections::HashMap;

/// What an invoked action asks the dispatcher to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Proceed to the terminal render step. After render, no further
    /// action may run for this request.
    Render,
    /// Internal redirect: re-enter dispatch on another action, and
    /// optionally another controller, without changing the externally
    /// visible URL. The forwarding controller never renders.
    Forward {
        action: String,
        controller: Option<String>,
    },
    /// The action could not complete. Drives the same fallback
    /// transitions as a missing action.
    Failed(String),
}

impl ActionOutcome {
    /// Forward to another action on the same controller instance.
    #[must_use]
    pub fn forward(action: &str) -> Self {
        ActionOutcome::Forward {
            action: action.to_string(),
            controller: None,
        }
    }

    /// Forward to an action on a different controller.
    #[must_use]
    pub fn forward_to(controller: &str, action: &str) -> Self {
        ActionOutcome::Forward {
            action: action.to_string(),
            controller: Some(controller.to_string()),
        }
    }
}

/// Per-request state shared between the dispatcher, the running
/// controller, and the view layer.
///
/// Carries the resolved parameters, the controller/action currently
/// being targeted, and a string key-value store for view assignments
/// behind an explicit `assign`/`get` surface.
#[derive(Debug, Clone)]
pub struct Context {
    raw_path: String,
    params: Params,
    controller: String,
    action: String,
    data: HashMap<String, String>,
}

impl Context {
    /// Build the context for one resolved request.
    #[must_use]
    pub fn new(request: &ResolvedRequest) -> Self {
        Context {
            raw_path: request.raw_path.clone(),
            params: request.params.clone(),
            controller: request.controller.clone(),
            action: request.action.clone(),
            data: HashMap::new(),
        }
    }

    /// The original request path.
    #[must_use]
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// All request parameters.
    #[must_use]
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// One request parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }

    /// The textual value of one request parameter.
    #[must_use]
    pub fn param_text(&self, name: &str) -> Option<&str> {
        self.params.text(name)
    }

    /// The controller currently targeted for rendering.
    #[must_use]
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// The action currently targeted for rendering.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// Assign a value for the view layer.
    pub fn assign(&mut self, key: &str, value: impl Into<String>) {
        self.data.insert(key.to_string(), value.into());
    }

    /// Read back a view assignment.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    // Updated by the dispatcher before each action invocation so the
    // view layer always sees where the request actually landed.
    pub(crate) fn set_target(&mut self, controller: &str, action: &str) {
        self.controller = controller.to_string();
        self.action = action.to_string();
    }
}

/// A dispatchable controller.
///
/// Action names arrive already normalized (hyphens stripped, so the
/// URL action `hello-world` asks for `helloworld`). `has_action` and
/// `invoke` must agree: `invoke` is only ever called with a name that
/// `has_action` accepted.
pub trait Controller {
    /// Optional lifecycle hook, run once after construction and before
    /// any action.
    fn init(&mut self, _ctx: &mut Context) {}

    /// Whether this controller exposes the named action.
    fn has_action(&self, action: &str) -> bool;

    /// Run the named action.
    fn invoke(&mut self, action: &str, ctx: &mut Context) -> ActionOutcome;

    /// Terminal render step; produces the response body. Runs at most
    /// once per request.
    fn render(&mut self, ctx: &mut Context) -> String;
}
