//! Dispatcher hot path: the controller/action resolution state machine.

use crate::controller::{ActionOutcome, Context, Controller};
use crate::events::{EventListener, NullEventListener};
use crate::registry::ControllerRegistry;
use crate::router::ResolvedRequest;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Controller that owns application-wide error handling. Failures
/// resolving any other controller or action fall back to it.
pub const ERROR_CONTROLLER: &str = "Error";

/// Action on the error controller for unresolvable requests.
pub const NOT_FOUND_ACTION: &str = "notFound";

/// Controller-local action tried when a requested action is missing,
/// giving controllers finer-grained 404 handling.
pub const LOCAL_ERROR_ACTION: &str = "error";

// Caps mutual forwards between actions; a cycle would otherwise spin
// forever.
const MAX_FORWARD_HOPS: usize = 32;

/// How the dispatcher's current resolution attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Controller and action both resolved; the action ran.
    Resolved,
    /// No factory registered under the controller name.
    ControllerNotFound,
    /// The controller does not expose the requested action.
    ActionNotFound,
    /// The action ran but reported failure.
    ActionFailed,
}

/// Errors that escape the dispatcher.
///
/// Every routing and dispatch failure is recovered locally by a
/// fallback transition except these: they are the unconditional stops.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// Resolving or running the error controller's own fallback failed.
    /// No further fallback exists.
    #[error("sorry, an error occurred whilst processing your request")]
    Fatal,
    /// Actions forwarded to each other past the hop limit.
    #[error("forward limit exceeded after {0} hops")]
    ForwardLoop(usize),
}

/// The rendered response for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    /// Controller that ultimately rendered.
    pub controller: String,
    /// Action that ultimately rendered.
    pub action: String,
    /// Response body produced by the render step.
    pub body: String,
}

// Owned by one dispatch() call; tracks the currently resolving target.
#[derive(Debug)]
struct DispatchState {
    controller_name: String,
    action_name: String,
    outcome: ResolutionOutcome,
    hops: usize,
}

impl DispatchState {
    fn fall_back_to_error_controller(&mut self) {
        self.controller_name = ERROR_CONTROLLER.to_string();
        self.action_name = NOT_FOUND_ACTION.to_string();
    }
}

/// Resolves a [`ResolvedRequest`] into an invoked controller action and
/// a rendered response.
///
/// Per request the dispatcher walks a state machine with cascading
/// fallback:
///
/// - an unregistered controller falls back to `Error::notFound`,
///   unless the failing controller *is* `Error` (fatal);
/// - a missing action falls back to the controller's local `error`
///   action, then to `Error::notFound`, with the same fatal backstop;
/// - actions may forward to another action or controller on the same
///   request; exactly one render runs regardless of forwards.
pub struct Dispatcher {
    registry: ControllerRegistry,
    listener: Arc<dyn EventListener>,
}

impl Dispatcher {
    /// Build a dispatcher over a populated registry, with no event
    /// listener.
    #[must_use]
    pub fn new(registry: ControllerRegistry) -> Self {
        Self::with_listener(registry, Arc::new(NullEventListener))
    }

    /// Build a dispatcher that notifies the given listener.
    #[must_use]
    pub fn with_listener(registry: ControllerRegistry, listener: Arc<dyn EventListener>) -> Self {
        Dispatcher { registry, listener }
    }

    /// The controller registry this dispatcher resolves against.
    #[must_use]
    pub fn registry(&self) -> &ControllerRegistry {
        &self.registry
    }

    /// Drive one request to its single terminal render.
    ///
    /// Returns the rendered page, or [`DispatchError::Fatal`] when even
    /// the error controller's fallback could not be resolved or run.
    pub fn dispatch(&self, request: &ResolvedRequest) -> Result<RenderedPage, DispatchError> {
        let mut ctx = Context::new(request);
        let mut state = DispatchState {
            controller_name: request.controller.clone(),
            action_name: request.action.clone(),
            outcome: ResolutionOutcome::Resolved,
            hops: 0,
        };

        'load_controller: loop {
            let mut controller = match self.registry.construct(&state.controller_name) {
                Some(controller) => controller,
                None => {
                    state.outcome = ResolutionOutcome::ControllerNotFound;
                    if state.controller_name == ERROR_CONTROLLER {
                        error!(
                            controller = %state.controller_name,
                            "error controller is not registered, no fallback left"
                        );
                        return Err(DispatchError::Fatal);
                    }
                    warn!(
                        controller = %state.controller_name,
                        "controller not registered, falling back to error controller"
                    );
                    state.fall_back_to_error_controller();
                    continue 'load_controller;
                }
            };

            self.listener.controller_initialised(&state.controller_name);
            controller.init(&mut ctx);
            debug!(controller = %state.controller_name, "controller initialised");

            loop {
                // Hyphenated URL actions map onto plain method names,
                // so /index/hello-world runs the helloworld action.
                let action = state.action_name.replace('-', "");

                if !controller.has_action(&action) {
                    state.outcome = ResolutionOutcome::ActionNotFound;
                    if action != LOCAL_ERROR_ACTION {
                        debug!(
                            controller = %state.controller_name,
                            action = %action,
                            "action not found, trying controller-local error action"
                        );
                        state.action_name = LOCAL_ERROR_ACTION.to_string();
                        continue;
                    }
                    if state.controller_name == ERROR_CONTROLLER {
                        error!(
                            controller = %state.controller_name,
                            action = %action,
                            "error controller cannot handle its own fallback"
                        );
                        return Err(DispatchError::Fatal);
                    }
                    warn!(
                        controller = %state.controller_name,
                        "controller has no local error action, falling back to error controller"
                    );
                    state.fall_back_to_error_controller();
                    continue 'load_controller;
                }

                ctx.set_target(&state.controller_name, &action);
                self.listener.action_starting(&state.controller_name, &action);
                info!(
                    controller = %state.controller_name,
                    action = %action,
                    "action invoked"
                );

                match controller.invoke(&action, &mut ctx) {
                    ActionOutcome::Render => {
                        state.outcome = ResolutionOutcome::Resolved;
                        self.listener.render_starting(&state.controller_name, &action);
                        let body = controller.render(&mut ctx);
                        info!(
                            controller = %state.controller_name,
                            action = %action,
                            outcome = ?state.outcome,
                            body_len = body.len(),
                            "request rendered"
                        );
                        return Ok(RenderedPage {
                            controller: state.controller_name,
                            action,
                            body,
                        });
                    }
                    ActionOutcome::Forward {
                        action: next_action,
                        controller: target,
                    } => {
                        state.hops += 1;
                        if state.hops > MAX_FORWARD_HOPS {
                            error!(hops = state.hops, "forward loop detected");
                            return Err(DispatchError::ForwardLoop(state.hops));
                        }
                        debug!(
                            from_controller = %state.controller_name,
                            from_action = %action,
                            to_controller = target.as_deref().unwrap_or(&state.controller_name),
                            to_action = %next_action,
                            "internal forward"
                        );
                        match target {
                            // A different controller needs a fresh
                            // instance; the same name stays on the
                            // current one.
                            Some(next_controller)
                                if next_controller != state.controller_name =>
                            {
                                state.controller_name = next_controller;
                                state.action_name = next_action;
                                continue 'load_controller;
                            }
                            _ => {
                                state.action_name = next_action;
                            }
                        }
                    }
                    ActionOutcome::Failed(message) => {
                        state.outcome = ResolutionOutcome::ActionFailed;
                        warn!(
                            controller = %state.controller_name,
                            action = %action,
                            error = %message,
                            "action failed"
                        );
                        if action != LOCAL_ERROR_ACTION {
                            state.action_name = LOCAL_ERROR_ACTION.to_string();
                            continue;
                        }
                        if state.controller_name == ERROR_CONTROLLER {
                            return Err(DispatchError::Fatal);
                        }
                        state.fall_back_to_error_controller();
                        continue 'load_controller;
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
