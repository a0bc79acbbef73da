//! # Dispatcher Module
//!
//! Turns a resolved endpoint into an actual invoked controller action
//! and a rendered response.
//!
//! ## State machine
//!
//! - **LoadController**: look the controller name up in the
//!   [`crate::registry::ControllerRegistry`] and construct a fresh
//!   instance. An unregistered name falls back to the `Error`
//!   controller's `notFound` action; failure to resolve `Error` itself
//!   is fatal. On success the `init` lifecycle hook runs once.
//! - **LoadAction**: normalize the action name (hyphens stripped) and
//!   check the controller exposes it. A missing action falls back to
//!   the controller-local `error` action, then to `Error::notFound`;
//!   the `Error` controller failing its own fallback is fatal.
//! - **Forward**: an action may hand control to another action on the
//!   same instance, or to a different controller, on the same request
//!   and URL. Only the terminal `Render` outcome triggers the render
//!   step, so a forwarding controller can never render and exactly one
//!   render occurs per request.
//!
//! All resolution failures are ordinary control flow
//! ([`ResolutionOutcome`] values), recovered locally by fallback
//! transitions; only the two [`DispatchError`] cases escape.

mod core;

pub use self::core::{
    DispatchError, Dispatcher, RenderedPage, ResolutionOutcome, ERROR_CONTROLLER,
    LOCAL_ERROR_ACTION, NOT_FOUND_ACTION,
};
