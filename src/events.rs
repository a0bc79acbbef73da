//! Lifecycle event notifications.
//!
//! The core emits fire-and-forget, synchronous notifications at four
//! points of a request: request initialised (endpoint resolved),
//! controller initialised, action about to run, and shutdown (about to
//! render). Applications observe them by supplying an [`EventListener`]
//! at bootstrap; the default listener ignores everything.

/// Observer for request lifecycle events.
///
/// All methods have no-op defaults. Listeners run synchronously on the
/// request path, so they should be cheap; a listener failure is an
/// application error, not something the core recovers from.
pub trait EventListener: Send + Sync {
    /// The router has resolved a controller and action for a request.
    fn request_initialised(&self, _controller: &str, _action: &str) {}

    /// A controller instance has been constructed.
    fn controller_initialised(&self, _controller: &str) {}

    /// An action is about to be invoked.
    fn action_starting(&self, _controller: &str, _action: &str) {}

    /// The terminal render step is about to run.
    fn render_starting(&self, _controller: &str, _action: &str) {}
}

/// Listener that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventListener;

impl EventListener for NullEventListener {}
