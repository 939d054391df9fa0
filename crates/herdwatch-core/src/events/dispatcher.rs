//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::SurveillanceEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// With no handlers registered, `emit` iterates over an empty Vec.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn SurveillanceEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn SurveillanceEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler is logged and does not stop later handlers.
    fn emit<F: Fn(&dyn SurveillanceEventHandler)>(&self, event_name: &'static str, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!(event = event_name, "event handler panicked");
            }
        }
    }

    pub fn emit_alert_raised(&self, event: &AlertRaisedEvent) {
        self.emit("alert_raised", |h| h.on_alert_raised(event));
    }

    pub fn emit_alert_dispatched(&self, event: &AlertDispatchedEvent) {
        self.emit("alert_dispatched", |h| h.on_alert_dispatched(event));
    }

    pub fn emit_location_registered(&self, event: &LocationRegisteredEvent) {
        self.emit("location_registered", |h| h.on_location_registered(event));
    }

    pub fn emit_locations_linked(&self, event: &LocationsLinkedEvent) {
        self.emit("locations_linked", |h| h.on_locations_linked(event));
    }

    pub fn emit_risk_updated(&self, event: &RiskUpdatedEvent) {
        self.emit("risk_updated", |h| h.on_risk_updated(event));
    }
}
