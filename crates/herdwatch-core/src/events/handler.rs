//! SurveillanceEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing coordinator activity.
///
/// Handlers only override the events they care about. `Send + Sync` is
/// required because the coordinator is shared across threads.
pub trait SurveillanceEventHandler: Send + Sync {
    fn on_alert_raised(&self, _event: &AlertRaisedEvent) {}
    fn on_alert_dispatched(&self, _event: &AlertDispatchedEvent) {}
    fn on_location_registered(&self, _event: &LocationRegisteredEvent) {}
    fn on_locations_linked(&self, _event: &LocationsLinkedEvent) {}
    fn on_risk_updated(&self, _event: &RiskUpdatedEvent) {}
}
