//! Event payload types emitted by the surveillance coordinator.

use chrono::{DateTime, Utc};

use crate::types::PriorityLevel;

/// Payload for `on_alert_raised`. Downstream persistence subscribes here.
#[derive(Debug, Clone)]
pub struct AlertRaisedEvent {
    pub sequence: u64,
    pub disease_name: String,
    pub location: String,
    pub reporter_id: String,
    pub priority: PriorityLevel,
    pub escalation_applied: u32,
    pub cluster_root: String,
    pub mortality_count: Option<u32>,
    pub raised_at: DateTime<Utc>,
}

/// Payload for `on_alert_dispatched`.
#[derive(Debug, Clone)]
pub struct AlertDispatchedEvent {
    pub sequence: u64,
    pub disease_name: String,
    pub location: String,
    pub priority: PriorityLevel,
}

/// Payload for `on_location_registered`.
#[derive(Debug, Clone)]
pub struct LocationRegisteredEvent {
    pub location: String,
}

/// Payload for `on_locations_linked`.
#[derive(Debug, Clone)]
pub struct LocationsLinkedEvent {
    pub location_a: String,
    pub location_b: String,
    pub surviving_root: String,
    pub cluster_size: usize,
}

/// Payload for `on_risk_updated`.
#[derive(Debug, Clone)]
pub struct RiskUpdatedEvent {
    pub location: String,
    pub risk: f64,
}
