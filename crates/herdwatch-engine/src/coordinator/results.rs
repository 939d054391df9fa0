//! Typed results returned by the coordinator.

use std::fmt;

use chrono::{DateTime, Utc};
use herdwatch_core::types::{PriorityLevel, Season};
use serde::{Deserialize, Serialize};

use crate::routing::Route;
use crate::triage::AlertItem;

/// What the system does with an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseAction {
    ImmediateResponseRequired,
    UrgentResponseScheduled,
    QueuedForInvestigation,
    DispatchedToFieldTeam,
}

impl ResponseAction {
    /// Classification applied at submission time.
    pub fn for_priority(priority: PriorityLevel) -> Self {
        match priority {
            PriorityLevel::P1Critical => Self::ImmediateResponseRequired,
            PriorityLevel::P2High => Self::UrgentResponseScheduled,
            _ => Self::QueuedForInvestigation,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ImmediateResponseRequired => "IMMEDIATE_RESPONSE_REQUIRED",
            Self::UrgentResponseScheduled => "URGENT_RESPONSE_SCHEDULED",
            Self::QueuedForInvestigation => "QUEUED_FOR_INVESTIGATION",
            Self::DispatchedToFieldTeam => "DISPATCHED_TO_FIELD_TEAM",
        }
    }
}

impl fmt::Display for ResponseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of `submit_report`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertResult {
    pub alert: AlertItem,
    pub priority_level: u8,
    pub priority_name: String,
    pub action_taken: ResponseAction,
    pub escalation_applied: u32,
}

impl AlertResult {
    pub(crate) fn from_alert(alert: AlertItem) -> Self {
        Self {
            priority_level: alert.priority.value(),
            priority_name: alert.priority.name().to_string(),
            action_taken: ResponseAction::for_priority(alert.priority),
            escalation_applied: alert.escalation_applied,
            alert,
        }
    }

    pub fn priority(&self) -> PriorityLevel {
        self.alert.priority
    }
}

/// Result of `next_alert`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchResult {
    pub alert: AlertItem,
    pub action_taken: ResponseAction,
}

/// Result of a route query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub path: Vec<String>,
    /// `f64::INFINITY` when unreachable; `null` on the wire.
    #[serde(with = "crate::routing::types::route_weight")]
    pub total_weight: f64,
    pub season: Season,
    /// Corridors traversed; zero for an unreachable or self route.
    pub num_stops: usize,
    pub reachable: bool,
    pub computed_at: DateTime<Utc>,
}

impl RouteResult {
    pub(crate) fn from_route(route: Route, season: Season) -> Self {
        let reachable = route.is_reachable();
        Self {
            num_stops: route.hops(),
            total_weight: route.total_weight,
            path: route.path,
            season,
            reachable,
            computed_at: Utc::now(),
        }
    }
}

/// One entry of cluster introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterReport {
    /// `CLUSTER-001`, `CLUSTER-002`, … in order of smallest member name.
    /// Stable only while the cluster structure is unchanged.
    pub cluster_id: String,
    pub root: String,
    pub members: Vec<String>,
    pub size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub location_count: usize,
    pub corridor_count: usize,
    pub station_count: usize,
    pub tracked_locations: usize,
    pub cluster_count: usize,
    pub pending_alerts: usize,
    pub critical_alerts: usize,
    pub reports_submitted: u64,
}

/// Component health; `healthy` is false if any invariant check failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub network_loaded: bool,
    pub clusters_ok: bool,
    pub triage_ok: bool,
    pub station_count: usize,
    pub issues: Vec<String>,
    pub checked_at: DateTime<Utc>,
}
