//! Alert payloads held by the triage queue.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use herdwatch_core::types::PriorityLevel;
use serde::{Deserialize, Serialize};

/// Free-form context attached to an alert at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDetails {
    pub mortality_count: Option<u32>,
    pub cluster_root: Option<String>,
}

/// An immutable alert. Only its queue position changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertItem {
    /// Monotonic insertion counter; final tie-break in queue order.
    pub sequence: u64,
    pub disease_name: String,
    pub location: String,
    pub reporter_id: String,
    pub priority: PriorityLevel,
    /// Prior reports of this disease in the same cluster. The tier change it
    /// causes is floored at P1, so this can exceed the tiers actually raised.
    pub escalation_applied: u32,
    pub timestamp: DateTime<Utc>,
    pub details: AlertDetails,
}

impl AlertItem {
    /// Queue order: priority, then timestamp, then insertion sequence.
    pub fn triage_order(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.timestamp.cmp(&other.timestamp))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Heap entry; reversed so `BinaryHeap` pops the most urgent alert first.
#[derive(Debug, Clone)]
pub(crate) struct QueuedAlert(pub(crate) AlertItem);

impl PartialEq for QueuedAlert {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedAlert {}

impl PartialOrd for QueuedAlert {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedAlert {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.triage_order(&self.0)
    }
}
