//! AlertTriage: binary-heap priority queue over pending alerts.

use std::collections::BinaryHeap;

use chrono::Utc;
use herdwatch_core::errors::{SurveillanceError, SurveillanceResult};
use herdwatch_core::types::PriorityLevel;
use tracing::{debug, error};

use super::severity::SeverityTable;
use super::types::{AlertDetails, AlertItem, QueuedAlert};

/// Pending alerts ordered most-urgent first.
///
/// Push and pop are O(log n); peek and the counters are O(1).
#[derive(Debug, Clone, Default)]
pub struct AlertTriage {
    heap: BinaryHeap<QueuedAlert>,
    severity: SeverityTable,
    next_sequence: u64,
    critical_count: usize,
}

impl AlertTriage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_severity(severity: SeverityTable) -> Self {
        Self {
            severity,
            ..Self::default()
        }
    }

    pub fn severity(&self) -> &SeverityTable {
        &self.severity
    }

    pub fn severity_of(&self, disease: &str) -> PriorityLevel {
        self.severity.severity_of(disease)
    }

    /// Create and enqueue an alert, raising its base severity by `escalation`
    /// tiers (floored at P1).
    pub fn push(
        &mut self,
        disease_name: &str,
        location: &str,
        reporter_id: &str,
        escalation: u32,
        details: AlertDetails,
    ) -> AlertItem {
        let base = self.severity.severity_of(disease_name);
        let priority = base.escalate(escalation);

        self.next_sequence += 1;
        let alert = AlertItem {
            sequence: self.next_sequence,
            disease_name: disease_name.to_string(),
            location: location.to_string(),
            reporter_id: reporter_id.to_string(),
            priority,
            escalation_applied: escalation,
            timestamp: Utc::now(),
            details,
        };

        if priority.is_critical() {
            self.critical_count += 1;
        }
        debug!(
            sequence = alert.sequence,
            disease = %alert.disease_name,
            base = %base,
            priority = %priority,
            "alert queued"
        );
        self.heap.push(QueuedAlert(alert.clone()));
        alert
    }

    /// Remove and return the most urgent pending alert.
    pub fn pop_highest_priority(&mut self) -> Option<AlertItem> {
        let QueuedAlert(alert) = self.heap.pop()?;
        if alert.priority.is_critical() {
            self.critical_count = self.critical_count.saturating_sub(1);
        }
        Some(alert)
    }

    pub fn peek(&self) -> Option<&AlertItem> {
        self.heap.peek().map(|queued| &queued.0)
    }

    pub fn pending_count(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending alerts at P1.
    pub fn critical_count(&self) -> usize {
        self.critical_count
    }

    /// Snapshot of all pending alerts in pop order. Does not touch the queue.
    pub fn all_pending_sorted_by_priority(&self) -> Vec<AlertItem> {
        let mut alerts: Vec<AlertItem> = self.heap.iter().map(|q| q.0.clone()).collect();
        alerts.sort_by(AlertItem::triage_order);
        alerts
    }

    /// Pending P1 alerts in pop order.
    pub fn critical_alerts(&self) -> Vec<AlertItem> {
        let mut alerts: Vec<AlertItem> = self
            .heap
            .iter()
            .filter(|q| q.0.priority.is_critical())
            .map(|q| q.0.clone())
            .collect();
        alerts.sort_by(AlertItem::triage_order);
        alerts
    }

    /// Drop every pending alert. The sequence counter keeps counting.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.critical_count = 0;
    }

    /// Recount critical alerts and compare against the maintained counter.
    pub fn check_invariants(&self) -> SurveillanceResult<()> {
        let counted = self
            .heap
            .iter()
            .filter(|q| q.0.priority.is_critical())
            .count();
        if counted != self.critical_count {
            let details = format!(
                "critical counter {} but {} critical alerts pending",
                self.critical_count, counted
            );
            error!(%details, "triage invariant violated");
            return Err(SurveillanceError::invariant(details));
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn corrupt_critical_count_for_test(&mut self, count: usize) {
        self.critical_count = count;
    }
}
