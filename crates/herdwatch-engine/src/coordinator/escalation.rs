//! Prior-report counter keyed by (disease, cluster root).

use herdwatch_core::constants::normalize_disease;
use herdwatch_core::types::FxHashMap;

/// Counts reports per (normalized disease, cluster root).
///
/// Not synchronized on its own: the coordinator mutates it only while
/// holding the same lock as the clusterer and triage queue.
#[derive(Debug, Clone, Default)]
pub struct EscalationCounter {
    counts: FxHashMap<(String, String), u32>,
}

impl EscalationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of prior reports for the pair, then count this one.
    pub fn record(&mut self, disease: &str, cluster_root: &str) -> u32 {
        let count = self
            .counts
            .entry((normalize_disease(disease), cluster_root.to_string()))
            .or_insert(0);
        let prior = *count;
        *count = count.saturating_add(1);
        prior
    }

    pub fn prior_reports(&self, disease: &str, cluster_root: &str) -> u32 {
        self.counts
            .get(&(normalize_disease(disease), cluster_root.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Move every count keyed by `absorbed_root` onto `surviving_root`.
    /// Called after a union so history follows the merged cluster.
    pub fn fold_cluster(&mut self, absorbed_root: &str, surviving_root: &str) {
        let moved: Vec<(String, u32)> = self
            .counts
            .iter()
            .filter(|((_, root), _)| root == absorbed_root)
            .map(|((disease, _), &count)| (disease.clone(), count))
            .collect();

        for (disease, count) in moved {
            self.counts.remove(&(disease.clone(), absorbed_root.to_string()));
            let entry = self
                .counts
                .entry((disease, surviving_root.to_string()))
                .or_insert(0);
            *entry = entry.saturating_add(count);
        }
    }

    /// Sum over every key.
    pub fn total_reports(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Number of distinct (disease, cluster) pairs seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
