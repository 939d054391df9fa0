//! Cluster snapshot and merge result types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One cluster as seen at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Current representative. Changes as unions occur.
    pub root: String,
    pub members: BTreeSet<String>,
}

impl ClusterSnapshot {
    pub fn size(&self) -> usize {
        self.members.len()
    }
}

/// Outcome of a union that actually merged two clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub surviving_root: String,
    pub absorbed_root: String,
    /// Size of the merged cluster.
    pub size: usize,
}
