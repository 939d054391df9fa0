//! Disjoint-set union with path compression and union by rank.

use std::collections::{BTreeMap, BTreeSet};

use herdwatch_core::errors::{SurveillanceError, SurveillanceResult};
use herdwatch_core::types::FxHashMap;
use tracing::{error, info};

use super::types::{ClusterSnapshot, MergeOutcome};

/// Groups locations into epidemiological clusters.
///
/// Find and union run in amortized O(α(n)). Every tracked location belongs
/// to exactly one cluster; an untracked name is an error, never an implicit
/// singleton.
#[derive(Debug, Clone, Default)]
pub struct OutbreakClusterer {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    parent: Vec<usize>,
    rank: Vec<u32>,
    /// Only meaningful at roots.
    size: Vec<usize>,
    cluster_count: usize,
}

impl OutbreakClusterer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an initial list; duplicates are rejected.
    pub fn with_locations<I, S>(locations: I) -> SurveillanceResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut clusterer = Self::new();
        for location in locations {
            clusterer.add_location(location.as_ref())?;
        }
        Ok(clusterer)
    }

    /// Track a new location as its own singleton cluster.
    pub fn add_location(&mut self, name: &str) -> SurveillanceResult<()> {
        if self.index.contains_key(name) {
            return Err(SurveillanceError::AlreadyExists {
                name: name.to_string(),
            });
        }
        let idx = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        self.parent.push(idx);
        self.rank.push(0);
        self.size.push(1);
        self.cluster_count += 1;
        Ok(())
    }

    /// Root of `name`'s cluster, compressing the traversed path.
    pub fn find(&mut self, name: &str) -> SurveillanceResult<String> {
        let idx = self.index_of(name)?;
        let root = self.find_root(idx);
        Ok(self.names[root].clone())
    }

    fn find_root(&mut self, idx: usize) -> usize {
        let mut root = idx;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = idx;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }
        root
    }

    /// Merge the clusters of `a` and `b`. Returns `false` if already joined.
    pub fn union(&mut self, a: &str, b: &str) -> SurveillanceResult<bool> {
        Ok(self.merge(a, b)?.is_some())
    }

    /// Like `union`, but reports which root survived.
    ///
    /// Lower rank goes under higher rank; on a tie `a`'s root is attached
    /// under `b`'s root and `b`'s root gains a rank.
    pub fn merge(&mut self, a: &str, b: &str) -> SurveillanceResult<Option<MergeOutcome>> {
        let idx_a = self.index_of(a)?;
        let idx_b = self.index_of(b)?;
        let root_a = self.find_root(idx_a);
        let root_b = self.find_root(idx_b);

        if root_a == root_b {
            return Ok(None);
        }

        let (survivor, absorbed) = if self.rank[root_a] > self.rank[root_b] {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        if self.rank[root_a] == self.rank[root_b] {
            self.rank[survivor] += 1;
        }

        self.parent[absorbed] = survivor;
        self.size[survivor] = self.size[survivor]
            .checked_add(self.size[absorbed])
            .ok_or_else(|| SurveillanceError::invariant("cluster size overflow"))?;

        self.cluster_count = self.cluster_count.checked_sub(1).ok_or_else(|| {
            error!("cluster count underflow during merge");
            SurveillanceError::invariant("cluster count underflow")
        })?;

        let outcome = MergeOutcome {
            surviving_root: self.names[survivor].clone(),
            absorbed_root: self.names[absorbed].clone(),
            size: self.size[survivor],
        };
        info!(
            survivor = %outcome.surviving_root,
            absorbed = %outcome.absorbed_root,
            size = outcome.size,
            "clusters merged"
        );
        Ok(Some(outcome))
    }

    pub fn connected(&mut self, a: &str, b: &str) -> SurveillanceResult<bool> {
        let idx_a = self.index_of(a)?;
        let idx_b = self.index_of(b)?;
        Ok(self.find_root(idx_a) == self.find_root(idx_b))
    }

    /// Every tracked location sharing `name`'s root. O(n).
    pub fn cluster_of(&mut self, name: &str) -> SurveillanceResult<BTreeSet<String>> {
        let idx = self.index_of(name)?;
        let root = self.find_root(idx);
        let mut members = BTreeSet::new();
        for candidate in 0..self.names.len() {
            if self.find_root(candidate) == root {
                members.insert(self.names[candidate].clone());
            }
        }
        Ok(members)
    }

    /// Maintained size of `name`'s cluster.
    pub fn cluster_size(&mut self, name: &str) -> SurveillanceResult<usize> {
        let idx = self.index_of(name)?;
        let root = self.find_root(idx);
        Ok(self.size[root])
    }

    /// All clusters, ordered by their smallest member name.
    pub fn all_clusters(&mut self) -> Vec<ClusterSnapshot> {
        let mut by_root: BTreeMap<usize, BTreeSet<String>> = BTreeMap::new();
        for idx in 0..self.names.len() {
            let root = self.find_root(idx);
            by_root
                .entry(root)
                .or_default()
                .insert(self.names[idx].clone());
        }

        let mut clusters: Vec<ClusterSnapshot> = by_root
            .into_iter()
            .map(|(root, members)| ClusterSnapshot {
                root: self.names[root].clone(),
                members,
            })
            .collect();
        clusters.sort_by(|a, b| a.members.first().cmp(&b.members.first()));
        clusters
    }

    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Verify the maintained counters against a full recount.
    ///
    /// Size drift or a wrong live-cluster count means the structure is
    /// corrupt; callers cannot detect that from query results alone.
    pub fn check_invariants(&mut self) -> SurveillanceResult<()> {
        let mut counted: FxHashMap<usize, usize> = FxHashMap::default();
        for idx in 0..self.names.len() {
            let root = self.find_root(idx);
            *counted.entry(root).or_insert(0) += 1;
        }

        if counted.len() != self.cluster_count {
            return Err(self.violation(format!(
                "live cluster count {} but {} roots found",
                self.cluster_count,
                counted.len()
            )));
        }
        for (&root, &members) in &counted {
            if self.size[root] != members {
                return Err(self.violation(format!(
                    "cluster rooted at {} records size {} but has {} members",
                    self.names[root], self.size[root], members
                )));
            }
        }
        Ok(())
    }

    fn violation(&self, details: String) -> SurveillanceError {
        error!(%details, "clusterer invariant violated");
        SurveillanceError::invariant(details)
    }

    fn index_of(&self, name: &str) -> SurveillanceResult<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| SurveillanceError::not_found(name))
    }

    #[cfg(test)]
    pub(crate) fn corrupt_size_for_test(&mut self, name: &str, size: usize) {
        let idx = self.index[name];
        let root = self.find_root(idx);
        self.size[root] = size;
    }
}
