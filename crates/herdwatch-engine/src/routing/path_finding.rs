//! Dijkstra shortest path with deterministic tie-breaking.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use herdwatch_core::types::collections::SmallVec8;
use herdwatch_core::types::Season;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::graph::RoutingGraph;

/// Single-source shortest paths from `from`, stopping once `to` is finalized.
///
/// Returns the tentative distance and predecessor per node index.
/// Unreached nodes keep `f64::INFINITY` and no predecessor.
pub fn dijkstra(
    graph: &RoutingGraph,
    from: NodeIndex,
    to: NodeIndex,
    season: Season,
    consider_risk: bool,
) -> (Vec<f64>, Vec<Option<NodeIndex>>) {
    let node_count = graph.graph.node_count();
    let mut dist = vec![f64::INFINITY; node_count];
    let mut prev: Vec<Option<NodeIndex>> = vec![None; node_count];
    let mut heap = BinaryHeap::new();
    let mut seq: u64 = 0;

    dist[from.index()] = 0.0;
    heap.push(FrontierState { cost: 0.0, seq, node: from });

    while let Some(FrontierState { cost, node, .. }) = heap.pop() {
        if cost > dist[node.index()] {
            continue;
        }
        if node == to {
            break;
        }

        for edge in graph.graph.edges(node) {
            let next = edge.target();
            let weight = graph.corridor_weight(edge.weight(), next, season, consider_risk);
            let next_cost = cost + weight;

            if next_cost < dist[next.index()] {
                dist[next.index()] = next_cost;
                prev[next.index()] = Some(node);
                seq += 1;
                heap.push(FrontierState { cost: next_cost, seq, node: next });
            }
        }
    }

    (dist, prev)
}

/// Walk the predecessor chain back from `to`.
///
/// Returns an empty path if the chain does not lead back to `from` or loops;
/// a partial path is never returned.
pub fn reconstruct_path(
    prev: &[Option<NodeIndex>],
    from: NodeIndex,
    to: NodeIndex,
) -> SmallVec8<NodeIndex> {
    let mut path = SmallVec8::new();
    path.push(to);
    let mut current = to;
    while let Some(p) = prev[current.index()] {
        if path.len() > prev.len() {
            return SmallVec8::new();
        }
        path.push(p);
        current = p;
    }
    path.reverse();

    if path.first() == Some(&from) {
        path
    } else {
        SmallVec8::new()
    }
}

/// State for Dijkstra's priority queue.
#[derive(Debug, Clone, Copy)]
struct FrontierState {
    cost: f64,
    /// Frontier insertion order; breaks ties on equal cost.
    seq: u64,
    node: NodeIndex,
}

impl PartialEq for FrontierState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierState {}

impl PartialOrd for FrontierState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idx(i: usize) -> NodeIndex {
        NodeIndex::new(i)
    }

    #[test]
    fn reconstruct_follows_chain_to_start() {
        let prev = vec![None, Some(idx(0)), Some(idx(1))];
        let path = reconstruct_path(&prev, idx(0), idx(2));
        assert_eq!(path.as_slice(), &[idx(0), idx(1), idx(2)]);

        let single = reconstruct_path(&prev, idx(0), idx(0));
        assert_eq!(single.as_slice(), &[idx(0)]);
    }

    #[test]
    fn reconstruct_chain_ending_elsewhere_is_empty() {
        // 3 -> 2 -> 1, but the query started at 0
        let prev = vec![None, None, Some(idx(1)), Some(idx(2))];
        assert!(reconstruct_path(&prev, idx(0), idx(3)).is_empty());
    }

    #[test]
    fn reconstruct_cyclic_chain_is_empty() {
        let prev = vec![None, Some(idx(2)), Some(idx(1))];
        assert!(reconstruct_path(&prev, idx(0), idx(1)).is_empty());
    }
}
