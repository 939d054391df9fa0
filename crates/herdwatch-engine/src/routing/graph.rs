//! RoutingGraph: petgraph DiGraph with name-indexed locations.

use herdwatch_core::constants::UNKNOWN_REGION;
use herdwatch_core::errors::{SurveillanceError, SurveillanceResult};
use herdwatch_core::types::{FxHashMap, Season};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, info};

use super::path_finding;
use super::seasonal::{CorridorWeighting, SeasonalImpact};
use super::types::{Corridor, LocationInfo, Route};

/// Weighted directed graph over named locations.
///
/// Parallel corridors between the same ordered pair are kept side by side;
/// `corridor_between` returns the most recently added one.
#[derive(Debug, Clone, Default)]
pub struct RoutingGraph {
    pub(crate) graph: DiGraph<LocationInfo, Corridor>,
    node_index: FxHashMap<String, NodeIndex>,
    pair_index: FxHashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    pub(crate) weighting: CorridorWeighting,
}

impl RoutingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weighting(weighting: CorridorWeighting) -> Self {
        Self {
            weighting,
            ..Self::default()
        }
    }

    pub fn weighting(&self) -> &CorridorWeighting {
        &self.weighting
    }

    /// Add a location. No-op if the name already exists; metadata is never
    /// overwritten. A negative or non-finite initial risk is rejected.
    pub fn add_location(
        &mut self,
        name: &str,
        region: &str,
        is_station: bool,
        initial_risk: f64,
    ) -> SurveillanceResult<NodeIndex> {
        validate_risk(initial_risk)?;
        Ok(self.ensure_location(name, region, is_station, initial_risk))
    }

    fn ensure_location(
        &mut self,
        name: &str,
        region: &str,
        is_station: bool,
        risk: f64,
    ) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(LocationInfo {
            name: name.to_string(),
            region: region.to_string(),
            is_station,
            risk,
        });
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    /// Append a directed corridor, creating missing endpoints with default
    /// metadata.
    pub fn add_corridor(
        &mut self,
        origin: &str,
        destination: &str,
        distance: f64,
        is_paved: bool,
        track_type: &str,
    ) -> SurveillanceResult<EdgeIndex> {
        if !distance.is_finite() || distance < 0.0 {
            return Err(SurveillanceError::validation(
                "distance",
                format!("must be finite and non-negative, got {distance}"),
            ));
        }

        let from = self.ensure_location(origin, UNKNOWN_REGION, false, 0.0);
        let to = self.ensure_location(destination, UNKNOWN_REGION, false, 0.0);
        let region = self.graph[from].region.clone();

        let edge = self.graph.add_edge(
            from,
            to,
            Corridor {
                origin: origin.to_string(),
                destination: destination.to_string(),
                distance,
                is_paved,
                track_type: track_type.to_string(),
                region,
            },
        );
        self.pair_index.insert((from, to), edge);
        Ok(edge)
    }

    /// Overwrite a location's risk. Returns `Ok(false)` when the location is
    /// unknown (silent no-op).
    pub fn update_risk(&mut self, location: &str, new_risk: f64) -> SurveillanceResult<bool> {
        validate_risk(new_risk)?;
        match self.node_index.get(location) {
            Some(&idx) => {
                self.graph[idx].risk = new_risk;
                info!(location, risk = new_risk, "location risk updated");
                Ok(true)
            }
            None => {
                debug!(location, "risk update ignored for unknown location");
                Ok(false)
            }
        }
    }

    /// Safest route from `start` to `end`.
    ///
    /// Fails with `NotFound` if either endpoint is absent.
    pub fn shortest_safe_route(
        &self,
        start: &str,
        end: &str,
        season: Season,
        consider_risk: bool,
    ) -> SurveillanceResult<Route> {
        let from = self.index_of(start)?;
        let to = self.index_of(end)?;

        let (dist, prev) = path_finding::dijkstra(self, from, to, season, consider_risk);
        let total_weight = dist[to.index()];
        if !total_weight.is_finite() {
            return Ok(Route::unreachable());
        }

        let nodes = path_finding::reconstruct_path(&prev, from, to);
        if nodes.is_empty() {
            return Ok(Route::unreachable());
        }

        Ok(Route {
            path: nodes
                .iter()
                .map(|&idx| self.graph[idx].name.clone())
                .collect(),
            total_weight,
        })
    }

    /// Fastest route: dry season, outbreak risk ignored.
    pub fn fastest_route(&self, start: &str, end: &str) -> SurveillanceResult<Route> {
        self.shortest_safe_route(start, end, Season::Dry, false)
    }

    /// Compare the same query in dry and wet season.
    pub fn seasonal_impact(
        &self,
        start: &str,
        end: &str,
        consider_risk: bool,
    ) -> SurveillanceResult<SeasonalImpact> {
        let dry = self.shortest_safe_route(start, end, Season::Dry, consider_risk)?;
        let wet = self.shortest_safe_route(start, end, Season::Wet, consider_risk)?;
        Ok(SeasonalImpact::compare(dry, wet, self.weighting.wet_multiplier()))
    }

    /// Weight of an explicit path, using the cheapest parallel corridor per hop.
    pub fn path_weight(
        &self,
        path: &[&str],
        season: Season,
        consider_risk: bool,
    ) -> SurveillanceResult<f64> {
        let mut total = 0.0;
        for hop in path.windows(2) {
            let from = self.index_of(hop[0])?;
            let to = self.index_of(hop[1])?;
            let cheapest = self
                .graph
                .edges(from)
                .filter(|e| e.target() == to)
                .map(|e| self.corridor_weight(e.weight(), to, season, consider_risk))
                .min_by(f64::total_cmp)
                .ok_or_else(|| {
                    SurveillanceError::validation(
                        "path",
                        format!("no corridor from {} to {}", hop[0], hop[1]),
                    )
                })?;
            total += cheapest;
        }
        Ok(total)
    }

    pub(crate) fn corridor_weight(
        &self,
        corridor: &Corridor,
        destination: NodeIndex,
        season: Season,
        consider_risk: bool,
    ) -> f64 {
        let risk = consider_risk.then(|| self.graph[destination].risk);
        self.weighting.edge_weight(corridor, season, risk)
    }

    fn index_of(&self, name: &str) -> SurveillanceResult<NodeIndex> {
        self.node_index
            .get(name)
            .copied()
            .ok_or_else(|| SurveillanceError::not_found(name))
    }

    /// Most recently added corridor for the ordered pair.
    pub fn corridor_between(&self, origin: &str, destination: &str) -> Option<&Corridor> {
        let from = *self.node_index.get(origin)?;
        let to = *self.node_index.get(destination)?;
        let edge = *self.pair_index.get(&(from, to))?;
        self.graph.edge_weight(edge)
    }

    pub fn location_info(&self, name: &str) -> Option<&LocationInfo> {
        self.node_index.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn is_station(&self, name: &str) -> bool {
        self.location_info(name).is_some_and(|info| info.is_station)
    }

    /// Location names in insertion order.
    pub fn locations(&self) -> Vec<String> {
        self.graph
            .node_weights()
            .map(|info| info.name.clone())
            .collect()
    }

    /// Designated stations in insertion order.
    pub fn stations(&self) -> Vec<String> {
        self.graph
            .node_weights()
            .filter(|info| info.is_station)
            .map(|info| info.name.clone())
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.node_index.contains_key(name)
    }

    pub fn location_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn corridor_count(&self) -> usize {
        self.graph.edge_count()
    }
}

fn validate_risk(risk: f64) -> SurveillanceResult<()> {
    if !risk.is_finite() || risk < 0.0 {
        return Err(SurveillanceError::validation(
            "risk",
            format!("must be finite and non-negative, got {risk}"),
        ));
    }
    Ok(())
}
