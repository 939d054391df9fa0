//! Corridor graph with seasonally and risk-adjusted shortest paths.

pub mod graph;
pub mod path_finding;
pub mod seasonal;
pub mod types;

pub use graph::RoutingGraph;
pub use seasonal::{CorridorWeighting, SeasonalImpact};
pub use types::{Corridor, LocationInfo, Route};
