//! # herdwatch-engine
//!
//! Surveillance engine: seasonal routing over a corridor graph, outbreak
//! clustering with union–find, priority triage of alerts, and the
//! coordinator that threads cluster pressure into triage priority.

pub mod clusters;
pub mod coordinator;
pub mod routing;
pub mod seed;
pub mod triage;

pub use clusters::OutbreakClusterer;
pub use coordinator::SurveillanceCoordinator;
pub use routing::RoutingGraph;
pub use triage::AlertTriage;
