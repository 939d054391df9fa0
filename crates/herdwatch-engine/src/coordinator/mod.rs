//! SurveillanceCoordinator: the only component that sees routing,
//! clustering and triage together.

pub mod escalation;
pub mod results;
pub mod service;
pub mod validation;

pub use escalation::EscalationCounter;
pub use results::{
    AlertResult, ClusterReport, DispatchResult, HealthReport, ResponseAction, RouteResult,
    ServiceStats,
};
pub use service::SurveillanceCoordinator;
pub use validation::ReportRequest;
