//! # herdwatch-core
//!
//! Foundation crate for the Herdwatch surveillance engine.
//! Shared types, errors, config, events, tracing, and constants.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;

pub use config::HerdwatchConfig;
pub use errors::{SurveillanceError, SurveillanceResult};
pub use types::{PriorityLevel, Season};
