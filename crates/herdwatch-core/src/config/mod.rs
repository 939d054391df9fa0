//! Configuration system for Herdwatch.
//! TOML-based, 4-layer resolution: CLI > env > project > user > defaults.

pub mod herdwatch_config;
pub mod routing_config;
pub mod seed_config;
pub mod triage_config;

pub use herdwatch_config::{CliOverrides, HerdwatchConfig};
pub use routing_config::RoutingConfig;
pub use seed_config::SeedConfig;
pub use triage_config::TriageConfig;
