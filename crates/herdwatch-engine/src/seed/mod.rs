//! Startup seed network.

pub mod network;

pub use network::{SeedCorridor, SeedLink, SeedLocation, SeedNetwork, SeedSummary};
