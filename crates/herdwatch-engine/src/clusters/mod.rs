//! Outbreak clustering with union–find over location names.

pub mod types;
pub mod union_find;

pub use types::{ClusterSnapshot, MergeOutcome};
pub use union_find::OutbreakClusterer;
