//! Shared value types for Herdwatch.

pub mod collections;
pub mod priority;
pub mod season;

pub use collections::{FxHashMap, FxHashSet};
pub use priority::PriorityLevel;
pub use season::Season;
