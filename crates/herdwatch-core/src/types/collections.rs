//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for route predecessor chains (usually <8 hops).
pub type SmallVec8<T> = SmallVec<[T; 8]>;
