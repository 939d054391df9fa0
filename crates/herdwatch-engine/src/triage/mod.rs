//! Alert triage: severity lookup and a min-priority alert queue.

pub mod queue;
pub mod severity;
pub mod types;

pub use queue::AlertTriage;
pub use severity::SeverityTable;
pub use types::{AlertDetails, AlertItem};
