//! Error handling for Herdwatch.
//! One error enum per concern, `thiserror` only.

pub mod config_error;
pub mod error_code;
pub mod surveillance_error;

pub use config_error::ConfigError;
pub use error_code::HerdwatchErrorCode;
pub use surveillance_error::{SurveillanceError, SurveillanceResult};
