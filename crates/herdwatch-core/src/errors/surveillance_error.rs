//! Errors raised by the routing, clustering, triage, and coordination paths.

use super::error_code::{self, HerdwatchErrorCode};
use super::ConfigError;

/// Errors surfaced by the surveillance core.
///
/// `NotFound` and `AlreadyExists` are recoverable by the caller.
/// `Invariant` signals internal-consistency corruption and must never be
/// swallowed.
#[derive(Debug, thiserror::Error)]
pub enum SurveillanceError {
    #[error("location not found: {name}")]
    NotFound { name: String },

    #[error("location already exists: {name}")]
    AlreadyExists { name: String },

    #[error("index {index} out of range for length {len}")]
    InvalidRange { index: usize, len: usize },

    #[error("validation failed for {field}: {message}")]
    Validation { field: String, message: String },

    #[error("internal invariant violated: {details}")]
    Invariant { details: String },

    #[error("lock poisoned: {0}")]
    Concurrency(String),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SurveillanceError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn invariant(details: impl Into<String>) -> Self {
        Self::Invariant {
            details: details.into(),
        }
    }

    /// True for errors a caller can recover from by registering or renaming.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::AlreadyExists { .. })
    }
}

impl HerdwatchErrorCode for SurveillanceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::NOT_FOUND,
            Self::AlreadyExists { .. } => error_code::ALREADY_EXISTS,
            Self::InvalidRange { .. } => error_code::INVALID_RANGE,
            Self::Validation { .. } => error_code::VALIDATION_ERROR,
            Self::Invariant { .. } => error_code::INVARIANT_VIOLATION,
            Self::Concurrency(_) => error_code::CONCURRENCY_ERROR,
            Self::Config(e) => e.error_code(),
        }
    }
}

/// Convenience alias used across the workspace.
pub type SurveillanceResult<T> = Result<T, SurveillanceError>;
