//! HerdwatchErrorCode trait for presentation-layer conversion.

/// Trait for mapping Herdwatch errors to stable error code strings.
/// Every error enum implements this so the presentation layer can branch
/// on a code instead of parsing messages.
pub trait HerdwatchErrorCode {
    /// Returns the error code string (e.g., "NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const ALREADY_EXISTS: &str = "ALREADY_EXISTS";
pub const INVALID_RANGE: &str = "INVALID_RANGE";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const INVARIANT_VIOLATION: &str = "INVARIANT_VIOLATION";
pub const CONCURRENCY_ERROR: &str = "CONCURRENCY_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
