//! Boundary validation for coordinator input.

use herdwatch_core::errors::{SurveillanceError, SurveillanceResult};
use serde::{Deserialize, Serialize};

/// A field observation as it arrives from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub disease_name: String,
    pub location: String,
    pub reporter_id: String,
    #[serde(default)]
    pub mortality_count: Option<u32>,
}

impl ReportRequest {
    pub fn new(
        disease_name: impl Into<String>,
        location: impl Into<String>,
        reporter_id: impl Into<String>,
    ) -> Self {
        Self {
            disease_name: disease_name.into(),
            location: location.into(),
            reporter_id: reporter_id.into(),
            mortality_count: None,
        }
    }

    pub fn with_mortality(mut self, count: u32) -> Self {
        self.mortality_count = Some(count);
        self
    }

    /// Copy with surrounding whitespace stripped from every text field, so
    /// `"Tibati "` and `"Tibati"` name the same location.
    pub fn trimmed(&self) -> Self {
        Self {
            disease_name: self.disease_name.trim().to_string(),
            location: self.location.trim().to_string(),
            reporter_id: self.reporter_id.trim().to_string(),
            mortality_count: self.mortality_count,
        }
    }

    pub fn validate(&self) -> SurveillanceResult<()> {
        require_non_blank("disease_name", &self.disease_name)?;
        require_non_blank("location", &self.location)?;
        require_non_blank("reporter_id", &self.reporter_id)
    }
}

pub fn require_non_blank(field: &str, value: &str) -> SurveillanceResult<()> {
    if value.trim().is_empty() {
        return Err(SurveillanceError::validation(field, "must not be blank"));
    }
    Ok(())
}
