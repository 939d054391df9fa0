//! Static disease severity lookup.

use herdwatch_core::config::TriageConfig;
use herdwatch_core::constants::{normalize_disease, DISEASE_SEVERITY};
use herdwatch_core::errors::{SurveillanceError, SurveillanceResult};
use herdwatch_core::types::{FxHashMap, PriorityLevel};

/// Disease → base priority. Loaded once at startup, read-only afterwards.
#[derive(Debug, Clone)]
pub struct SeverityTable {
    tiers: FxHashMap<String, PriorityLevel>,
}

impl SeverityTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        let tiers = DISEASE_SEVERITY
            .iter()
            .map(|&(disease, tier)| (disease.to_string(), tier))
            .collect();
        Self { tiers }
    }

    /// Built-in table with configured overrides merged on top.
    pub fn from_config(config: &TriageConfig) -> SurveillanceResult<Self> {
        let mut table = Self::builtin();
        for (disease, &tier) in &config.severity_overrides {
            let level = PriorityLevel::from_value(tier).ok_or_else(|| {
                SurveillanceError::validation(
                    format!("triage.severity_overrides.{disease}"),
                    format!("tier must be between 1 and 5, got {tier}"),
                )
            })?;
            table.set(disease, level)?;
        }
        Ok(table)
    }

    pub fn set(&mut self, disease: &str, level: PriorityLevel) -> SurveillanceResult<()> {
        let key = normalize_disease(disease);
        if key.is_empty() {
            return Err(SurveillanceError::validation(
                "disease_name",
                "must not be blank",
            ));
        }
        self.tiers.insert(key, level);
        Ok(())
    }

    /// Case-insensitive, trimmed lookup. Unknown diseases get
    /// `PriorityLevel::DEFAULT_UNKNOWN`.
    pub fn severity_of(&self, disease: &str) -> PriorityLevel {
        self.tiers
            .get(&normalize_disease(disease))
            .copied()
            .unwrap_or(PriorityLevel::DEFAULT_UNKNOWN)
    }

    pub fn is_known(&self, disease: &str) -> bool {
        self.tiers.contains_key(&normalize_disease(disease))
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl Default for SeverityTable {
    fn default() -> Self {
        Self::builtin()
    }
}
