//! Routing configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HIGH_IMPACT_REGION, DEFAULT_WET_SEASON_MULTIPLIER};

/// Configuration for corridor weighting and route queries.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoutingConfig {
    /// Multiplier for unpaved high-impact corridors in the wet season. Default: 2.5.
    pub wet_season_multiplier: Option<f64>,
    /// Region whose unpaved corridors take the wet-season multiplier. Default: "Adamawa".
    pub high_impact_region: Option<String>,
    /// Add destination risk to corridor weights. Default: true.
    pub consider_risk: Option<bool>,
    /// Additive multiplier penalty per corridor region.
    #[serde(default)]
    pub regional_penalties: BTreeMap<String, f64>,
}

impl RoutingConfig {
    pub fn effective_wet_season_multiplier(&self) -> f64 {
        self.wet_season_multiplier
            .unwrap_or(DEFAULT_WET_SEASON_MULTIPLIER)
    }

    pub fn effective_high_impact_region(&self) -> &str {
        self.high_impact_region
            .as_deref()
            .unwrap_or(DEFAULT_HIGH_IMPACT_REGION)
    }

    pub fn effective_consider_risk(&self) -> bool {
        self.consider_risk.unwrap_or(true)
    }
}
