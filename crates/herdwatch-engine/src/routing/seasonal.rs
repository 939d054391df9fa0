//! Seasonal corridor weighting and dry/wet impact comparison.

use herdwatch_core::config::RoutingConfig;
use herdwatch_core::constants::{
    DEFAULT_HIGH_IMPACT_REGION, DEFAULT_WET_SEASON_MULTIPLIER, DRY_SEASON_MULTIPLIER,
};
use herdwatch_core::errors::{SurveillanceError, SurveillanceResult};
use herdwatch_core::types::{FxHashMap, Season};
use serde::{Deserialize, Serialize};

use super::types::{Corridor, Route};

/// Rules that turn a corridor's base distance into a traversal weight.
///
/// `weight = distance × (seasonal multiplier + regional penalty) + destination risk`
///
/// The seasonal multiplier is 1.0 except for unpaved corridors in the
/// high-impact region during the wet season.
#[derive(Debug, Clone)]
pub struct CorridorWeighting {
    wet_multiplier: f64,
    high_impact_region: String,
    regional_penalties: FxHashMap<String, f64>,
}

impl CorridorWeighting {
    /// Rejects a multiplier below 1.0 or a blank region, so wet-season
    /// weights never drop below dry-season ones.
    pub fn new(
        wet_multiplier: f64,
        high_impact_region: impl Into<String>,
    ) -> SurveillanceResult<Self> {
        if !wet_multiplier.is_finite() || wet_multiplier < 1.0 {
            return Err(SurveillanceError::validation(
                "wet_season_multiplier",
                "must be a finite value >= 1.0",
            ));
        }
        let high_impact_region = high_impact_region.into();
        if high_impact_region.trim().is_empty() {
            return Err(SurveillanceError::validation(
                "high_impact_region",
                "must not be blank",
            ));
        }
        Ok(Self {
            wet_multiplier,
            high_impact_region,
            regional_penalties: FxHashMap::default(),
        })
    }

    pub fn from_config(config: &RoutingConfig) -> SurveillanceResult<Self> {
        let mut weighting = Self::new(
            config.effective_wet_season_multiplier(),
            config.effective_high_impact_region(),
        )?;
        for (region, penalty) in &config.regional_penalties {
            weighting = weighting.with_regional_penalty(region.clone(), *penalty)?;
        }
        Ok(weighting)
    }

    /// Additive multiplier penalty for corridors in `region`. Must be finite
    /// and non-negative; edge weights stay non-negative for Dijkstra.
    pub fn with_regional_penalty(
        mut self,
        region: impl Into<String>,
        penalty: f64,
    ) -> SurveillanceResult<Self> {
        let region = region.into();
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(SurveillanceError::validation(
                format!("regional_penalties.{region}"),
                "must be a finite value >= 0.0",
            ));
        }
        self.regional_penalties.insert(region, penalty);
        Ok(self)
    }

    pub fn wet_multiplier(&self) -> f64 {
        self.wet_multiplier
    }

    pub fn high_impact_region(&self) -> &str {
        &self.high_impact_region
    }

    /// Seasonal multiplier for one corridor.
    pub fn seasonal_multiplier(&self, corridor: &Corridor, season: Season) -> f64 {
        if season.is_wet() && !corridor.is_paved && corridor.region == self.high_impact_region {
            self.wet_multiplier
        } else {
            DRY_SEASON_MULTIPLIER
        }
    }

    fn regional_penalty(&self, region: &str) -> f64 {
        self.regional_penalties.get(region).copied().unwrap_or(0.0)
    }

    /// Full traversal weight of a corridor. `destination_risk` is `None`
    /// when the query ignores outbreak risk.
    pub fn edge_weight(
        &self,
        corridor: &Corridor,
        season: Season,
        destination_risk: Option<f64>,
    ) -> f64 {
        let multiplier =
            self.seasonal_multiplier(corridor, season) + self.regional_penalty(&corridor.region);
        corridor.distance * multiplier + destination_risk.unwrap_or(0.0)
    }
}

impl Default for CorridorWeighting {
    fn default() -> Self {
        Self {
            wet_multiplier: DEFAULT_WET_SEASON_MULTIPLIER,
            high_impact_region: DEFAULT_HIGH_IMPACT_REGION.to_string(),
            regional_penalties: FxHashMap::default(),
        }
    }
}

/// Side-by-side dry/wet comparison of the same origin–destination query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalImpact {
    pub dry: Route,
    pub wet: Route,
    pub absolute_increase: f64,
    /// Percentage increase over the dry weight, rounded to two decimals.
    /// Zero when the dry route has zero or infinite weight.
    pub percent_increase: f64,
    pub wet_multiplier: f64,
}

impl SeasonalImpact {
    pub fn compare(dry: Route, wet: Route, wet_multiplier: f64) -> Self {
        let (absolute_increase, percent_increase) =
            if dry.is_reachable() && wet.is_reachable() {
                let increase = wet.total_weight - dry.total_weight;
                let percent = if dry.total_weight > 0.0 {
                    (increase / dry.total_weight * 100.0 * 100.0).round() / 100.0
                } else {
                    0.0
                };
                (increase, percent)
            } else {
                (0.0, 0.0)
            };

        Self {
            dry,
            wet,
            absolute_increase,
            percent_increase,
            wet_multiplier,
        }
    }
}
