//! Top-level Herdwatch configuration with 4-layer resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{RoutingConfig, SeedConfig, TriageConfig};
use crate::errors::ConfigError;

/// Project-level config file name, looked up in the root passed to `load`.
pub const PROJECT_CONFIG_FILE: &str = "herdwatch.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`HERDWATCH_*`)
/// 3. Project config (`herdwatch.toml` in project root)
/// 4. User config (`~/.herdwatch/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HerdwatchConfig {
    pub routing: RoutingConfig,
    pub triage: TriageConfig,
    pub seed: SeedConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub wet_season_multiplier: Option<f64>,
    pub high_impact_region: Option<String>,
    pub consider_risk: Option<bool>,
    pub seed_path: Option<PathBuf>,
}

impl HerdwatchConfig {
    /// Load configuration with 4-layer resolution.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        // Unreadable user config is not fatal.
                        ::tracing::warn!(error = %e, "skipping user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &HerdwatchConfig) -> Result<(), ConfigError> {
        if let Some(multiplier) = config.routing.wet_season_multiplier {
            if !multiplier.is_finite() || multiplier < 1.0 {
                return Err(ConfigError::ValidationFailed {
                    field: "routing.wet_season_multiplier".to_string(),
                    message: "must be a finite value >= 1.0".to_string(),
                });
            }
        }
        if let Some(ref region) = config.routing.high_impact_region {
            if region.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "routing.high_impact_region".to_string(),
                    message: "must not be blank".to_string(),
                });
            }
        }
        for (region, penalty) in &config.routing.regional_penalties {
            if !penalty.is_finite() || *penalty < 0.0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("routing.regional_penalties.{region}"),
                    message: "must be a finite value >= 0.0".to_string(),
                });
            }
        }
        for (disease, tier) in &config.triage.severity_overrides {
            if disease.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: "triage.severity_overrides".to_string(),
                    message: "disease name must not be blank".to_string(),
                });
            }
            if !(1..=5).contains(tier) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("triage.severity_overrides.{disease}"),
                    message: "must be between 1 and 5".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.herdwatch/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".herdwatch").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut HerdwatchConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: HerdwatchConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut HerdwatchConfig, other: &HerdwatchConfig) {
        // Routing
        if other.routing.wet_season_multiplier.is_some() {
            base.routing.wet_season_multiplier = other.routing.wet_season_multiplier;
        }
        if other.routing.high_impact_region.is_some() {
            base.routing.high_impact_region = other.routing.high_impact_region.clone();
        }
        if other.routing.consider_risk.is_some() {
            base.routing.consider_risk = other.routing.consider_risk;
        }
        for (region, penalty) in &other.routing.regional_penalties {
            base.routing
                .regional_penalties
                .insert(region.clone(), *penalty);
        }

        // Triage
        for (disease, tier) in &other.triage.severity_overrides {
            base.triage
                .severity_overrides
                .insert(disease.clone(), *tier);
        }

        // Seed
        if other.seed.network_path.is_some() {
            base.seed.network_path = other.seed.network_path.clone();
        }
        if other.seed.use_builtin.is_some() {
            base.seed.use_builtin = other.seed.use_builtin;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(config: &mut HerdwatchConfig) {
        if let Ok(val) = std::env::var("HERDWATCH_WET_SEASON_MULTIPLIER") {
            if let Ok(v) = val.parse::<f64>() {
                config.routing.wet_season_multiplier = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HERDWATCH_HIGH_IMPACT_REGION") {
            config.routing.high_impact_region = Some(val);
        }
        if let Ok(val) = std::env::var("HERDWATCH_CONSIDER_RISK") {
            if let Ok(v) = val.parse::<bool>() {
                config.routing.consider_risk = Some(v);
            }
        }
        if let Ok(val) = std::env::var("HERDWATCH_SEED_PATH") {
            config.seed.network_path = Some(PathBuf::from(val));
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut HerdwatchConfig, cli: &CliOverrides) {
        if let Some(v) = cli.wet_season_multiplier {
            config.routing.wet_season_multiplier = Some(v);
        }
        if let Some(ref v) = cli.high_impact_region {
            config.routing.high_impact_region = Some(v.clone());
        }
        if let Some(v) = cli.consider_risk {
            config.routing.consider_risk = Some(v);
        }
        if let Some(ref v) = cli.seed_path {
            config.seed.network_path = Some(v.clone());
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
