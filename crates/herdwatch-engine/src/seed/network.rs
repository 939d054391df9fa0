//! Seed network: locations, corridors and known epidemiological links.

use std::path::Path;

use herdwatch_core::config::SeedConfig;
use herdwatch_core::constants::{DEFAULT_TRACK_TYPE, UNKNOWN_REGION};
use herdwatch_core::errors::{ConfigError, SurveillanceError, SurveillanceResult};
use herdwatch_core::types::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clusters::OutbreakClusterer;
use crate::routing::RoutingGraph;

const BUILTIN_NETWORK: &str = include_str!("default_network.toml");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedLocation {
    pub name: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default)]
    pub is_station: bool,
    #[serde(default)]
    pub risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedCorridor {
    pub origin: String,
    pub destination: String,
    pub distance: f64,
    #[serde(default)]
    pub is_paved: bool,
    #[serde(default = "default_track_type")]
    pub track_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedLink {
    pub a: String,
    pub b: String,
}

fn default_region() -> String {
    UNKNOWN_REGION.to_string()
}

fn default_track_type() -> String {
    DEFAULT_TRACK_TYPE.to_string()
}

/// What `SeedNetwork::apply` did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub locations: usize,
    pub corridors: usize,
    /// Links that merged two previously separate clusters.
    pub links_merged: usize,
}

/// Static network used to populate the graph and clusterer at startup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedNetwork {
    pub locations: Vec<SeedLocation>,
    pub corridors: Vec<SeedCorridor>,
    pub links: Vec<SeedLink>,
}

impl SeedNetwork {
    /// The built-in regional network.
    pub fn builtin() -> SurveillanceResult<Self> {
        Self::parse_toml(BUILTIN_NETWORK, "<builtin>")
    }

    pub fn from_toml_str(content: &str) -> SurveillanceResult<Self> {
        Self::parse_toml(content, "<string>")
    }

    pub fn from_json_str(content: &str) -> SurveillanceResult<Self> {
        let network: Self = serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        network.validate()?;
        Ok(network)
    }

    /// Load from disk. `.json` files are read as JSON, everything else as TOML.
    pub fn load(path: &Path) -> SurveillanceResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let display = path.display().to_string();

        let network: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: display,
                message: e.to_string(),
            })?
        } else {
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: display,
                message: e.to_string(),
            })?
        };
        network.validate()?;
        Ok(network)
    }

    /// Resolve the seed described by config: built-in network (unless
    /// disabled) extended by the configured file.
    pub fn from_config(config: &SeedConfig) -> SurveillanceResult<Self> {
        let mut network = if config.effective_use_builtin() {
            Self::builtin()?
        } else {
            Self::default()
        };
        if let Some(path) = &config.network_path {
            network.extend(Self::load(path)?);
        }
        Ok(network)
    }

    fn parse_toml(content: &str, origin: &str) -> SurveillanceResult<Self> {
        let network: Self = toml::from_str(content).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        network.validate()?;
        Ok(network)
    }

    pub fn extend(&mut self, other: SeedNetwork) {
        self.locations.extend(other.locations);
        self.corridors.extend(other.corridors);
        self.links.extend(other.links);
    }

    /// Reject blank names, non-positive distances, negative risks, and links
    /// to names the network never declares.
    pub fn validate(&self) -> SurveillanceResult<()> {
        let mut known: FxHashSet<&str> = FxHashSet::default();

        for location in &self.locations {
            require_name("locations.name", &location.name)?;
            require_name("locations.region", &location.region)?;
            if !location.risk.is_finite() || location.risk < 0.0 {
                return Err(SurveillanceError::validation(
                    format!("locations.{}.risk", location.name),
                    "must be finite and non-negative",
                ));
            }
            known.insert(&location.name);
        }

        for corridor in &self.corridors {
            require_name("corridors.origin", &corridor.origin)?;
            require_name("corridors.destination", &corridor.destination)?;
            if !corridor.distance.is_finite() || corridor.distance <= 0.0 {
                return Err(SurveillanceError::validation(
                    format!(
                        "corridors.{}->{}.distance",
                        corridor.origin, corridor.destination
                    ),
                    "must be finite and greater than zero",
                ));
            }
            known.insert(&corridor.origin);
            known.insert(&corridor.destination);
        }

        for link in &self.links {
            for name in [&link.a, &link.b] {
                if !known.contains(name.as_str()) {
                    return Err(SurveillanceError::validation(
                        "links",
                        format!("link references undeclared location {name}"),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Populate the graph, register every graph location in the clusterer,
    /// then apply the links.
    pub fn apply(
        &self,
        graph: &mut RoutingGraph,
        clusterer: &mut OutbreakClusterer,
    ) -> SurveillanceResult<SeedSummary> {
        let mut summary = SeedSummary::default();

        for location in &self.locations {
            if !graph.contains(&location.name) {
                summary.locations += 1;
            }
            graph.add_location(
                &location.name,
                &location.region,
                location.is_station,
                location.risk,
            )?;
        }
        for corridor in &self.corridors {
            graph.add_corridor(
                &corridor.origin,
                &corridor.destination,
                corridor.distance,
                corridor.is_paved,
                &corridor.track_type,
            )?;
            summary.corridors += 1;
        }

        for name in graph.locations() {
            if !clusterer.contains(&name) {
                clusterer.add_location(&name)?;
            }
        }
        for link in &self.links {
            if clusterer.union(&link.a, &link.b)? {
                summary.links_merged += 1;
            }
        }

        info!(
            locations = summary.locations,
            corridors = summary.corridors,
            links_merged = summary.links_merged,
            clusters = clusterer.cluster_count(),
            "seed network applied"
        );
        Ok(summary)
    }
}

fn require_name(field: &str, value: &str) -> SurveillanceResult<()> {
    if value.trim().is_empty() {
        return Err(SurveillanceError::validation(field, "must not be blank"));
    }
    Ok(())
}
