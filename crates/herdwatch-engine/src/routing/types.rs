//! Routing types: locations, corridors, computed routes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Metadata for a location vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub name: String,
    /// Administrative region label.
    pub region: String,
    /// Designated station with enhanced reporting infrastructure.
    pub is_station: bool,
    /// Non-negative outbreak risk, added to the weight of corridors entering here.
    pub risk: f64,
}

/// A directed corridor between two locations. Immutable once added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub origin: String,
    pub destination: String,
    /// Base distance, non-negative.
    pub distance: f64,
    pub is_paved: bool,
    pub track_type: String,
    /// Region of the origin when the corridor was added.
    pub region: String,
}

/// Result of a shortest-route query.
///
/// An unreachable destination yields an empty path and an infinite weight,
/// which is distinct from the `[start]` / `0.0` route of a self-query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub path: Vec<String>,
    #[serde(with = "route_weight")]
    pub total_weight: f64,
}

impl Route {
    pub fn unreachable() -> Self {
        Self {
            path: Vec::new(),
            total_weight: f64::INFINITY,
        }
    }

    pub fn is_reachable(&self) -> bool {
        !self.path.is_empty() && self.total_weight.is_finite()
    }

    /// Number of corridors traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Serde adapter for route weights. JSON has no infinity, so an unreachable
/// weight is written as `null` and read back as `f64::INFINITY`.
pub mod route_weight {
    use super::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(weight: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if weight.is_finite() {
            serializer.serialize_some(weight)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
