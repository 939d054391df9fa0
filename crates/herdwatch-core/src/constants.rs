//! Static tables and defaults shared across Herdwatch.

use crate::types::PriorityLevel;

/// Seasonal multiplier applied to unpaved high-impact corridors in the wet season.
pub const DEFAULT_WET_SEASON_MULTIPLIER: f64 = 2.5;

/// Multiplier for every corridor outside the wet-season rule.
pub const DRY_SEASON_MULTIPLIER: f64 = 1.0;

/// Region whose unpaved tracks degrade in the wet season.
pub const DEFAULT_HIGH_IMPACT_REGION: &str = "Adamawa";

/// Region assigned to locations auto-created by a corridor insert.
pub const UNKNOWN_REGION: &str = "Unknown";

/// Track type assigned when the caller does not supply one.
pub const DEFAULT_TRACK_TYPE: &str = "unpaved";

/// Prefix for cluster identifiers in introspection reports.
pub const CLUSTER_ID_PREFIX: &str = "CLUSTER";

/// Built-in disease severity table. Keys are lowercase and trimmed.
pub const DISEASE_SEVERITY: &[(&str, PriorityLevel)] = &[
    ("anthrax", PriorityLevel::P1Critical),
    ("highly pathogenic avian influenza", PriorityLevel::P1Critical),
    ("ebola", PriorityLevel::P1Critical),
    ("peste des petits ruminants", PriorityLevel::P2High),
    ("foot and mouth disease", PriorityLevel::P2High),
    ("rabies", PriorityLevel::P2High),
    ("contagious bovine pleuropneumonia", PriorityLevel::P3Moderate),
    ("newcastle disease", PriorityLevel::P3Moderate),
    ("sheep pox", PriorityLevel::P4Standard),
    ("helminthosis", PriorityLevel::P5Info),
];

/// Normalize a disease name for table lookups and escalation keys.
pub fn normalize_disease(name: &str) -> String {
    name.trim().to_lowercase()
}
