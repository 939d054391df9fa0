//! Triage configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Configuration for the alert triage subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TriageConfig {
    /// Extra or replacement severity tiers (disease name → 1..=5),
    /// merged over the built-in table once at startup.
    #[serde(default)]
    pub severity_overrides: BTreeMap<String, u8>,
}
