//! Seed network configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the initial location/corridor network comes from.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SeedConfig {
    /// TOML seed file loaded on top of (or instead of) the built-in network.
    pub network_path: Option<PathBuf>,
    /// Load the built-in regional network. Default: true.
    pub use_builtin: Option<bool>,
}

impl SeedConfig {
    pub fn effective_use_builtin(&self) -> bool {
        self.use_builtin.unwrap_or(true)
    }
}
