//! Alert priority tiers. Lower numeric value = more urgent.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Five-tier alert priority, `P1Critical` being the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PriorityLevel {
    P1Critical = 1,
    P2High = 2,
    P3Moderate = 3,
    P4Standard = 4,
    P5Info = 5,
}

impl PriorityLevel {
    /// The most urgent tier; escalation never goes past it.
    pub const MOST_URGENT: PriorityLevel = PriorityLevel::P1Critical;

    /// Tier used for diseases missing from the severity table.
    pub const DEFAULT_UNKNOWN: PriorityLevel = PriorityLevel::P4Standard;

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::P1Critical),
            2 => Some(Self::P2High),
            3 => Some(Self::P3Moderate),
            4 => Some(Self::P4Standard),
            5 => Some(Self::P5Info),
            _ => None,
        }
    }

    /// Raise urgency by `steps` tiers, floored at `P1Critical`.
    pub fn escalate(self, steps: u32) -> Self {
        let raised = u32::from(self.value()).saturating_sub(steps).max(1);
        // raised is within 1..=5 by construction
        Self::from_value(raised as u8).unwrap_or(Self::MOST_URGENT)
    }

    pub fn is_critical(self) -> bool {
        self == Self::P1Critical
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::P1Critical => "P1_CRITICAL",
            Self::P2High => "P2_HIGH",
            Self::P3Moderate => "P3_MODERATE",
            Self::P4Standard => "P4_STANDARD",
            Self::P5Info => "P5_INFO",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
