//! Season flag driving corridor weight interpretation.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Dry,
    Wet,
}

impl Season {
    pub fn from_wet_flag(is_wet: bool) -> Self {
        if is_wet {
            Self::Wet
        } else {
            Self::Dry
        }
    }

    pub fn is_wet(self) -> bool {
        self == Self::Wet
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Dry => "Dry",
            Self::Wet => "Wet",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
