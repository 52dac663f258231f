//! Lifecycle phase definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Phases a component moves through, each with an optional hook
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Prepare the component for use (open connections, allocate resources)
    Start,
    /// Activate the component (warm-up work a light boot may skip)
    Activate,
    /// Release the component
    Stop,
}

impl Phase {
    /// All phases in canonical order
    pub const ALL: [Phase; 3] = [Phase::Start, Phase::Activate, Phase::Stop];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Activate => "activate",
            Self::Stop => "stop",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::Activate => 1,
            Self::Stop => 2,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
