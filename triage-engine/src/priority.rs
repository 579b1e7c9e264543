//! Priority resolution: score thresholds, then discriminator overrides.

use crate::discriminator::{Tier, TierFlags};
use crate::score::Score;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Score at or above which the base priority is Red
pub const RED_THRESHOLD: u32 = 7;
pub const ORANGE_THRESHOLD: u32 = 5;
pub const YELLOW_THRESHOLD: u32 = 3;

/// Triage priority, ordered Green < Yellow < Orange < Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Green,
    Yellow,
    Orange,
    Red,
}

impl Priority {
    /// Base priority from the early-warning score alone
    pub fn from_score(score: Score) -> Self {
        match score.value() {
            s if s >= RED_THRESHOLD => Priority::Red,
            s if s >= ORANGE_THRESHOLD => Priority::Orange,
            s if s >= YELLOW_THRESHOLD => Priority::Yellow,
            _ => Priority::Green,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Red => write!(f, "RED"),
            Priority::Orange => write!(f, "ORANGE"),
            Priority::Yellow => write!(f, "YELLOW"),
            Priority::Green => write!(f, "GREEN"),
        }
    }
}

/// Base and final priority for one encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub base: Priority,
    pub priority: Priority,
    /// Tier that raised the priority above `base`, if any
    pub raised_by: Option<Tier>,
}

/// Apply discriminator overrides on top of the score-derived priority.
///
/// Overrides only ever raise: Emergency forces Red, VeryUrgent lifts
/// anything below Orange to Orange, Urgent lifts Green to Yellow.
pub fn resolve(score: Score, flags: &TierFlags) -> Resolution {
    let base = Priority::from_score(score);

    let raised_by = flags
        .triggered()
        .into_iter()
        .find(|tier| tier.minimum_priority() > base);

    let priority = raised_by.map_or(base, |tier| tier.minimum_priority().max(base));

    Resolution { base, priority, raised_by }
}
