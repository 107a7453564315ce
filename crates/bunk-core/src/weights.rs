//! Capacity and penalty weights.
//!
//! Both are plain data read from the `[capacity]` and `[penalties]` tables
//! of `house.toml`. Missing keys fall back to the defaults below.

use serde::{Deserialize, Serialize};

use crate::types::{GuestCategory, GuestMember};

/// Bed slots consumed by one member of each category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityWeights {
    pub adult: u32,
    pub teen_tween: u32,
    pub child: u32,
    /// A baby sleeps in a travel crib and takes no bed.
    pub baby: u32,
    /// Dogs are assumed to need a spot of their own.
    pub dog: u32,
}

impl Default for CapacityWeights {
    fn default() -> Self {
        Self {
            adult: 1,
            teen_tween: 1,
            child: 1,
            baby: 0,
            dog: 1,
        }
    }
}

impl CapacityWeights {
    pub fn weight(&self, category: GuestCategory) -> u32 {
        match category {
            GuestCategory::Adult => self.adult,
            GuestCategory::TeenTween => self.teen_tween,
            GuestCategory::Child => self.child,
            GuestCategory::Baby => self.baby,
            GuestCategory::Dog => self.dog,
        }
    }

    /// Total bed slots a list of members occupies.
    pub fn occupancy(&self, members: &[GuestMember]) -> u32 {
        members.iter().map(|m| self.weight(m.category)).sum()
    }
}

/// Penalty added to a unit for each preference a placement would violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenaltyWeights {
    /// Quiet-preferring guests sharing with kids or babies.
    pub quiet: u32,
    /// No-paws guests sharing with a dog.
    pub paws: u32,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self { quiet: 10, paws: 10 }
    }
}
