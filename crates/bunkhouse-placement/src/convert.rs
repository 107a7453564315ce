//! Type conversions between roster types and placement types.
//!
//! Bridges `bunk_core::{GuestGroup, SleepingUnit}` to the planner's
//! [`PlacementRequest`] and [`UnitLoad`].

use bunk_core::{CapacityWeights, GuestGroup, RsvpStatus, SleepingUnit};

use crate::scorer::{PlacementRequest, UnitLoad};

/// Convert a [`GuestGroup`] to a [`PlacementRequest`].
pub fn group_to_request(group: &GuestGroup, weights: &CapacityWeights) -> PlacementRequest {
    PlacementRequest {
        group_id: group.id.clone(),
        label: group.label().to_string(),
        occupancy: group.occupancy(weights),
        priority: group.priority_weight(),
        confirmed: group.status == RsvpStatus::Yes,
        submitted_at: group.submitted_at,
        prefers_quiet: group.prefers_quiet,
        prefers_no_paws: group.prefers_no_paws,
        brings_kids: group.has_noisy_members(),
        brings_pets: group.has_pets(),
    }
}

/// Convert a [`SleepingUnit`] to an empty [`UnitLoad`].
pub fn unit_to_load(unit: &SleepingUnit) -> UnitLoad {
    UnitLoad {
        unit_id: unit.id.clone(),
        name: unit.name.clone(),
        capacity: unit.capacity,
        used: 0,
        hosts_kids: false,
        hosts_pets: false,
        hosts_quiet: false,
        hosts_no_paws: false,
        groups: Vec::new(),
    }
}
