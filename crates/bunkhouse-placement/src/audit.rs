//! Re-checks an assignment set that may contain manual overrides.
//!
//! Overrides skip every check the solver makes, so the host view runs this
//! before showing the board.

use bunk_core::{AssignmentSet, CapacityWeights, GuestGroup, RoomBoard, SleepingUnit};

use crate::placer::overflow_notice;

/// Conflicts in `assignments` for the current candidate pool.
///
/// Reports units over capacity, groups sitting in a reserved unit and
/// groups assigned to a unit the house does not have.
pub fn audit(
    candidates: &[GuestGroup],
    units: &[SleepingUnit],
    assignments: &AssignmentSet,
    weights: &CapacityWeights,
) -> Vec<String> {
    let board = RoomBoard::build(candidates, units, assignments, weights);
    let mut conflicts = Vec::new();

    for room in &board.rooms {
        if room.reserved {
            for gid in &room.groups {
                conflicts.push(format!(
                    "{} is assigned to reserved unit {}",
                    label_of(candidates, gid),
                    room.name
                ));
            }
        }
        if room.over_capacity {
            conflicts.push(overflow_notice(&room.name, &room.unit_id, room.used, room.capacity));
        }
    }

    for group in candidates {
        if let Some(room_id) = assignments.room_of(&group.id) {
            if !units.iter().any(|u| u.id == room_id) {
                conflicts.push(format!("{} is assigned to unknown unit {room_id}", group.label()));
            }
        }
    }
    conflicts
}

fn label_of<'a>(candidates: &'a [GuestGroup], group_id: &'a str) -> &'a str {
    candidates
        .iter()
        .find(|g| g.id == group_id)
        .map_or(group_id, |g| g.label())
}
