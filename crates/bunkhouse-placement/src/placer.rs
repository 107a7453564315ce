//! Placement engine: decides who sleeps where.
//!
//! Given the candidate pool and the guest units, the placer:
//! 1. Orders groups confirmed first, then by priority, size, submission time and id
//! 2. Puts each group in the best-ranked unit (using scorer)
//! 3. Waitlists groups that fit nowhere instead of failing the run
//! 4. Records every preference it had to break and any unit left over capacity

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use bunk_core::{
    Assignment, AssignmentSet, CapacityWeights, GuestGroup, PenaltyWeights, RsvpStatus,
    SleepingUnit, ValidationError, ValidationResult,
};

use crate::convert::{group_to_request, unit_to_load};
use crate::reasoning::{PlanTally, summarize};
use crate::scorer::{PlacementRequest, UnitLoad, rank_units};

/// Tunables for a solve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerSettings {
    pub capacity: CapacityWeights,
    pub penalties: PenaltyWeights,
}

/// Output of a solve. Serializes to the `{assignments, conflicts, reasoning}`
/// document the host view consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPlan {
    pub assignments: Vec<Assignment>,
    pub conflicts: Vec<String>,
    pub reasoning: String,
}

impl RoomPlan {
    pub fn assignment_set(&self) -> AssignmentSet {
        AssignmentSet::from_assignments(self.assignments.iter().cloned())
    }
}

/// Reject input the planner cannot work with.
///
/// Checks every group and unit, and that ids are unique on both sides.
pub fn validate_inputs(candidates: &[GuestGroup], units: &[SleepingUnit]) -> ValidationResult<()> {
    let mut group_ids = HashSet::new();
    for group in candidates {
        group.validate()?;
        if !group_ids.insert(group.id.as_str()) {
            return Err(ValidationError::DuplicateGroup(group.id.clone()));
        }
    }
    let mut unit_ids = HashSet::new();
    for unit in units {
        unit.validate()?;
        if !unit_ids.insert(unit.id.as_str()) {
            return Err(ValidationError::DuplicateUnit(unit.id.clone()));
        }
    }
    Ok(())
}

/// Solve with default capacity and penalty weights.
pub fn solve(candidates: &[GuestGroup], units: &[SleepingUnit]) -> ValidationResult<RoomPlan> {
    solve_with(candidates, units, &PlannerSettings::default())
}

/// Compute a room plan for `candidates` across `units`.
///
/// Reserved units are never used, even if passed in. `NO` groups are
/// skipped. A full house is not an error: groups that fit nowhere come back
/// as `waitlisted` conflicts.
pub fn solve_with(
    candidates: &[GuestGroup],
    units: &[SleepingUnit],
    settings: &PlannerSettings,
) -> ValidationResult<RoomPlan> {
    validate_inputs(candidates, units)?;

    let mut loads: Vec<UnitLoad> = units
        .iter()
        .filter(|u| !u.reserved)
        .map(unit_to_load)
        .collect();

    let mut requests: Vec<PlacementRequest> = candidates
        .iter()
        .filter(|g| g.status != RsvpStatus::No)
        .map(|g| group_to_request(g, &settings.capacity))
        .collect();
    requests.sort_by(|a, b| {
        b.confirmed
            .cmp(&a.confirmed)
            .then(b.priority.cmp(&a.priority))
            .then(b.occupancy.cmp(&a.occupancy))
            .then(a.submitted_at.cmp(&b.submitted_at))
            .then_with(|| a.group_id.cmp(&b.group_id))
    });

    let mut assignments = Vec::with_capacity(requests.len());
    let mut conflicts = Vec::new();
    let mut tally = PlanTally {
        candidates: requests.len(),
        ..PlanTally::default()
    };

    for req in &requests {
        let ranked = rank_units(&loads, req, &settings.penalties);
        let Some(best) = ranked.into_iter().next() else {
            warn!(
                group = %req.group_id,
                occupancy = req.occupancy,
                "no unit has room, waitlisting"
            );
            conflicts.push(format!("waitlisted: {}, no space available", req.label));
            tally.waitlisted += 1;
            continue;
        };

        let load = &mut loads[best.index];
        for violation in &best.violations {
            conflicts.push(violation.describe(&req.label, &load.name));
        }
        tally.violations += best.violations.len();
        load.admit(req);

        if req.confirmed {
            tally.confirmed_placed += 1;
        } else {
            tally.likely_placed += 1;
        }
        assignments.push(Assignment {
            group_id: req.group_id.clone(),
            room_id: load.unit_id.clone(),
        });
        debug!(
            group = %req.group_id,
            unit = %load.unit_id,
            penalty = best.penalty,
            free_after = load.free(),
            "placed group"
        );
    }

    // Capacity is checked per placement; this guards the totals.
    for load in &loads {
        if load.is_over_capacity() {
            warn!(unit = %load.unit_id, used = load.used, capacity = load.capacity, "unit over capacity");
            conflicts.push(overflow_notice(&load.name, &load.unit_id, load.used, load.capacity));
        }
    }

    tally.units_used = loads.iter().filter(|l| !l.groups.is_empty()).count();
    let reasoning = summarize(&tally);

    info!(
        placed = assignments.len(),
        waitlisted = tally.waitlisted,
        conflicts = conflicts.len(),
        "room plan computed"
    );

    Ok(RoomPlan {
        assignments,
        conflicts,
        reasoning,
    })
}

pub(crate) fn overflow_notice(name: &str, unit_id: &str, used: u32, capacity: u32) -> String {
    format!("{name} ({unit_id}) is over capacity: {used}/{capacity} beds")
}
