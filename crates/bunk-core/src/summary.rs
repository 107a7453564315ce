//! Host-side aggregates: headcounts, the maybe queue and the room board.

use serde::Serialize;

use crate::assignments::AssignmentSet;
use crate::types::{GroupId, GuestCategory, GuestGroup, RsvpStatus, SleepingUnit, UnitId};
use crate::weights::CapacityWeights;

/// Confirmed guests per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryBreakdown {
    pub adults: usize,
    pub teens: usize,
    pub kids: usize,
    pub babies: usize,
    pub dogs: usize,
}

impl CategoryBreakdown {
    fn add(&mut self, category: GuestCategory) {
        match category {
            GuestCategory::Adult => self.adults += 1,
            GuestCategory::TeenTween => self.teens += 1,
            GuestCategory::Child => self.kids += 1,
            GuestCategory::Baby => self.babies += 1,
            GuestCategory::Dog => self.dogs += 1,
        }
    }
}

/// Roster-wide counts shown on the host dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadcountSummary {
    pub confirmed_groups: usize,
    pub maybe_groups: usize,
    pub declined_groups: usize,
    /// Members of `YES` groups.
    pub confirmed_guests: usize,
    /// Members weighted by each group's likelihood.
    pub expected_headcount: f64,
    pub breakdown: CategoryBreakdown,
    /// Bed slots across units open to guests.
    pub guest_capacity: u32,
    /// Confirmed guests as a share of guest capacity, capped at 100.
    pub occupancy_percent: u32,
}

impl HeadcountSummary {
    pub fn compute(groups: &[GuestGroup], units: &[SleepingUnit]) -> Self {
        let mut summary = HeadcountSummary {
            confirmed_groups: 0,
            maybe_groups: 0,
            declined_groups: 0,
            confirmed_guests: 0,
            expected_headcount: 0.0,
            breakdown: CategoryBreakdown::default(),
            guest_capacity: units.iter().filter(|u| !u.reserved).map(|u| u.capacity).sum(),
            occupancy_percent: 0,
        };

        for group in groups {
            match group.status {
                RsvpStatus::Yes => {
                    summary.confirmed_groups += 1;
                    summary.confirmed_guests += group.head_count();
                    for member in &group.members {
                        summary.breakdown.add(member.category);
                    }
                }
                RsvpStatus::Maybe => summary.maybe_groups += 1,
                RsvpStatus::No => summary.declined_groups += 1,
            }
            summary.expected_headcount +=
                group.head_count() as f64 * f64::from(group.effective_likelihood()) / 100.0;
        }

        if summary.guest_capacity > 0 {
            let percent =
                (summary.confirmed_guests as f64 / f64::from(summary.guest_capacity) * 100.0).round();
            summary.occupancy_percent = percent.min(100.0) as u32;
        }
        summary
    }
}

/// A tentative group waiting to decide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaybeEntry {
    pub group_id: GroupId,
    pub contact_name: String,
    pub likelihood: u8,
    pub head_count: usize,
    pub submitted_at: u64,
    /// Likely enough to be given a room.
    pub roomed: bool,
}

/// `MAYBE` groups, most likely first.
pub fn maybe_queue(groups: &[GuestGroup], threshold: u8) -> Vec<MaybeEntry> {
    let mut queue: Vec<MaybeEntry> = groups
        .iter()
        .filter(|g| g.status == RsvpStatus::Maybe)
        .map(|g| MaybeEntry {
            group_id: g.id.clone(),
            contact_name: g.contact_name.clone(),
            likelihood: g.effective_likelihood(),
            head_count: g.head_count(),
            submitted_at: g.submitted_at,
            roomed: g.is_candidate(threshold),
        })
        .collect();
    queue.sort_by(|a, b| {
        b.likelihood
            .cmp(&a.likelihood)
            .then(a.submitted_at.cmp(&b.submitted_at))
            .then_with(|| a.group_id.cmp(&b.group_id))
    });
    queue
}

/// Occupancy of a single unit under the current assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomOccupancy {
    pub unit_id: UnitId,
    pub name: String,
    pub capacity: u32,
    pub reserved: bool,
    pub used: u32,
    pub groups: Vec<GroupId>,
    pub over_capacity: bool,
}

/// Every unit with its occupants, plus candidates still without a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomBoard {
    pub rooms: Vec<RoomOccupancy>,
    pub unassigned: Vec<GroupId>,
}

impl RoomBoard {
    /// Lay `assignments` over `units`.
    ///
    /// Only groups in `candidates` count toward occupancy; assignments for
    /// groups that dropped out of the pool or point at unknown units are
    /// left off the board.
    pub fn build(
        candidates: &[GuestGroup],
        units: &[SleepingUnit],
        assignments: &AssignmentSet,
        weights: &CapacityWeights,
    ) -> Self {
        let rooms = units
            .iter()
            .map(|unit| {
                let occupants: Vec<&GuestGroup> = assignments
                    .groups_in(&unit.id)
                    .filter_map(|gid| candidates.iter().find(|g| &g.id == gid))
                    .collect();
                let used: u32 = occupants.iter().map(|g| g.occupancy(weights)).sum();
                RoomOccupancy {
                    unit_id: unit.id.clone(),
                    name: unit.name.clone(),
                    capacity: unit.capacity,
                    reserved: unit.reserved,
                    used,
                    groups: occupants.iter().map(|g| g.id.clone()).collect(),
                    over_capacity: used > unit.capacity,
                }
            })
            .collect();

        let unassigned = candidates
            .iter()
            .filter(|g| match assignments.room_of(&g.id) {
                Some(room) => !units.iter().any(|u| u.id == room),
                None => true,
            })
            .map(|g| g.id.clone())
            .collect();

        RoomBoard { rooms, unassigned }
    }

    pub fn room(&self, unit_id: &str) -> Option<&RoomOccupancy> {
        self.rooms.iter().find(|r| r.unit_id == unit_id)
    }
}
