//! The set of room assignments shared by the planner and manual overrides.

use serde::{Deserialize, Serialize};

use crate::types::{Assignment, GroupId, UnitId};

/// Where a manual override sends a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomTarget {
    Room(UnitId),
    Unassigned,
}

impl RoomTarget {
    /// Parse a console argument. `none` (or an empty string) clears the assignment.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("none") {
            RoomTarget::Unassigned
        } else {
            RoomTarget::Room(value.to_string())
        }
    }
}

/// Assignments keyed by group. A group appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<Assignment>", from = "Vec<Assignment>")]
pub struct AssignmentSet {
    entries: Vec<Assignment>,
}

impl AssignmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from raw pairs. A later pair for the same group wins.
    pub fn from_assignments(assignments: impl IntoIterator<Item = Assignment>) -> Self {
        let mut set = Self::new();
        for a in assignments {
            set.override_group(&a.group_id, &RoomTarget::Room(a.room_id));
        }
        set
    }

    /// Host override: drop any existing assignment for `group_id`, then place
    /// it in the target room unless the target is `Unassigned`.
    ///
    /// No capacity or preference checks. Returns the room the group left.
    pub fn override_group(&mut self, group_id: &str, target: &RoomTarget) -> Option<UnitId> {
        let previous = self
            .entries
            .iter()
            .position(|a| a.group_id == group_id)
            .map(|idx| self.entries.remove(idx).room_id);
        if let RoomTarget::Room(room_id) = target {
            self.entries.push(Assignment {
                group_id: group_id.to_string(),
                room_id: room_id.clone(),
            });
        }
        previous
    }

    pub fn room_of(&self, group_id: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|a| a.group_id == group_id)
            .map(|a| a.room_id.as_str())
    }

    pub fn groups_in<'a>(&'a self, room_id: &'a str) -> impl Iterator<Item = &'a GroupId> + 'a {
        self.entries
            .iter()
            .filter(move |a| a.room_id == room_id)
            .map(|a| &a.group_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Assignment] {
        &self.entries
    }
}

impl From<Vec<Assignment>> for AssignmentSet {
    fn from(assignments: Vec<Assignment>) -> Self {
        Self::from_assignments(assignments)
    }
}

impl From<AssignmentSet> for Vec<Assignment> {
    fn from(set: AssignmentSet) -> Self {
        set.entries
    }
}
