//! Domain types for the bunkhouse roster.
//!
//! Guest groups, their members, sleeping units and room assignments. All
//! types serialize to flat camelCase JSON documents, the same shape the
//! RSVP form produces, so a stored roster reads back unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationResult};
use crate::weights::CapacityWeights;

/// Unique identifier for a guest group.
pub type GroupId = String;

/// Unique identifier for a sleeping unit.
pub type UnitId = String;

/// Minimum likelihood (percent) at which a `MAYBE` group gets a room.
pub const DEFAULT_LIKELIHOOD_THRESHOLD: u8 = 70;

/// Likelihood recorded for a `MAYBE` submission that did not state one.
pub const DEFAULT_MAYBE_LIKELIHOOD: u8 = 50;

// ── Guests ─────────────────────────────────────────────────────────

/// Attendance answer on an RSVP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RsvpStatus {
    Yes,
    No,
    Maybe,
}

impl RsvpStatus {
    pub fn label(self) -> &'static str {
        match self {
            RsvpStatus::Yes => "YES",
            RsvpStatus::No => "NO",
            RsvpStatus::Maybe => "MAYBE",
        }
    }
}

/// Kind of guest. Drives capacity weighting and preference conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GuestCategory {
    Adult,
    #[serde(rename = "Teen or Tween")]
    TeenTween,
    Child,
    Baby,
    Dog,
}

impl GuestCategory {
    /// Kids and babies bother guests who asked for a quiet room.
    pub fn is_noisy(self) -> bool {
        matches!(self, GuestCategory::Child | GuestCategory::Baby)
    }

    pub fn is_pet(self) -> bool {
        matches!(self, GuestCategory::Dog)
    }

    pub fn label(self) -> &'static str {
        match self {
            GuestCategory::Adult => "Adult",
            GuestCategory::TeenTween => "Teen or Tween",
            GuestCategory::Child => "Child",
            GuestCategory::Baby => "Baby",
            GuestCategory::Dog => "Dog",
        }
    }
}

/// One person (or dog) in a guest group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestMember {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub category: GuestCategory,
}

impl GuestMember {
    /// The member's name, or the category label when left blank.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => self.category.label(),
        }
    }
}

/// A party that travels, RSVPs and sleeps together. Never split across rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestGroup {
    pub id: GroupId,
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    pub status: RsvpStatus,
    /// Percent chance of coming. Only meaningful for `MAYBE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<u8>,
    pub members: Vec<GuestMember>,
    #[serde(default)]
    pub prefers_quiet: bool,
    #[serde(default)]
    pub prefers_no_paws: bool,
    #[serde(default)]
    pub notes: String,
    /// Unix timestamp (milliseconds) of the first submission.
    pub submitted_at: u64,
}

impl GuestGroup {
    /// Likelihood implied by the status: 100 for `YES`, 0 for `NO`.
    pub fn effective_likelihood(&self) -> u8 {
        match self.status {
            RsvpStatus::Yes => 100,
            RsvpStatus::No => 0,
            RsvpStatus::Maybe => self.likelihood.unwrap_or(0).min(100),
        }
    }

    /// Placement priority: confirmed groups weigh 100, tentative ones their likelihood.
    pub fn priority_weight(&self) -> u8 {
        self.effective_likelihood()
    }

    /// Whether the group belongs in the candidate pool at `threshold`.
    pub fn is_candidate(&self, threshold: u8) -> bool {
        match self.status {
            RsvpStatus::Yes => true,
            RsvpStatus::Maybe => self.effective_likelihood() >= threshold,
            RsvpStatus::No => false,
        }
    }

    pub fn head_count(&self) -> usize {
        self.members.len()
    }

    pub fn has_noisy_members(&self) -> bool {
        self.members.iter().any(|m| m.category.is_noisy())
    }

    pub fn has_pets(&self) -> bool {
        self.members.iter().any(|m| m.category.is_pet())
    }

    /// Bed slots this group needs under `weights`.
    pub fn occupancy(&self, weights: &CapacityWeights) -> u32 {
        weights.occupancy(&self.members)
    }

    /// Name used in conflicts and reports.
    pub fn label(&self) -> &str {
        let name = self.contact_name.trim();
        if name.is_empty() { self.id.as_str() } else { name }
    }

    /// Pin the likelihood to what the status implies, the way intake stores it.
    pub fn normalize(&mut self) {
        self.likelihood = Some(match self.status {
            RsvpStatus::Yes => 100,
            RsvpStatus::No => 0,
            RsvpStatus::Maybe => self.likelihood.unwrap_or(DEFAULT_MAYBE_LIKELIHOOD),
        });
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingGroupId(self.contact_name.clone()));
        }
        if self.contact_name.trim().is_empty() {
            return Err(ValidationError::MissingContactName(self.id.clone()));
        }
        if self.members.is_empty() {
            return Err(ValidationError::EmptyGroup(self.id.clone()));
        }
        if let Some(likelihood) = self.likelihood.filter(|l| *l > 100) {
            return Err(ValidationError::LikelihoodOutOfRange {
                group_id: self.id.clone(),
                likelihood,
            });
        }
        Ok(())
    }
}

/// Groups eligible for a room: every `YES`, plus `MAYBE`s at or above `threshold`.
///
/// Returns an owned snapshot so the caller can hand it to the planner while
/// the roster keeps changing.
pub fn candidate_pool(groups: &[GuestGroup], threshold: u8) -> Vec<GuestGroup> {
    groups
        .iter()
        .filter(|g| g.is_candidate(threshold))
        .cloned()
        .collect()
}

// ── House ──────────────────────────────────────────────────────────

/// A room or sleeping area configured by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepingUnit {
    pub id: UnitId,
    pub name: String,
    #[serde(default)]
    pub beds: Vec<String>,
    /// Bed slots. A baby in a travel crib does not take one.
    pub capacity: u32,
    /// Host's own room, never offered to guests.
    #[serde(default, alias = "isHostRoom")]
    pub reserved: bool,
}

impl SleepingUnit {
    pub fn validate(&self) -> ValidationResult<()> {
        if self.capacity == 0 {
            return Err(ValidationError::NonPositiveCapacity(self.id.clone()));
        }
        Ok(())
    }
}

/// A group placed in a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub group_id: GroupId,
    pub room_id: UnitId,
}
