//! Unit scoring for placement decisions.
//!
//! A unit is evaluated against one placement request:
//! - **Capacity**: reject full units and units the group would overfill
//! - **Preferences**: add a penalty per violated quiet / no-paws preference,
//!   in both directions (the newcomer's and the current occupants')
//! - **Balance**: among equal penalties, prefer the unit with the most free beds

use bunk_core::{GroupId, PenaltyWeights, UnitId};

/// Current fill of a single unit during a solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitLoad {
    pub unit_id: UnitId,
    pub name: String,
    pub capacity: u32,
    pub used: u32,
    /// Some occupant has a child or baby.
    pub hosts_kids: bool,
    /// Some occupant brought a dog.
    pub hosts_pets: bool,
    /// Some occupant asked for a quiet room.
    pub hosts_quiet: bool,
    /// Some occupant asked for no paws.
    pub hosts_no_paws: bool,
    pub groups: Vec<GroupId>,
}

impl UnitLoad {
    pub fn free(&self) -> u32 {
        self.capacity.saturating_sub(self.used)
    }

    pub fn is_over_capacity(&self) -> bool {
        self.used > self.capacity
    }

    /// Record `req` as an occupant.
    pub fn admit(&mut self, req: &PlacementRequest) {
        self.used += req.occupancy;
        self.hosts_kids |= req.brings_kids;
        self.hosts_pets |= req.brings_pets;
        self.hosts_quiet |= req.prefers_quiet;
        self.hosts_no_paws |= req.prefers_no_paws;
        self.groups.push(req.group_id.clone());
    }
}

/// What the scorer needs to know about one candidate group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRequest {
    pub group_id: GroupId,
    /// Contact name, used in conflict messages.
    pub label: String,
    /// Bed slots needed (babies weigh zero by default).
    pub occupancy: u32,
    /// 100 for confirmed groups, the likelihood for tentative ones.
    pub priority: u8,
    pub confirmed: bool,
    pub submitted_at: u64,
    pub prefers_quiet: bool,
    pub prefers_no_paws: bool,
    pub brings_kids: bool,
    pub brings_pets: bool,
}

/// A preference a placement would break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// Quiet-preferring group joins a room with kids.
    QuietNearKids,
    /// Group with kids joins a room where someone asked for quiet.
    KidsNearQuiet,
    /// No-paws group joins a room with a dog.
    NoPawsNearPets,
    /// Group with a dog joins a room where someone asked for no paws.
    PetsNearNoPaws,
}

impl Violation {
    /// Conflict line for placing `group` in `unit`.
    pub fn describe(self, group: &str, unit: &str) -> String {
        match self {
            Violation::QuietNearKids => {
                format!("{group} placed with kids in {unit} despite quiet preference")
            }
            Violation::KidsNearQuiet => {
                format!("{group} brings kids into {unit} where a guest prefers quiet")
            }
            Violation::NoPawsNearPets => {
                format!("{group} placed with pets in {unit} despite no-paws preference")
            }
            Violation::PetsNearNoPaws => {
                format!("{group} brings a dog into {unit} where a guest prefers no paws")
            }
        }
    }

    fn penalty(self, weights: &PenaltyWeights) -> u32 {
        match self {
            Violation::QuietNearKids | Violation::KidsNearQuiet => weights.quiet,
            Violation::NoPawsNearPets | Violation::PetsNearNoPaws => weights.paws,
        }
    }
}

/// Scored placement result for a single unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitScore {
    /// Position of the unit in the slice handed to [`rank_units`].
    pub index: usize,
    pub unit_id: UnitId,
    /// Total penalty (lower = better).
    pub penalty: u32,
    /// Free beds before placement.
    pub free: u32,
    pub violations: Vec<Violation>,
}

/// Score a single unit for the given request. `None` if the unit is full or
/// the group does not fit.
pub fn score_unit(
    index: usize,
    unit: &UnitLoad,
    req: &PlacementRequest,
    weights: &PenaltyWeights,
) -> Option<UnitScore> {
    // Zero-occupancy groups still need an open unit.
    if unit.free() == 0 || req.occupancy > unit.free() {
        return None;
    }

    let mut violations = Vec::new();
    if req.prefers_quiet && unit.hosts_kids {
        violations.push(Violation::QuietNearKids);
    }
    if req.brings_kids && unit.hosts_quiet {
        violations.push(Violation::KidsNearQuiet);
    }
    if req.prefers_no_paws && unit.hosts_pets {
        violations.push(Violation::NoPawsNearPets);
    }
    if req.brings_pets && unit.hosts_no_paws {
        violations.push(Violation::PetsNearNoPaws);
    }
    let penalty = violations.iter().map(|v| v.penalty(weights)).sum();

    Some(UnitScore {
        index,
        unit_id: unit.unit_id.clone(),
        penalty,
        free: unit.free(),
        violations,
    })
}

/// Score all units and return the feasible ones, best first.
///
/// Order: lowest penalty, then most free beds, then unit id ascending.
pub fn rank_units(
    units: &[UnitLoad],
    req: &PlacementRequest,
    weights: &PenaltyWeights,
) -> Vec<UnitScore> {
    let mut scores: Vec<UnitScore> = units
        .iter()
        .enumerate()
        .filter_map(|(i, u)| score_unit(i, u, req, weights))
        .collect();

    scores.sort_by(|a, b| {
        a.penalty
            .cmp(&b.penalty)
            .then(b.free.cmp(&a.free))
            .then_with(|| a.unit_id.cmp(&b.unit_id))
    });
    scores
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_unit(id: &str, capacity: u32, used: u32) -> UnitLoad {
        UnitLoad {
            unit_id: id.to_string(),
            name: format!("Room {id}"),
            capacity,
            used,
            hosts_kids: false,
            hosts_pets: false,
            hosts_quiet: false,
            hosts_no_paws: false,
            groups: Vec::new(),
        }
    }

    fn default_req(occupancy: u32) -> PlacementRequest {
        PlacementRequest {
            group_id: "g".to_string(),
            label: "Guest".to_string(),
            occupancy,
            priority: 100,
            confirmed: true,
            submitted_at: 0,
            prefers_quiet: false,
            prefers_no_paws: false,
            brings_kids: false,
            brings_pets: false,
        }
    }

    #[test]
    fn rejects_unit_without_room() {
        let unit = make_unit("r1", 3, 2);
        let req = default_req(2);
        assert!(score_unit(0, &unit, &req, &PenaltyWeights::default()).is_none());
    }

    #[test]
    fn exact_fit_is_feasible() {
        let unit = make_unit("r1", 3, 1);
        let score = score_unit(0, &unit, &default_req(2), &PenaltyWeights::default()).unwrap();
        assert_eq!(score.penalty, 0);
        assert_eq!(score.free, 2);
    }

    #[test]
    fn zero_occupancy_skips_full_unit() {
        let full = make_unit("r1", 2, 2);
        assert!(score_unit(0, &full, &default_req(0), &PenaltyWeights::default()).is_none());

        let open = make_unit("r2", 2, 1);
        let score = score_unit(0, &open, &default_req(0), &PenaltyWeights::default()).unwrap();
        assert_eq!(score.free, 1);
    }

    #[test]
    fn quiet_penalty_is_symmetric() {
        let weights = PenaltyWeights::default();

        let mut noisy_room = make_unit("r1", 4, 2);
        noisy_room.hosts_kids = true;
        let mut quiet_req = default_req(1);
        quiet_req.prefers_quiet = true;
        let s = score_unit(0, &noisy_room, &quiet_req, &weights).unwrap();
        assert_eq!(s.violations, vec![Violation::QuietNearKids]);
        assert_eq!(s.penalty, weights.quiet);

        let mut quiet_room = make_unit("r2", 4, 2);
        quiet_room.hosts_quiet = true;
        let mut kids_req = default_req(1);
        kids_req.brings_kids = true;
        let s = score_unit(0, &quiet_room, &kids_req, &weights).unwrap();
        assert_eq!(s.violations, vec![Violation::KidsNearQuiet]);
    }

    #[test]
    fn paws_penalty_is_symmetric() {
        let weights = PenaltyWeights { quiet: 10, paws: 7 };

        let mut dog_room = make_unit("r1", 4, 1);
        dog_room.hosts_pets = true;
        let mut no_paws = default_req(1);
        no_paws.prefers_no_paws = true;
        assert_eq!(score_unit(0, &dog_room, &no_paws, &weights).unwrap().penalty, 7);

        let mut strict_room = make_unit("r2", 4, 1);
        strict_room.hosts_no_paws = true;
        let mut dog_owner = default_req(2);
        dog_owner.brings_pets = true;
        let s = score_unit(0, &strict_room, &dog_owner, &weights).unwrap();
        assert_eq!(s.violations, vec![Violation::PetsNearNoPaws]);
        assert_eq!(s.penalty, 7);
    }

    #[test]
    fn rank_prefers_low_penalty_over_space() {
        let mut roomy_but_loud = make_unit("a", 6, 0);
        roomy_but_loud.hosts_kids = true;
        let snug = make_unit("b", 2, 1);
        let mut req = default_req(1);
        req.prefers_quiet = true;

        let ranked = rank_units(&[roomy_but_loud, snug], &req, &PenaltyWeights::default());
        assert_eq!(ranked[0].unit_id, "b");
        assert_eq!(ranked[1].unit_id, "a");
    }

    #[test]
    fn rank_balances_then_breaks_ties_by_id() {
        let units = vec![
            make_unit("c", 3, 0),
            make_unit("b", 4, 0),
            make_unit("a", 3, 0),
        ];
        let ranked = rank_units(&units, &default_req(1), &PenaltyWeights::default());
        let ids: Vec<_> = ranked.iter().map(|s| s.unit_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(ranked[1].index, 2);
    }

    #[test]
    fn admit_updates_flags() {
        let mut unit = make_unit("r1", 4, 0);
        let mut req = default_req(2);
        req.brings_pets = true;
        req.prefers_quiet = true;
        unit.admit(&req);

        assert_eq!(unit.used, 2);
        assert_eq!(unit.free(), 2);
        assert!(unit.hosts_pets);
        assert!(unit.hosts_quiet);
        assert!(!unit.hosts_kids);
        assert_eq!(unit.groups, vec!["g".to_string()]);
    }
}
