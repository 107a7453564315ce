//! Digest of solver inputs.
//!
//! The host console stores the fingerprint next to the last plan and skips
//! re-solving while it is unchanged, so repeated triggers leave manual
//! overrides alone.

use serde::Serialize;
use sha2::{Digest, Sha256};

use bunk_core::{GuestGroup, SleepingUnit};

use crate::placer::PlannerSettings;

#[derive(Serialize)]
struct FingerprintInput<'a> {
    candidates: Vec<&'a GuestGroup>,
    units: Vec<&'a SleepingUnit>,
    settings: &'a PlannerSettings,
}

/// SHA-256 (hex) over the id-sorted JSON encoding of the inputs.
///
/// Input order does not affect the result, matching the solver.
pub fn fingerprint(
    candidates: &[GuestGroup],
    units: &[SleepingUnit],
    settings: &PlannerSettings,
) -> serde_json::Result<String> {
    let mut candidates: Vec<&GuestGroup> = candidates.iter().collect();
    candidates.sort_by(|a, b| a.id.cmp(&b.id));
    let mut units: Vec<&SleepingUnit> = units.iter().collect();
    units.sort_by(|a, b| a.id.cmp(&b.id));

    let encoded = serde_json::to_vec(&FingerprintInput {
        candidates,
        units,
        settings,
    })?;
    Ok(hex::encode(Sha256::digest(&encoded)))
}
