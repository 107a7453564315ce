//! Bunkhouse room planner: bin-packing, preferences, waitlisting.
//!
//! A deterministic function: given the candidate pool and the house's units
//! it returns a [`RoomPlan`] of `assignments`, `conflicts` and `reasoning`.
//! The same inputs always produce the same plan.
//!
//! # Components
//!
//! - **`scorer`**: Unit scoring (capacity, preference penalties, balance)
//! - **`placer`**: The solve loop (ordering, waitlisting, overflow check)
//! - **`convert`**: Type conversions from roster types
//! - **`reasoning`**: Templated plan summary
//! - **`audit`**: Re-checks an assignment set after manual overrides
//! - **`fingerprint`**: Digest of solver inputs for idempotent re-plans

pub mod audit;
pub mod convert;
pub mod fingerprint;
pub mod placer;
pub mod reasoning;
pub mod scorer;

pub use audit::audit;
pub use convert::{group_to_request, unit_to_load};
pub use fingerprint::fingerprint;
pub use placer::{PlannerSettings, RoomPlan, solve, solve_with, validate_inputs};
pub use scorer::{PlacementRequest, UnitLoad, UnitScore, Violation, rank_units, score_unit};
