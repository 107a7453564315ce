pub mod assignments;
pub mod config;
pub mod error;
pub mod summary;
pub mod types;
pub mod weights;

pub use assignments::{AssignmentSet, RoomTarget};
pub use config::HouseConfig;
pub use error::{ValidationError, ValidationResult};
pub use summary::{CategoryBreakdown, HeadcountSummary, MaybeEntry, RoomBoard, RoomOccupancy, maybe_queue};
pub use types::*;
pub use weights::{CapacityWeights, PenaltyWeights};
