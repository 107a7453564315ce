//! bunkhouse-state: embedded roster store.
//!
//! Backed by [redb](https://docs.rs/redb), keeps the guest roster, the
//! current room assignments and the report of the last plan between runs.
//!
//! # Architecture
//!
//! Records are JSON-serialized into redb's `&[u8]` value columns, keyed by
//! group id. Keying assignments by group id means the table itself enforces
//! "at most one room per group".
//!
//! Writes are last-write-wins; there is no history.

pub mod error;
pub mod report;
pub mod store;
pub mod tables;

pub use error::{StateError, StateResult};
pub use report::PlanReport;
pub use store::RosterStore;
