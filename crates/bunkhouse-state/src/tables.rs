//! redb table definitions for the roster store.
//!
//! Each table uses `&str` keys and `&[u8]` values (JSON-serialized records).

use redb::TableDefinition;

/// Shape shared by every table.
pub type JsonTable = TableDefinition<'static, &'static str, &'static [u8]>;

/// Guest groups keyed by group id.
pub const GROUPS: JsonTable = TableDefinition::new("groups");

/// Room assignments keyed by group id.
pub const ASSIGNMENTS: JsonTable = TableDefinition::new("assignments");

/// Plan reports keyed by [`LATEST_PLAN`].
pub const PLAN_REPORTS: JsonTable = TableDefinition::new("plan_reports");

/// Key of the single report kept in [`PLAN_REPORTS`].
pub const LATEST_PLAN: &str = "latest";
