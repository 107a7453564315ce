//! RosterStore: redb-backed persistence for the guest roster.
//!
//! Provides typed operations over groups, assignments and the last plan
//! report. All values are JSON-serialized into redb's `&[u8]` value
//! columns. The store supports both on-disk and in-memory backends (the
//! latter for testing).

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use bunk_core::{Assignment, AssignmentSet, GuestGroup, RoomTarget};

use crate::error::{StateError, StateResult};
use crate::report::PlanReport;
use crate::tables::*;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Thread-safe roster store backed by redb.
#[derive(Clone)]
pub struct RosterStore {
    db: Arc<Database>,
}

impl RosterStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "roster store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory roster store opened");
        Ok(store)
    }

    /// Create all tables if they don't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(GROUPS).map_err(map_err!(Table))?;
        txn.open_table(ASSIGNMENTS).map_err(map_err!(Table))?;
        txn.open_table(PLAN_REPORTS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    // ── Groups ─────────────────────────────────────────────────────

    /// Insert a group, or replace the stored group with the same id.
    pub fn put_group(&self, group: &GuestGroup) -> StateResult<()> {
        group.validate()?;
        self.write_json(GROUPS, &group.id, group)?;
        debug!(group = %group.id, status = group.status.label(), "group stored");
        Ok(())
    }

    /// Get a group by id.
    pub fn get_group(&self, group_id: &str) -> StateResult<Option<GuestGroup>> {
        self.read_json(GROUPS, group_id)
    }

    /// List all groups in submission order.
    pub fn list_groups(&self) -> StateResult<Vec<GuestGroup>> {
        let mut groups: Vec<GuestGroup> = self.read_all(GROUPS)?;
        groups.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(groups)
    }

    // ── Assignments ────────────────────────────────────────────────

    /// Load the current assignments (ordered by group id).
    pub fn load_assignments(&self) -> StateResult<AssignmentSet> {
        let pairs: Vec<Assignment> = self.read_all(ASSIGNMENTS)?;
        Ok(AssignmentSet::from_assignments(pairs))
    }

    /// Replace every stored assignment with `set`.
    pub fn save_assignments(&self, set: &AssignmentSet) -> StateResult<()> {
        let encoded = set
            .iter()
            .map(|a| Ok((a.group_id.as_str(), serde_json::to_vec(a).map_err(map_err!(Serialize))?)))
            .collect::<StateResult<Vec<_>>>()?;

        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        txn.delete_table(ASSIGNMENTS).map_err(map_err!(Table))?;
        {
            let mut table = txn.open_table(ASSIGNMENTS).map_err(map_err!(Table))?;
            for (key, value) in &encoded {
                table
                    .insert(*key, value.as_slice())
                    .map_err(map_err!(Write))?;
            }
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(count = encoded.len(), "assignments replaced");
        Ok(())
    }

    /// Host override for a single group. Returns the room it left, if any.
    pub fn override_assignment(&self, group_id: &str, target: &RoomTarget) -> StateResult<Option<String>> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let previous = {
            let mut table = txn.open_table(ASSIGNMENTS).map_err(map_err!(Table))?;
            let previous = match table.remove(group_id).map_err(map_err!(Write))? {
                Some(guard) => {
                    let old: Assignment =
                        serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                    Some(old.room_id)
                }
                None => None,
            };
            if let RoomTarget::Room(room_id) = target {
                let value = serde_json::to_vec(&Assignment {
                    group_id: group_id.to_string(),
                    room_id: room_id.clone(),
                })
                .map_err(map_err!(Serialize))?;
                table
                    .insert(group_id, value.as_slice())
                    .map_err(map_err!(Write))?;
            }
            previous
        };
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(group = group_id, ?target, ?previous, "assignment overridden");
        Ok(previous)
    }

    // ── Plan reports ───────────────────────────────────────────────

    pub fn put_plan_report(&self, report: &PlanReport) -> StateResult<()> {
        self.write_json(PLAN_REPORTS, LATEST_PLAN, report)
    }

    pub fn latest_plan_report(&self) -> StateResult<Option<PlanReport>> {
        self.read_json(PLAN_REPORTS, LATEST_PLAN)
    }

    // ── Reset ──────────────────────────────────────────────────────

    /// Delete every group, assignment and report.
    pub fn reset(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        for table in [GROUPS, ASSIGNMENTS, PLAN_REPORTS] {
            txn.delete_table(table).map_err(map_err!(Table))?;
            txn.open_table(table).map_err(map_err!(Table))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!("roster reset");
        Ok(())
    }

    // ── JSON helpers ───────────────────────────────────────────────

    fn write_json<T: Serialize>(&self, def: JsonTable, key: &str, value: &T) -> StateResult<()> {
        let value = serde_json::to_vec(value).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(def).map_err(map_err!(Table))?;
            table
                .insert(key, value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(&self, def: JsonTable, key: &str) -> StateResult<Option<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(def).map_err(map_err!(Table))?;
        match table.get(key).map_err(map_err!(Read))? {
            Some(guard) => {
                let value: T = serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    fn read_all<T: DeserializeOwned>(&self, def: JsonTable) -> StateResult<Vec<T>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(def).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let record: T = serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(record);
        }
        Ok(results)
    }
}
