pub mod assign;
pub mod board;
pub mod init;
pub mod plan;
pub mod reset;
pub mod rsvp;

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use bunk_core::{GuestGroup, HouseConfig, candidate_pool};
use bunkhouse_placement::PlannerSettings;
use bunkhouse_state::RosterStore;

/// House layout plus the roster store every command works against.
pub struct Console {
    pub house: HouseConfig,
    pub store: RosterStore,
}

impl Console {
    /// Load `house` (or the built-in layout) and open the store under `data_dir`.
    pub fn open(house: &Path, data_dir: &Path) -> anyhow::Result<Self> {
        let house = HouseConfig::load_or_default(house)?;
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("creating {}", data_dir.display()))?;
        let db_path = data_dir.join("roster.redb");
        let store = RosterStore::open(&db_path)
            .with_context(|| format!("opening {}", db_path.display()))?;
        Ok(Self { house, store })
    }

    pub fn threshold(&self) -> u8 {
        self.house.event.likelihood_threshold
    }

    pub fn settings(&self) -> PlannerSettings {
        PlannerSettings {
            capacity: self.house.capacity,
            penalties: self.house.penalties,
        }
    }

    /// Snapshot of the groups eligible for a room right now.
    pub fn candidates(&self) -> anyhow::Result<Vec<GuestGroup>> {
        let groups = self.store.list_groups()?;
        Ok(candidate_pool(&groups, self.threshold()))
    }

    /// Contact label for a stored group, falling back to its id.
    pub fn label_of(&self, groups: &[GuestGroup], group_id: &str) -> String {
        groups
            .iter()
            .find(|g| g.id == group_id)
            .map_or_else(|| group_id.to_string(), |g| g.label().to_string())
    }

    /// Display name for a unit id, falling back to the id.
    pub fn unit_name(&self, unit_id: &str) -> String {
        self.house
            .unit(unit_id)
            .map_or_else(|| unit_id.to_string(), |u| u.name.clone())
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use bunk_core::{GuestCategory, GuestMember, RsvpStatus};

    pub fn console() -> Console {
        Console {
            house: HouseConfig::scaffold("Test Weekend"),
            store: RosterStore::open_in_memory().unwrap(),
        }
    }

    pub fn group(id: &str, status: RsvpStatus, likelihood: Option<u8>, size: usize) -> GuestGroup {
        GuestGroup {
            id: id.to_string(),
            contact_name: format!("Contact {id}"),
            email: format!("{id}@example.com"),
            status,
            likelihood,
            members: vec![GuestMember { name: None, category: GuestCategory::Adult }; size],
            prefers_quiet: false,
            prefers_no_paws: false,
            notes: String::new(),
            submitted_at: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use bunk_core::RsvpStatus;

    #[test]
    fn open_creates_data_dir_and_uses_default_house() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");

        let console = Console::open(&dir.path().join("missing.toml"), &data_dir).unwrap();

        assert!(data_dir.join("roster.redb").exists());
        assert_eq!(console.house.units.len(), 7);
        assert_eq!(console.threshold(), 70);
    }

    #[test]
    fn candidates_apply_threshold() {
        let console = console();
        console.store.put_group(&group("yes", RsvpStatus::Yes, Some(100), 2)).unwrap();
        console.store.put_group(&group("likely", RsvpStatus::Maybe, Some(70), 2)).unwrap();
        console.store.put_group(&group("unlikely", RsvpStatus::Maybe, Some(69), 2)).unwrap();
        console.store.put_group(&group("no", RsvpStatus::No, Some(0), 2)).unwrap();

        let ids: Vec<_> = console.candidates().unwrap().into_iter().map(|g| g.id).collect();
        assert_eq!(ids, vec!["likely", "yes"]);
    }
}
