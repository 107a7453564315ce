use anyhow::bail;
use tracing::warn;

use super::Console;

/// Wipe every RSVP, assignment and plan report.
pub fn reset(console: &Console, yes: bool) -> anyhow::Result<()> {
    if !yes {
        bail!("refusing to erase the roster without --yes");
    }
    let groups = console.store.list_groups()?.len();
    console.store.reset()?;
    warn!(groups, "roster erased");
    println!("✓ Roster cleared ({groups} groups removed)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::plan::replan;
    use crate::commands::testing::{console, group};
    use bunk_core::RsvpStatus;

    #[test]
    fn reset_requires_confirmation() {
        let console = console();
        console.store.put_group(&group("g", RsvpStatus::Yes, Some(100), 1)).unwrap();

        assert!(reset(&console, false).is_err());
        assert_eq!(console.store.list_groups().unwrap().len(), 1);
    }

    #[test]
    fn reset_clears_roster_and_plan() {
        let console = console();
        console.store.put_group(&group("g", RsvpStatus::Yes, Some(100), 1)).unwrap();
        replan(&console, false).unwrap();

        reset(&console, true).unwrap();

        assert!(console.store.list_groups().unwrap().is_empty());
        assert!(console.store.load_assignments().unwrap().is_empty());
        assert!(console.store.latest_plan_report().unwrap().is_none());
    }
}
