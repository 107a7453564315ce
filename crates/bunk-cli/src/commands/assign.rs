use anyhow::bail;
use bunk_core::RoomTarget;
use tracing::{info, warn};

use super::Console;

/// Host override: put `group_id` in `room` (or `none`), bypassing the solver.
///
/// Returns the room the group left, if any. Reserved rooms are allowed with a
/// warning; the board audit keeps flagging them.
pub fn apply_override(console: &Console, group_id: &str, room: &str) -> anyhow::Result<Option<String>> {
    if console.store.get_group(group_id)?.is_none() {
        bail!("unknown group '{group_id}'");
    }

    let target = RoomTarget::parse(room);
    if let RoomTarget::Room(unit_id) = &target {
        let Some(unit) = console.house.unit(unit_id) else {
            bail!("unknown room '{unit_id}'");
        };
        if unit.reserved {
            warn!(group = group_id, unit = %unit.id, "assigning a group to a reserved room");
        }
    }

    let previous = console.store.override_assignment(group_id, &target)?;
    info!(group = group_id, ?target, ?previous, "manual assignment");
    Ok(previous)
}

pub fn assign(console: &Console, group_id: &str, room: &str) -> anyhow::Result<()> {
    let previous = apply_override(console, group_id, room)?;
    let groups = console.store.list_groups()?;
    let label = console.label_of(&groups, group_id);

    match RoomTarget::parse(room) {
        RoomTarget::Room(unit_id) => println!("✓ {label} → {}", console.unit_name(&unit_id)),
        RoomTarget::Unassigned => println!("✓ {label} is now unassigned"),
    }
    if let Some(previous) = previous {
        println!("  (was in {})", console.unit_name(&previous));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{console, group};
    use bunk_core::RsvpStatus;

    #[test]
    fn override_moves_group() {
        let console = console();
        console.store.put_group(&group("g1", RsvpStatus::Yes, Some(100), 2)).unwrap();

        assert_eq!(apply_override(&console, "g1", "room-4").unwrap(), None);
        assert_eq!(
            apply_override(&console, "g1", "room-5").unwrap().as_deref(),
            Some("room-4")
        );
        assert_eq!(console.store.load_assignments().unwrap().room_of("g1"), Some("room-5"));
    }

    #[test]
    fn override_twice_is_idempotent() {
        let console = console();
        console.store.put_group(&group("g1", RsvpStatus::Yes, Some(100), 2)).unwrap();

        apply_override(&console, "g1", "room-4").unwrap();
        let first = console.store.load_assignments().unwrap();
        apply_override(&console, "g1", "room-4").unwrap();

        assert_eq!(console.store.load_assignments().unwrap(), first);
    }

    #[test]
    fn none_unassigns() {
        let console = console();
        console.store.put_group(&group("g1", RsvpStatus::Yes, Some(100), 2)).unwrap();
        apply_override(&console, "g1", "room-1").unwrap();

        apply_override(&console, "g1", "none").unwrap();
        assert!(console.store.load_assignments().unwrap().is_empty());
    }

    #[test]
    fn unknown_group_or_room_is_rejected() {
        let console = console();
        console.store.put_group(&group("g1", RsvpStatus::Yes, Some(100), 2)).unwrap();

        let err = apply_override(&console, "ghost", "room-1").unwrap_err();
        assert!(err.to_string().contains("unknown group"));

        let err = apply_override(&console, "g1", "attic").unwrap_err();
        assert!(err.to_string().contains("unknown room"));
        assert!(console.store.load_assignments().unwrap().is_empty());
    }

    #[test]
    fn reserved_room_is_allowed() {
        let console = console();
        console.store.put_group(&group("g1", RsvpStatus::Yes, Some(100), 1)).unwrap();

        apply_override(&console, "g1", "room-2").unwrap();
        assert_eq!(console.store.load_assignments().unwrap().room_of("g1"), Some("room-2"));
    }
}
