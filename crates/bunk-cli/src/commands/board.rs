use bunk_core::{HeadcountSummary, RoomBoard, maybe_queue};
use bunkhouse_placement::audit;
use serde_json::json;

use super::Console;

/// The room board and every conflict in the current assignments.
pub fn snapshot(console: &Console) -> anyhow::Result<(RoomBoard, Vec<String>)> {
    let candidates = console.candidates()?;
    let assignments = console.store.load_assignments()?;
    let weights = &console.house.capacity;
    let board = RoomBoard::build(&candidates, &console.house.units, &assignments, weights);
    let conflicts = audit(&candidates, &console.house.units, &assignments, weights);
    Ok((board, conflicts))
}

pub fn board(console: &Console, format: &str) -> anyhow::Result<()> {
    let (board, conflicts) = snapshot(console)?;

    match format {
        "json" => {
            let out = json!({ "board": board, "conflicts": conflicts });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            let groups = console.store.list_groups()?;
            println!("{}\n", console.house.event.name);
            for room in &board.rooms {
                let tag = if room.reserved {
                    " [reserved]"
                } else if room.over_capacity {
                    " [over]"
                } else {
                    ""
                };
                println!(
                    "{} ({})  {}/{}{}",
                    room.name, room.unit_id, room.used, room.capacity, tag
                );
                for gid in &room.groups {
                    println!("    {}", console.label_of(&groups, gid));
                }
            }
            if !board.unassigned.is_empty() {
                println!("\nUnassigned:");
                for gid in &board.unassigned {
                    println!("    {}", console.label_of(&groups, gid));
                }
            }
            if let Some(report) = console.store.latest_plan_report()? {
                println!("\n{}", report.reasoning);
            }
            if !conflicts.is_empty() {
                println!("\nConflicts:");
                for c in &conflicts {
                    println!("  ⚠ {c}");
                }
            }
        }
    }
    Ok(())
}

pub fn summary(console: &Console, format: &str) -> anyhow::Result<()> {
    let groups = console.store.list_groups()?;
    let headcount = HeadcountSummary::compute(&groups, &console.house.units);
    let queue = maybe_queue(&groups, console.threshold());

    match format {
        "json" => {
            let out = json!({ "summary": headcount, "maybeQueue": queue });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        _ => {
            let b = &headcount.breakdown;
            println!("{}", console.house.event.name);
            println!(
                "  Groups:     {} yes, {} maybe, {} no",
                headcount.confirmed_groups, headcount.maybe_groups, headcount.declined_groups
            );
            println!(
                "  Confirmed:  {} guests ({} adults, {} teens, {} kids, {} babies, {} dogs)",
                headcount.confirmed_guests, b.adults, b.teens, b.kids, b.babies, b.dogs
            );
            println!("  Expected:   {:.1} guests", headcount.expected_headcount);
            println!(
                "  Occupancy:  {}% of {} guest beds",
                headcount.occupancy_percent, headcount.guest_capacity
            );
            if !queue.is_empty() {
                println!("\nMaybe queue (rooming at {}%+):", console.threshold());
                for entry in &queue {
                    println!(
                        "  {:>3}%  {:<28} {} {}{}",
                        entry.likelihood,
                        entry.contact_name,
                        entry.head_count,
                        if entry.head_count == 1 { "guest" } else { "guests" },
                        if entry.roomed { "  (roomed)" } else { "" }
                    );
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::assign::apply_override;
    use crate::commands::plan::replan;
    use crate::commands::testing::{console, group};
    use bunk_core::RsvpStatus;

    #[test]
    fn snapshot_reflects_plan() {
        let console = console();
        console.store.put_group(&group("a", RsvpStatus::Yes, Some(100), 4)).unwrap();
        console.store.put_group(&group("b", RsvpStatus::Maybe, Some(30), 2)).unwrap();
        replan(&console, false).unwrap();

        let (board, conflicts) = snapshot(&console).unwrap();
        assert!(conflicts.is_empty());
        assert!(board.unassigned.is_empty());
        let room = board.room("room-3").unwrap();
        assert_eq!(room.groups, vec!["a".to_string()]);
        assert_eq!(room.used, 4);
    }

    #[test]
    fn snapshot_audits_overrides() {
        let console = console();
        console.store.put_group(&group("a", RsvpStatus::Yes, Some(100), 2)).unwrap();
        console.store.put_group(&group("b", RsvpStatus::Yes, Some(100), 1)).unwrap();
        apply_override(&console, "a", "unit-7").unwrap();

        let (board, conflicts) = snapshot(&console).unwrap();
        assert_eq!(board.unassigned, vec!["b".to_string()]);
        assert_eq!(
            conflicts,
            vec!["Common Area (unit-7) is over capacity: 2/1 beds".to_string()]
        );
    }

    #[test]
    fn commands_print_without_error() {
        let console = console();
        console.store.put_group(&group("a", RsvpStatus::Yes, Some(100), 2)).unwrap();
        console.store.put_group(&group("m", RsvpStatus::Maybe, Some(75), 1)).unwrap();
        replan(&console, false).unwrap();

        board(&console, "text").unwrap();
        board(&console, "json").unwrap();
        summary(&console, "text").unwrap();
        summary(&console, "json").unwrap();
    }
}
