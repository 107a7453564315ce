use anyhow::Context;
use bunkhouse_placement::{RoomPlan, fingerprint, solve_with};
use bunkhouse_state::PlanReport;
use tracing::info;

use super::{Console, now_millis};

/// Result of a re-plan request.
pub enum PlanOutcome {
    /// Inputs match the last plan; stored assignments were left alone.
    Unchanged(PlanReport),
    Planned { plan: RoomPlan, report: PlanReport },
}

impl PlanOutcome {
    pub fn report(&self) -> &PlanReport {
        match self {
            PlanOutcome::Unchanged(report) => report,
            PlanOutcome::Planned { report, .. } => report,
        }
    }
}

/// Solve the current candidate pool and persist the result.
///
/// Skips the solve when the inputs hash to the stored fingerprint, so manual
/// overrides survive an idle re-plan. `force` always recomputes.
pub fn replan(console: &Console, force: bool) -> anyhow::Result<PlanOutcome> {
    let candidates = console.candidates()?;
    let settings = console.settings();
    let digest = fingerprint(&candidates, &console.house.units, &settings)
        .context("fingerprinting planner inputs")?;

    if !force {
        if let Some(previous) = console.store.latest_plan_report()? {
            if previous.fingerprint == digest {
                info!(fingerprint = %digest, "inputs unchanged, keeping current plan");
                return Ok(PlanOutcome::Unchanged(previous));
            }
        }
    }

    let plan = solve_with(&candidates, &console.house.units, &settings)?;
    let report = PlanReport {
        fingerprint: digest,
        reasoning: plan.reasoning.clone(),
        conflicts: plan.conflicts.clone(),
        created_at: now_millis(),
    };
    console.store.save_assignments(&plan.assignment_set())?;
    console.store.put_plan_report(&report)?;
    info!(
        candidates = candidates.len(),
        placed = plan.assignments.len(),
        conflicts = plan.conflicts.len(),
        "room plan saved"
    );
    Ok(PlanOutcome::Planned { plan, report })
}

pub fn plan(console: &Console, force: bool, format: &str) -> anyhow::Result<()> {
    let outcome = replan(console, force)?;

    match format {
        "json" => match &outcome {
            PlanOutcome::Planned { plan, .. } => println!("{}", serde_json::to_string_pretty(plan)?),
            PlanOutcome::Unchanged(report) => println!("{}", serde_json::to_string_pretty(report)?),
        },
        _ => print_outcome(console, &outcome)?,
    }
    Ok(())
}

pub(crate) fn print_outcome(console: &Console, outcome: &PlanOutcome) -> anyhow::Result<()> {
    match outcome {
        PlanOutcome::Unchanged(report) => {
            println!("No changes since the last plan (use --force to recompute).");
            println!("{}", report.reasoning);
        }
        PlanOutcome::Planned { plan, report } => {
            let groups = console.store.list_groups()?;
            println!("{}", report.reasoning);
            if !plan.assignments.is_empty() {
                println!();
                for a in &plan.assignments {
                    println!(
                        "  {:<28} → {}",
                        console.label_of(&groups, &a.group_id),
                        console.unit_name(&a.room_id)
                    );
                }
            }
        }
    }

    let conflicts = &outcome.report().conflicts;
    if !conflicts.is_empty() {
        println!("\nConflicts:");
        for c in conflicts {
            println!("  ⚠ {c}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{console, group};
    use bunk_core::{RoomTarget, RsvpStatus};

    #[test]
    fn plan_saves_assignments_and_report() {
        let console = console();
        console.store.put_group(&group("big", RsvpStatus::Yes, Some(100), 4)).unwrap();
        console.store.put_group(&group("small", RsvpStatus::Maybe, Some(80), 2)).unwrap();

        let outcome = replan(&console, false).unwrap();
        assert!(matches!(outcome, PlanOutcome::Planned { .. }));

        let stored = console.store.load_assignments().unwrap();
        assert_eq!(stored.room_of("big"), Some("room-3"));
        assert!(stored.room_of("small").is_some());

        let report = console.store.latest_plan_report().unwrap().unwrap();
        assert_eq!(&report, outcome.report());
        assert!(report.conflicts.is_empty());
    }

    #[test]
    fn unchanged_inputs_keep_manual_overrides() {
        let console = console();
        console.store.put_group(&group("big", RsvpStatus::Yes, Some(100), 4)).unwrap();
        replan(&console, false).unwrap();

        console
            .store
            .override_assignment("big", &RoomTarget::Room("room-4".to_string()))
            .unwrap();

        let outcome = replan(&console, false).unwrap();
        assert!(matches!(outcome, PlanOutcome::Unchanged(_)));
        assert_eq!(console.store.load_assignments().unwrap().room_of("big"), Some("room-4"));

        let forced = replan(&console, true).unwrap();
        assert!(matches!(forced, PlanOutcome::Planned { .. }));
        assert_eq!(console.store.load_assignments().unwrap().room_of("big"), Some("room-3"));
    }

    #[test]
    fn declined_group_drops_out_on_replan() {
        let console = console();
        console.store.put_group(&group("g", RsvpStatus::Yes, Some(100), 2)).unwrap();
        replan(&console, false).unwrap();
        assert!(console.store.load_assignments().unwrap().room_of("g").is_some());

        console.store.put_group(&group("g", RsvpStatus::No, Some(0), 2)).unwrap();
        replan(&console, false).unwrap();
        assert!(console.store.load_assignments().unwrap().is_empty());
    }

    #[test]
    fn empty_roster_plans_nothing() {
        let console = console();
        let outcome = replan(&console, false).unwrap();
        assert!(outcome.report().reasoning.starts_with("Nobody to room yet"));
        assert!(console.store.load_assignments().unwrap().is_empty());
    }
}
