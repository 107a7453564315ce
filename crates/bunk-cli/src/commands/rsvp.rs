use std::path::Path;

use anyhow::Context;
use bunk_core::{GuestGroup, GuestMember, RsvpStatus};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::info;

use super::plan::{print_outcome, replan};
use super::{Console, now_millis};

/// An RSVP as submitted by a guest. `id` is present when editing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsvpForm {
    #[serde(default)]
    pub id: Option<String>,
    pub contact_name: String,
    #[serde(default)]
    pub email: String,
    pub status: RsvpStatus,
    #[serde(default)]
    pub likelihood: Option<u8>,
    pub members: Vec<GuestMember>,
    #[serde(default)]
    pub prefers_quiet: bool,
    #[serde(default)]
    pub prefers_no_paws: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub submitted_at: Option<u64>,
}

/// Stable-looking id for a new group: `grp-` plus 12 hex chars.
pub fn generate_id(contact_name: &str, email: &str, now: u64) -> String {
    let digest = Sha256::digest(format!("{contact_name}\n{email}\n{now}").as_bytes());
    format!("grp-{}", &hex::encode(digest)[..12])
}

/// Turn a form into a stored group.
///
/// Edits replace the whole record but keep the original submission time.
/// Returns the stored group and whether it was a candidate before the edit.
pub fn intake(console: &Console, form: RsvpForm, now: u64) -> anyhow::Result<(GuestGroup, bool)> {
    let id = form
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| generate_id(&form.contact_name, &form.email, now));
    let existing = console.store.get_group(&id)?;
    let was_candidate = existing
        .as_ref()
        .is_some_and(|g| g.is_candidate(console.threshold()));

    let mut group = GuestGroup {
        submitted_at: existing
            .map(|g| g.submitted_at)
            .or(form.submitted_at)
            .unwrap_or(now),
        id,
        contact_name: form.contact_name.trim().to_string(),
        email: form.email.trim().to_string(),
        status: form.status,
        likelihood: form.likelihood,
        members: form.members,
        prefers_quiet: form.prefers_quiet,
        prefers_no_paws: form.prefers_no_paws,
        notes: form.notes,
    };
    group.normalize();
    console.store.put_group(&group)?;
    info!(
        group = %group.id,
        status = group.status.label(),
        likelihood = group.effective_likelihood(),
        members = group.head_count(),
        "rsvp stored"
    );
    Ok((group, was_candidate))
}

pub fn submit(console: &Console, file: &Path, no_plan: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let form: RsvpForm = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", file.display()))?;

    let (group, was_candidate) = intake(console, form, now_millis())?;
    println!(
        "✓ Saved {} ({}, {} {})",
        group.label(),
        group.id,
        group.head_count(),
        if group.head_count() == 1 { "guest" } else { "guests" }
    );

    // Rooming only changes when the group enters or leaves the pool, or edits while in it.
    let is_candidate = group.is_candidate(console.threshold());
    if !no_plan && (is_candidate || was_candidate) {
        let outcome = replan(console, false)?;
        println!();
        print_outcome(console, &outcome)?;
    }
    Ok(())
}

pub fn list(console: &Console, format: &str) -> anyhow::Result<()> {
    let groups = console.store.list_groups()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&groups)?),
        _ => {
            if groups.is_empty() {
                println!("No RSVPs yet.");
                return Ok(());
            }
            println!("{:<18} {:<6} {:>5} {:>7}  CONTACT", "ID", "STATUS", "LIKE%", "GUESTS");
            for g in &groups {
                println!(
                    "{:<18} {:<6} {:>5} {:>7}  {}",
                    g.id,
                    g.status.label(),
                    g.effective_likelihood(),
                    g.head_count(),
                    g.label()
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::console;
    use bunk_core::GuestCategory;

    fn form(json: &str) -> RsvpForm {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn generated_ids_have_fixed_shape() {
        let id = generate_id("The Parks", "parks@example.com", 42);
        assert!(id.starts_with("grp-"));
        assert_eq!(id.len(), 16);
        assert_eq!(id, generate_id("The Parks", "parks@example.com", 42));
        assert_ne!(id, generate_id("The Parks", "parks@example.com", 43));
    }

    #[test]
    fn new_rsvp_gets_id_and_default_likelihood() {
        let console = console();
        let (group, was_candidate) = intake(
            &console,
            form(r#"{
                "contactName": "  The Parks ",
                "status": "MAYBE",
                "members": [
                    {"name": "Jin", "category": "Adult"},
                    {"category": "Teen or Tween"}
                ]
            }"#),
            1000,
        )
        .unwrap();

        assert!(group.id.starts_with("grp-"));
        assert_eq!(group.contact_name, "The Parks");
        assert_eq!(group.likelihood, Some(50));
        assert_eq!(group.submitted_at, 1000);
        assert_eq!(group.members[1].category, GuestCategory::TeenTween);
        assert!(!was_candidate);
        assert_eq!(console.store.get_group(&group.id).unwrap(), Some(group));
    }

    #[test]
    fn edit_keeps_submission_time_and_replaces_fields() {
        let console = console();
        let first = r#"{"id": "g1", "contactName": "Lee", "status": "YES",
            "members": [{"category": "Adult"}, {"category": "Dog"}]}"#;
        intake(&console, form(first), 1000).unwrap();

        let edit = r#"{"id": "g1", "contactName": "Lee", "status": "MAYBE", "likelihood": 40,
            "members": [{"category": "Adult"}]}"#;
        let (group, was_candidate) = intake(&console, form(edit), 5000).unwrap();

        assert!(was_candidate);
        assert_eq!(group.submitted_at, 1000);
        assert_eq!(group.likelihood, Some(40));
        assert_eq!(group.head_count(), 1);
        assert_eq!(console.store.list_groups().unwrap().len(), 1);
    }

    #[test]
    fn confirmed_likelihood_is_pinned() {
        let console = console();
        let (group, _) = intake(
            &console,
            form(r#"{"contactName": "Ana", "status": "YES", "likelihood": 10,
                "members": [{"category": "Adult"}]}"#),
            1,
        )
        .unwrap();
        assert_eq!(group.likelihood, Some(100));
    }

    #[test]
    fn empty_party_is_rejected() {
        let console = console();
        let err = intake(
            &console,
            form(r#"{"contactName": "Nobody", "status": "YES", "members": []}"#),
            1,
        )
        .unwrap_err();
        assert!(err.to_string().contains("no members"), "{err}");
        assert!(console.store.list_groups().unwrap().is_empty());
    }

    #[test]
    fn submit_reads_file_and_replans() {
        let console = console();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rsvp.json");
        std::fs::write(
            &path,
            r#"{"id": "fam", "contactName": "Fam", "status": "YES",
                "members": [{"category": "Adult"}, {"category": "Adult"}, {"category": "Child"}]}"#,
        )
        .unwrap();

        submit(&console, &path, false).unwrap();

        assert!(console.store.load_assignments().unwrap().room_of("fam").is_some());
        assert!(console.store.latest_plan_report().unwrap().is_some());
    }

    #[test]
    fn submit_without_plan_leaves_assignments() {
        let console = console();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rsvp.json");
        std::fs::write(
            &path,
            r#"{"id": "fam", "contactName": "Fam", "status": "YES", "members": [{"category": "Adult"}]}"#,
        )
        .unwrap();

        submit(&console, &path, true).unwrap();

        assert!(console.store.load_assignments().unwrap().is_empty());
        assert!(console.store.latest_plan_report().unwrap().is_none());
    }
}
