//! Update command implementation.

use anyhow::{Result, bail};
use sprintboard_lib::{Command, IssueUpdate};

use super::{apply_for_issue, print_json, resolve_id};
use crate::cli::{Session, UpdateArgs};

/// Execute the update command.
///
/// # Errors
///
/// Returns an error if the issue is not found, no field was given, or
/// validation fails.
pub fn execute(args: UpdateArgs, session: &mut Session) -> Result<()> {
    let id = resolve_id(session, &args.id)?;
    let update = build_update(args);
    if update.is_empty() {
        bail!("No fields to update");
    }

    let issue = apply_for_issue(session, Command::UpdateIssue { id, update })?;
    if session.json {
        return print_json(&issue);
    }
    println!("Updated {}: {}", issue.key, issue.summary);
    Ok(())
}

fn build_update(args: UpdateArgs) -> IssueUpdate {
    IssueUpdate {
        summary: args.summary,
        description: clear_or(args.clear_description, args.description),
        issue_type: args.type_,
        status: args.status,
        priority: args.priority,
        story_points: clear_or(args.clear_points, args.points),
        labels: if args.clear_labels {
            Some(Vec::new())
        } else if args.labels.is_empty() {
            None
        } else {
            Some(args.labels)
        },
        sprint: clear_or(args.no_sprint, args.sprint),
        ..IssueUpdate::default()
    }
}

/// `Some(None)` clears the field, `Some(Some(v))` sets it, `None` leaves it.
fn clear_or<T>(clear: bool, value: Option<T>) -> Option<Option<T>> {
    if clear { Some(None) } else { value.map(Some) }
}
