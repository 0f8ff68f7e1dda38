//! Move command implementation.

use anyhow::Result;
use sprintboard_lib::Command;

use super::{apply_for_issue, print_json, resolve_id};
use crate::cli::{MoveArgs, Session};
use crate::format::format_status_icon;

/// Execute the move command.
///
/// # Errors
///
/// Returns an error if the issue is not found.
pub fn execute(args: &MoveArgs, session: &mut Session) -> Result<()> {
    let id = resolve_id(session, &args.id)?;
    let issue = apply_for_issue(
        session,
        Command::MoveIssueToStatus {
            id,
            status: args.status,
        },
    )?;

    if session.json {
        return print_json(&issue);
    }
    println!(
        "Moved {} to {} {}",
        issue.key,
        format_status_icon(issue.status),
        issue.status
    );
    Ok(())
}
