//! Assign command implementation.

use anyhow::Result;
use sprintboard_lib::Command;

use super::{apply_for_issue, print_json, resolve_id};
use crate::cli::{AssignArgs, Session};

/// Execute the assign command. Omitting the user unassigns.
///
/// # Errors
///
/// Returns an error if the issue or user is not found.
pub fn execute(args: AssignArgs, session: &mut Session) -> Result<()> {
    let id = resolve_id(session, &args.id)?;
    let issue = apply_for_issue(
        session,
        Command::AssignIssue {
            id,
            user: args.user,
        },
    )?;

    if session.json {
        return print_json(&issue);
    }
    match issue.assignee_name() {
        Some(name) => println!("Assigned {} to {name}", issue.key),
        None => println!("Unassigned {}", issue.key),
    }
    Ok(())
}
