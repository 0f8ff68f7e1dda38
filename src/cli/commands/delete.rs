//! Delete command implementation.

use anyhow::Result;
use sprintboard_lib::Command;

use super::{apply_for_issue, print_json, resolve_id};
use crate::cli::{DeleteArgs, Session};

/// Execute the delete command.
///
/// # Errors
///
/// Returns an error if the issue is not found.
pub fn execute(args: &DeleteArgs, session: &mut Session) -> Result<()> {
    let id = resolve_id(session, &args.id)?;
    let issue = apply_for_issue(session, Command::DeleteIssue { id })?;

    if session.json {
        return print_json(&issue);
    }
    println!("Deleted {}: {}", issue.key, issue.summary);
    Ok(())
}
