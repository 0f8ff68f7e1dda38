//! Show command implementation.

use anyhow::{Result, anyhow};
use sprintboard_lib::Command;

use super::{print_json, resolve_id};
use crate::cli::{Session, ShowArgs};
use crate::format::{IssueDetails, format_issue_details};

/// Execute the show command.
///
/// # Errors
///
/// Returns an error if the issue is not found or JSON serialization fails.
pub fn execute(args: &ShowArgs, session: &mut Session) -> Result<()> {
    let id = resolve_id(session, &args.id)?;
    session.store.apply(Command::OpenIssueDetail { id: id.clone() })?;

    let store = &session.store;
    let issue = store
        .selected_issue()
        .ok_or_else(|| anyhow!("Issue not found: {id}"))?;
    let comments = store.comments(&issue.id);

    if session.json {
        print_json(&IssueDetails { issue, comments })
    } else {
        print!("{}", format_issue_details(issue, &comments));
        Ok(())
    }
}
