//! Create command implementation.

use anyhow::Result;
use sprintboard_lib::{Command, NewIssue};

use super::{apply_for_issue, print_json, resolve_person};
use crate::cli::{CreateArgs, Session};

/// Execute the create command.
///
/// # Errors
///
/// Returns an error if validation fails, the assignee is unknown, or no
/// project is current.
pub fn execute(args: CreateArgs, session: &mut Session) -> Result<()> {
    let assignee = args
        .assignee
        .as_deref()
        .map(|user| resolve_person(session, user))
        .transpose()?;

    let new = NewIssue {
        description: args.description,
        issue_type: args.type_,
        priority: args.priority,
        assignee,
        reporter: session.config.reporter.clone(),
        story_points: args.points,
        labels: args.labels,
        ..NewIssue::new(args.summary)
    };
    let issue = apply_for_issue(session, Command::CreateIssue(new))?;

    if session.json {
        return print_json(&issue);
    }
    println!("Created {}: {}", issue.key, issue.summary);
    Ok(())
}
