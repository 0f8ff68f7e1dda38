//! Comment command implementation.

use anyhow::{Result, anyhow};
use sprintboard_lib::{Command, CommandOutcome};

use super::{print_json, resolve_id};
use crate::cli::{CommentArgs, Session};

/// Execute the comment command.
///
/// # Errors
///
/// Returns an error if the issue is not found or the comment is blank.
pub fn execute(args: CommentArgs, session: &mut Session) -> Result<()> {
    let issue_id = resolve_id(session, &args.id)?;
    let author = args
        .author
        .unwrap_or_else(|| session.config.reporter.name.clone());

    let comment = match session.store.apply(Command::AddComment {
        issue_id,
        author,
        body: args.text.join(" "),
    })? {
        CommandOutcome::Comment(comment) => comment,
        other => return Err(anyhow!("Unexpected command outcome: {other:?}")),
    };

    if session.json {
        return print_json(&comment);
    }
    println!("Comment {} added to {}", comment.id, args.id);
    Ok(())
}
