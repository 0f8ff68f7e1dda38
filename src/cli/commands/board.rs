//! Board command implementation.

use anyhow::Result;
use sprintboard_lib::Scope;
use sprintboard_lib::report::{completion_stats, group_by_status};

use super::{apply_filters, print_json};
use crate::cli::{BoardArgs, Session};
use crate::format::{Board, format_board, format_completion};

const MIN_COLUMN_WIDTH: usize = 12;

/// Execute the board command.
///
/// # Errors
///
/// Returns an error if an assignee filter names an unknown user or JSON
/// serialization fails.
pub fn execute(args: &BoardArgs, session: &mut Session) -> Result<()> {
    apply_filters(&args.filter, session)?;

    let store = &session.store;
    let issues = store.visible_issues(session.scope());
    let completion = completion_stats(&issues);
    let sprint = match session.scope() {
        Scope::CurrentSprint => store.current_sprint(),
        Scope::All => None,
    };

    if session.json {
        return print_json(&Board {
            sprint: sprint.map(|s| s.name.as_str()),
            columns: group_by_status(&issues),
            completion,
        });
    }

    let title = sprint.map_or("All issues", |s| s.name.as_str());
    println!("{title} · {}\n", format_completion(&completion));
    print!(
        "{}",
        format_board(&group_by_status(&issues), args.width.max(MIN_COLUMN_WIDTH))
    );
    Ok(())
}
