//! List command implementation.
//!
//! Primary discovery view: search + filter flags, scoped to the current
//! sprint unless `--all` is given.

use anyhow::Result;
use sprintboard_lib::report::completion_stats;

use super::{apply_filters, print_json};
use crate::cli::{ListArgs, Session};
use crate::format::{IssueList, format_completion, format_issue_line};

/// Execute the list command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(args: &ListArgs, session: &mut Session) -> Result<()> {
    apply_filters(&args.filter, session)?;

    let store = &session.store;
    let issues = store.visible_issues(session.scope());
    let completion = completion_stats(&issues);

    if session.json {
        return print_json(&IssueList {
            scope: session.scope(),
            search: store.search_query(),
            filters: store.filters(),
            facets: store.facets(),
            issues,
            completion,
        });
    }

    if issues.is_empty() {
        println!("No issues found.");
    } else {
        for issue in &issues {
            println!("{}", format_issue_line(issue));
        }
        println!(
            "\n{} issue(s) · {}",
            issues.len(),
            format_completion(&completion)
        );
    }
    Ok(())
}
