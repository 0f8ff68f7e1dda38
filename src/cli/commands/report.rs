//! Report command implementation.
//!
//! Day buckets use the local timezone.

use anyhow::Result;
use chrono::Local;
use sprintboard_lib::ReportSummary;

use super::print_json;
use crate::cli::Session;
use crate::format::format_report;

/// Execute the report command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(session: &Session) -> Result<()> {
    let issues = session.store.visible_issues(session.scope());
    let summary = ReportSummary::build(&issues, session.config.report_window, &Local::now());

    if session.json {
        print_json(&summary)
    } else {
        print!("{}", format_report(&summary));
        Ok(())
    }
}
