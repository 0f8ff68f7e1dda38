//! Text formatting functions for `sprintboard`.
//!
//! Plain text (non-ANSI) output for the terminal:
//! - Status icons (○ ◐ ◑ ✓)
//! - Priority arrows and type badges
//! - Issue lines, board columns, report tables

use std::fmt::Write as _;

use sprintboard_lib::report::{CompletionStats, CountEntry, DayBucket, ReportSummary, StatusColumn};
use sprintboard_lib::{Comment, Issue, IssueType, Priority, Status};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    pub const TO_DO: &str = "○";
    pub const IN_PROGRESS: &str = "◐";
    pub const IN_REVIEW: &str = "◑";
    pub const DONE: &str = "✓";
}

#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::ToDo => icons::TO_DO,
        Status::InProgress => icons::IN_PROGRESS,
        Status::InReview => icons::IN_REVIEW,
        Status::Done => icons::DONE,
    }
}

/// Priority as an arrow glyph, highest pointing up.
#[must_use]
pub const fn format_priority(priority: Priority) -> &'static str {
    match priority {
        Priority::Highest => "⇈",
        Priority::High => "↑",
        Priority::Medium => "=",
        Priority::Low => "↓",
        Priority::Lowest => "⇊",
    }
}

/// Issue type as a bracketed lowercase badge.
#[must_use]
pub fn format_type_badge(issue_type: IssueType) -> String {
    format!("[{}]", issue_type.as_str().to_lowercase())
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {key} {priority} [{type}] {summary} @{initials}`
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    let mut line = format!(
        "{} {} {} {} {}",
        format_status_icon(issue.status),
        issue.key,
        format_priority(issue.priority),
        format_type_badge(issue.issue_type),
        issue.summary,
    );
    if let Some(assignee) = &issue.assignee {
        let _ = write!(line, " @{}", assignee.initials);
    }
    line
}

/// `3/6 done (50%)`
#[must_use]
pub fn format_completion(stats: &CompletionStats) -> String {
    format!(
        "{}/{} done ({}%)",
        stats.done, stats.total, stats.percentage
    )
}

/// Multi-line detail view of one issue and its comments.
#[must_use]
pub fn format_issue_details(issue: &Issue, comments: &[&Comment]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", issue.key, issue.summary);
    let _ = writeln!(
        out,
        "{} {} · {} · {}",
        format_status_icon(issue.status),
        issue.status,
        issue.issue_type,
        issue.priority
    );
    let assignee = issue
        .assignee
        .as_ref()
        .map_or_else(|| "Unassigned".to_string(), |a| a.name.clone());
    let _ = writeln!(out, "Assignee: {assignee}");
    let _ = writeln!(out, "Reporter: {}", issue.reporter.name);
    if let Some(points) = issue.story_points {
        let _ = writeln!(out, "Story points: {points}");
    }
    if !issue.labels.is_empty() {
        let _ = writeln!(out, "Labels: {}", issue.labels.join(", "));
    }
    if let Some(sprint) = &issue.sprint {
        let _ = writeln!(out, "Sprint: {sprint}");
    }
    let _ = writeln!(out, "Created: {}", issue.created.format("%Y-%m-%d %H:%M"));
    let _ = writeln!(out, "Updated: {}", issue.updated.format("%Y-%m-%d %H:%M"));
    if let Some(description) = &issue.description {
        let _ = writeln!(out, "\n{description}");
    }
    if !comments.is_empty() {
        let _ = writeln!(out, "\nComments ({}):", comments.len());
        for comment in comments {
            let _ = writeln!(
                out,
                "  [{}] {}: {}",
                comment.created.format("%Y-%m-%d %H:%M"),
                comment.author,
                comment.body
            );
        }
    }
    out
}

/// Truncate to at most `width` display columns, adding `…` when cut.
#[must_use]
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Pad with spaces to exactly `width` display columns (truncating first).
#[must_use]
pub fn pad_to_width(text: &str, width: usize) -> String {
    let mut cell = truncate_to_width(text, width);
    let used = UnicodeWidthStr::width(cell.as_str());
    cell.push_str(&" ".repeat(width.saturating_sub(used)));
    cell
}

/// Render status columns side by side, each `column_width` wide.
#[must_use]
pub fn format_board(columns: &[StatusColumn<'_>], column_width: usize) -> String {
    let headers: Vec<String> = columns
        .iter()
        .map(|c| format!("{} ({})", c.status, c.issues.len()))
        .collect();
    let rows = columns.iter().map(|c| c.issues.len()).max().unwrap_or(0);

    let mut out = String::new();
    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .map(|cell| pad_to_width(cell, column_width))
            .collect::<Vec<_>>()
            .join(" │ ")
            .trim_end()
            .to_string()
    };

    let _ = writeln!(out, "{}", line(headers));
    let rule = vec!["─".repeat(column_width); columns.len()].join("─┼─");
    let _ = writeln!(out, "{rule}");
    for row in 0..rows {
        let cells = columns
            .iter()
            .map(|c| {
                c.issues.get(row).map_or_else(String::new, |issue| {
                    format!("{} {}", issue.key, issue.summary)
                })
            })
            .collect();
        let _ = writeln!(out, "{}", line(cells));
    }
    out
}

fn format_counts(title: &str, entries: &[CountEntry], out: &mut String) {
    let _ = writeln!(out, "{title}:");
    let label_width = entries
        .iter()
        .map(|e| UnicodeWidthStr::width(e.label))
        .max()
        .unwrap_or(0);
    for entry in entries {
        let _ = writeln!(
            out,
            "  {} {:>3}",
            pad_to_width(entry.label, label_width),
            entry.count
        );
    }
}

fn format_daily(window: &str, buckets: &[DayBucket], out: &mut String) {
    let _ = writeln!(out, "Updates per day ({window}):");
    if buckets.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for bucket in buckets {
        let _ = writeln!(out, "  {} {:>3} {}", bucket.day, bucket.count, "▇".repeat(bucket.count));
    }
}

/// Render a report summary as plain text sections.
#[must_use]
pub fn format_report(summary: &ReportSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Completion: {}\n", format_completion(&summary.completion));
    format_counts("By status", &summary.by_status, &mut out);
    out.push('\n');
    format_counts("By type", &summary.by_type, &mut out);
    out.push('\n');
    format_counts("By priority", &summary.by_priority, &mut out);
    out.push('\n');
    format_daily(&summary.window.to_string(), &summary.daily_updates, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprintboard_lib::PersonRef;
    use sprintboard_lib::report::group_by_status;

    fn make_test_issue() -> Issue {
        Issue {
            id: "1".to_string(),
            key: "PROJ-1".to_string(),
            summary: "Test summary".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(format_status_icon(Status::ToDo), "○");
        assert_eq!(format_status_icon(Status::InProgress), "◐");
        assert_eq!(format_status_icon(Status::InReview), "◑");
        assert_eq!(format_status_icon(Status::Done), "✓");
    }

    #[test]
    fn test_format_type_badge() {
        assert_eq!(format_type_badge(IssueType::Bug), "[bug]");
        assert_eq!(format_type_badge(IssueType::Epic), "[epic]");
    }

    #[test]
    fn test_format_issue_line() {
        let issue = make_test_issue();
        assert_eq!(format_issue_line(&issue), "○ PROJ-1 = [task] Test summary");
    }

    #[test]
    fn test_format_issue_line_with_assignee() {
        let mut issue = make_test_issue();
        issue.status = Status::Done;
        issue.priority = Priority::Highest;
        issue.assignee = Some(PersonRef::new("Sarah Chen", "SC"));
        let line = format_issue_line(&issue);
        assert!(line.starts_with("✓ PROJ-1 ⇈"));
        assert!(line.ends_with("@SC"));
    }

    #[test]
    fn test_truncate_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefgh", 5), "abcd…");
        // Each CJK character is two columns wide.
        let cut = truncate_to_width("日本語テキスト", 7);
        assert!(UnicodeWidthStr::width(cut.as_str()) <= 7);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_pad_to_width() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(UnicodeWidthStr::width(pad_to_width("🚀 go", 8).as_str()), 8);
    }

    #[test]
    fn test_format_board_has_all_columns() {
        let a = make_test_issue();
        let b = Issue {
            id: "2".to_string(),
            key: "PROJ-2".to_string(),
            status: Status::Done,
            ..make_test_issue()
        };
        let board = format_board(&group_by_status(&[&a, &b]), 20);
        let header = board.lines().next().unwrap();
        assert!(header.contains("To Do (1)"));
        assert!(header.contains("In Progress (0)"));
        assert!(header.contains("Done (1)"));
        assert_eq!(board.lines().count(), 3);
    }

    #[test]
    fn test_format_completion() {
        let stats = CompletionStats {
            done: 2,
            total: 6,
            percentage: 33,
        };
        assert_eq!(format_completion(&stats), "2/6 done (33%)");
    }
}
