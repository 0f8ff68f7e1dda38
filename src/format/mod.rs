//! Output formatting for `sb`.
//!
//! Human-readable text goes through [`text`]; `--json` output goes through
//! the view types in [`output`], which borrow from the store.

mod output;
mod text;

pub use output::{Board, IssueDetails, IssueList};
pub use text::{
    format_board, format_completion, format_issue_details, format_issue_line, format_priority,
    format_report, format_status_icon, format_type_badge, pad_to_width, truncate_to_width,
};
