//! Aggregate derivations: board columns, completion stats and reports.
//!
//! Everything here is a pure function of the issues passed in. Callers
//! recompute on every read; nothing is cached.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::BoardError;
use crate::model::{Issue, IssueType, Priority, Status};

/// One board column.
#[derive(Debug, Clone, Serialize)]
pub struct StatusColumn<'a> {
    pub status: Status,
    pub issues: Vec<&'a Issue>,
}

/// Partition issues into the four status columns, in board order.
///
/// Relative order within a column is the order of `issues`.
#[must_use]
pub fn group_by_status<'a>(issues: &[&'a Issue]) -> Vec<StatusColumn<'a>> {
    Status::ALL
        .iter()
        .map(|status| StatusColumn {
            status: *status,
            issues: issues
                .iter()
                .copied()
                .filter(|issue| issue.status == *status)
                .collect(),
        })
        .collect()
}

/// Done/total counts with a rounded percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CompletionStats {
    pub done: usize,
    pub total: usize,
    pub percentage: u32,
}

/// Count done issues. `percentage` is 0 for an empty slice.
#[must_use]
pub fn completion_stats(issues: &[&Issue]) -> CompletionStats {
    let total = issues.len();
    let done = issues.iter().filter(|issue| issue.status.is_done()).count();
    CompletionStats {
        done,
        total,
        percentage: rounded_percentage(done, total),
    }
}

/// `round(part / whole * 100)` with halves rounded up; 0 when `whole` is 0.
fn rounded_percentage(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = (200 * part + whole) / (2 * whole);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

/// A labelled count in a grouped report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub label: &'static str,
    pub count: usize,
}

fn count_by<T: Copy + PartialEq>(
    issues: &[&Issue],
    values: &[T],
    label: impl Fn(&T) -> &'static str,
    field: impl Fn(&Issue) -> T,
) -> Vec<CountEntry> {
    values
        .iter()
        .map(|value| CountEntry {
            label: label(value),
            count: issues.iter().filter(|issue| field(issue) == *value).count(),
        })
        .collect()
}

/// Counts for every status, zero-filled, in board order.
#[must_use]
pub fn count_by_status(issues: &[&Issue]) -> Vec<CountEntry> {
    count_by(issues, &Status::ALL, Status::as_str, |i| i.status)
}

/// Counts for every issue type, zero-filled.
#[must_use]
pub fn count_by_type(issues: &[&Issue]) -> Vec<CountEntry> {
    count_by(issues, &IssueType::ALL, IssueType::as_str, |i| i.issue_type)
}

/// Counts for every priority, zero-filled, lowest first.
#[must_use]
pub fn count_by_priority(issues: &[&Issue]) -> Vec<CountEntry> {
    count_by(issues, &Priority::ALL, Priority::as_str, |i| i.priority)
}

/// Trailing window for date-bucketed reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "WindowRepr")]
pub enum ReportWindow {
    Days7,
    Days14,
    #[default]
    Days30,
    Days90,
    All,
}

impl ReportWindow {
    /// Window length in days; `None` means unbounded.
    #[must_use]
    pub const fn days(&self) -> Option<i64> {
        match self {
            Self::Days7 => Some(7),
            Self::Days14 => Some(14),
            Self::Days30 => Some(30),
            Self::Days90 => Some(90),
            Self::All => None,
        }
    }
}

impl fmt::Display for ReportWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days() {
            Some(days) => write!(f, "{days}d"),
            None => f.write_str("all"),
        }
    }
}

impl FromStr for ReportWindow {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        match trimmed.strip_suffix('d').unwrap_or(&trimmed) {
            "7" => Ok(Self::Days7),
            "14" => Ok(Self::Days14),
            "30" => Ok(Self::Days30),
            "90" => Ok(Self::Days90),
            "all" => Ok(Self::All),
            _ => Err(BoardError::InvalidWindow {
                window: s.to_string(),
            }),
        }
    }
}

impl Serialize for ReportWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Config files may spell the window as `30` or `"30d"`/`"all"`.
#[derive(Deserialize)]
#[serde(untagged)]
enum WindowRepr {
    Days(u32),
    Text(String),
}

impl TryFrom<WindowRepr> for ReportWindow {
    type Error = BoardError;

    fn try_from(repr: WindowRepr) -> Result<Self, Self::Error> {
        match repr {
            WindowRepr::Days(days) => days.to_string().parse(),
            WindowRepr::Text(text) => text.parse(),
        }
    }
}

/// Number of issues last updated on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBucket {
    /// `YYYY-MM-DD` in the report's time zone.
    pub day: String,
    pub count: usize,
}

/// Bucket issues by the calendar day of `updated`, in the time zone of
/// `now`, keeping only those updated within `window` of `now`.
///
/// Buckets are sorted ascending by day.
#[must_use]
pub fn daily_update_counts<Tz: TimeZone>(
    issues: &[&Issue],
    window: ReportWindow,
    now: &DateTime<Tz>,
) -> Vec<DayBucket> {
    let tz = now.timezone();
    let cutoff = window.days().map(|days| now.clone() - Duration::days(days));

    let mut buckets: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for issue in issues {
        let updated = issue.updated.with_timezone(&tz);
        if cutoff.as_ref().is_some_and(|cutoff| updated < *cutoff) {
            continue;
        }
        *buckets.entry(updated.date_naive()).or_insert(0) += 1;
    }

    buckets
        .into_iter()
        .map(|(day, count)| DayBucket {
            day: day.format("%Y-%m-%d").to_string(),
            count,
        })
        .collect()
}

/// Everything the reports view shows, for one set of issues.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub completion: CompletionStats,
    pub by_status: Vec<CountEntry>,
    pub by_type: Vec<CountEntry>,
    pub by_priority: Vec<CountEntry>,
    pub window: ReportWindow,
    pub daily_updates: Vec<DayBucket>,
}

impl ReportSummary {
    #[must_use]
    pub fn build<Tz: TimeZone>(issues: &[&Issue], window: ReportWindow, now: &DateTime<Tz>) -> Self {
        Self {
            completion: completion_stats(issues),
            by_status: count_by_status(issues),
            by_type: count_by_type(issues),
            by_priority: count_by_priority(issues),
            window,
            daily_updates: daily_update_counts(issues, window, now),
        }
    }
}
