//! Tickets document I/O.
//!
//! A tickets document is a single JSON object `{ "tickets": [...] }` whose
//! entries use the camelCase issue shape with ISO-8601 timestamp strings.
//! Hydration is best effort: any problem leaves the store as it was.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{BoardError, Result};
use crate::model::{Issue, IssueType, PersonRef, Priority, Status};
use crate::store::IssueStore;
use crate::util::dedup_labels;

/// Top-level tickets document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketDocument {
    pub tickets: Vec<IssueDto>,
}

/// One ticket as it appears on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDto {
    pub id: String,
    pub key: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub status: Status,
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<PersonRef>,
    pub reporter: PersonRef,
    pub created: String,
    pub updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
}

impl IssueDto {
    /// Convert to an `Issue`, parsing both timestamps.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTimestamp` if either timestamp is not ISO-8601.
    pub fn into_issue(self) -> Result<Issue> {
        Ok(Issue {
            created: parse_timestamp(&self.created)?,
            updated: parse_timestamp(&self.updated)?,
            id: self.id,
            key: self.key,
            summary: self.summary,
            description: self.description,
            issue_type: self.issue_type,
            status: self.status,
            priority: self.priority,
            assignee: self.assignee,
            reporter: self.reporter,
            story_points: self.story_points,
            labels: dedup_labels(self.labels),
            sprint: self.sprint,
        })
    }
}

impl From<&Issue> for IssueDto {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id.clone(),
            key: issue.key.clone(),
            summary: issue.summary.clone(),
            description: issue.description.clone(),
            issue_type: issue.issue_type,
            status: issue.status,
            priority: issue.priority,
            assignee: issue.assignee.clone(),
            reporter: issue.reporter.clone(),
            created: format_timestamp(issue.created),
            updated: format_timestamp(issue.updated),
            story_points: issue.story_points,
            labels: issue.labels.clone(),
            sprint: issue.sprint.clone(),
        }
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 with an offset, a naive date-time (taken as UTC) or a
/// bare date (UTC midnight).
///
/// # Errors
///
/// Returns `InvalidTimestamp` for anything else.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| BoardError::InvalidTimestamp {
            value: value.to_string(),
        })
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a tickets document into issues, in document order.
///
/// # Errors
///
/// Returns `HydrationParse` for malformed JSON or unknown enum values, and
/// `InvalidTimestamp` for bad dates.
pub fn parse_document(content: &str) -> Result<Vec<Issue>> {
    let document: TicketDocument =
        serde_json::from_str(content).map_err(|e| BoardError::HydrationParse {
            reason: e.to_string(),
        })?;
    document
        .tickets
        .into_iter()
        .map(IssueDto::into_issue)
        .collect()
}

/// Load a tickets document from disk.
///
/// # Errors
///
/// Returns `FileNotFound` if the file is missing, `Io` if it cannot be
/// read, or any error from [`parse_document`].
pub fn load(path: &Path) -> Result<Vec<Issue>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            BoardError::FileNotFound(path.to_path_buf())
        } else {
            BoardError::Io(e)
        }
    })?;
    parse_document(&content)
}

/// Build a tickets document from issues, preserving their order.
#[must_use]
pub fn to_document(issues: &[Issue]) -> TicketDocument {
    TicketDocument {
        tickets: issues.iter().map(IssueDto::from).collect(),
    }
}

/// Result of a hydration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// The issue collection was replaced with this many tickets.
    Replaced(usize),
    /// Hydration did not happen; the existing issues are kept.
    Skipped(String),
}

impl HydrationOutcome {
    #[must_use]
    pub const fn is_replaced(&self) -> bool {
        matches!(self, Self::Replaced(_))
    }
}

impl IssueStore {
    /// Replace the issue collection with the tickets at `path`.
    ///
    /// Never fails: problems are logged and reported as `Skipped`.
    pub fn hydrate_from_path(&mut self, path: impl AsRef<Path>) -> HydrationOutcome {
        let path = path.as_ref();
        self.hydrate_loaded(&path.display().to_string(), load(path))
    }

    /// Apply an already loaded (or failed) tickets document.
    pub fn hydrate_loaded(&mut self, source: &str, loaded: Result<Vec<Issue>>) -> HydrationOutcome {
        let issues = match loaded {
            Ok(issues) => issues,
            Err(err @ BoardError::FileNotFound(_)) => {
                debug!(source, "No tickets document; keeping seeded issues");
                return HydrationOutcome::Skipped(err.to_string());
            }
            Err(err) => {
                warn!(source, error = %err, "Skipping hydration");
                return HydrationOutcome::Skipped(err.to_string());
            }
        };

        if issues.is_empty() {
            debug!(source, "Tickets document is empty; keeping seeded issues");
            return HydrationOutcome::Skipped("no tickets".to_string());
        }

        match self.replace_issues(issues) {
            Ok(count) => {
                info!(source, count, "Hydrated issues");
                HydrationOutcome::Replaced(count)
            }
            Err(err) => {
                warn!(source, error = %err, "Skipping hydration");
                HydrationOutcome::Skipped(err.to_string())
            }
        }
    }
}
