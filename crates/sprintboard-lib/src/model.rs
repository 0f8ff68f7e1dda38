//! Core data types for sprintboard-lib.
//!
//! Serialized field names are camelCase so issues round-trip through the
//! same shape as the tickets document used for hydration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;

/// Lowercase a user-supplied enum value and drop separators so that
/// "In Progress", "in_progress" and "in-progress" compare equal.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Board column an issue sits in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "Done")]
    Done,
}

impl Status {
    /// All statuses in board column order.
    pub const ALL: [Self; 4] = [Self::ToDo, Self::InProgress, Self::InReview, Self::Done];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::InReview => "In Review",
            Self::Done => "Done",
        }
    }

    #[must_use]
    pub const fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "todo" => Ok(Self::ToDo),
            "inprogress" => Ok(Self::InProgress),
            "inreview" | "review" => Ok(Self::InReview),
            "done" => Ok(Self::Done),
            _ => Err(BoardError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Issue type category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum IssueType {
    Story,
    Bug,
    #[default]
    Task,
    Epic,
}

impl IssueType {
    pub const ALL: [Self; 4] = [Self::Story, Self::Bug, Self::Task, Self::Epic];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Story => "Story",
            Self::Bug => "Bug",
            Self::Task => "Task",
            Self::Epic => "Epic",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueType {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "story" => Ok(Self::Story),
            "bug" => Ok(Self::Bug),
            "task" => Ok(Self::Task),
            "epic" => Ok(Self::Epic),
            _ => Err(BoardError::InvalidType {
                issue_type: s.to_string(),
            }),
        }
    }
}

/// Issue priority, ordered from `Lowest` to `Highest`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Priority {
    Lowest,
    Low,
    #[default]
    Medium,
    High,
    Highest,
}

impl Priority {
    pub const ALL: [Self; 5] = [
        Self::Lowest,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Highest,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lowest => "Lowest",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Highest => "Highest",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "lowest" => Ok(Self::Lowest),
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "highest" => Ok(Self::Highest),
            _ => Err(BoardError::InvalidPriority {
                priority: s.to_string(),
            }),
        }
    }
}

/// Sprint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SprintStatus {
    Active,
    Completed,
    #[default]
    Future,
}

impl SprintStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Future => "future",
        }
    }
}

impl fmt::Display for SprintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SprintStatus {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "future" => Ok(Self::Future),
            _ => Err(BoardError::InvalidSprintStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// Copied-by-value summary of a person, stored on an issue as its
/// assignee or reporter. Later edits to the `User` do not reach it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PersonRef {
    pub name: String,
    pub initials: String,
    #[serde(default)]
    pub avatar: String,
}

impl PersonRef {
    #[must_use]
    pub fn new(name: impl Into<String>, initials: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initials: initials.into(),
            avatar: String::new(),
        }
    }
}

impl From<&User> for PersonRef {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            initials: user.initials.clone(),
            avatar: user.avatar.clone().unwrap_or_default(),
        }
    }
}

/// The primary issue entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Opaque, stable identifier.
    pub id: String,

    /// Human key, e.g. "PROJ-123". Never changes once assigned.
    pub key: String,

    pub summary: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub issue_type: IssueType,

    pub status: Status,

    pub priority: Priority,

    /// Assignee snapshot; serialized as `null` when unassigned.
    #[serde(default)]
    pub assignee: Option<PersonRef>,

    /// Reporter snapshot, set once at creation.
    pub reporter: PersonRef,

    pub created: DateTime<Utc>,

    pub updated: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Sprint this issue belongs to. The single source of sprint membership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint: Option<String>,
}

impl Default for Issue {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            key: String::new(),
            summary: String::new(),
            description: None,
            issue_type: IssueType::default(),
            status: Status::default(),
            priority: Priority::default(),
            assignee: None,
            reporter: PersonRef::default(),
            created: now,
            updated: now,
            story_points: None,
            labels: Vec::new(),
            sprint: None,
        }
    }
}

impl Issue {
    /// Advance `updated` to `now`, never letting it fall behind `created`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated = now.max(self.created);
    }

    #[must_use]
    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_ref().map(|a| a.name.as_str())
    }

    #[must_use]
    pub fn in_sprint(&self, sprint_id: &str) -> bool {
        self.sprint.as_deref() == Some(sprint_id)
    }
}

/// A person who can be assigned issues. Reference data; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub initials: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A project; its `key` prefixes every issue key it hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub key: String,
    pub name: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A time-boxed grouping of issues.
///
/// Membership is not stored here; see `IssueStore::sprint_issue_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sprint {
    pub id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SprintStatus,
}

/// A comment on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub issue_id: String,
    pub author: String,
    pub body: String,
    pub created: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_status_parse_accepts_display_and_snake_forms() {
        assert_eq!("To Do".parse::<Status>().unwrap(), Status::ToDo);
        assert_eq!("in_progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("IN-REVIEW".parse::<Status>().unwrap(), Status::InReview);
        assert_eq!("done".parse::<Status>().unwrap(), Status::Done);
        assert!(matches!(
            "Bug".parse::<Status>(),
            Err(BoardError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_status_serde_uses_display_names() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let back: Status = serde_json::from_str("\"To Do\"").unwrap();
        assert_eq!(back, Status::ToDo);
    }

    #[test]
    fn test_type_and_priority_parse() {
        assert_eq!("story".parse::<IssueType>().unwrap(), IssueType::Story);
        assert!("feature".parse::<IssueType>().is_err());
        assert_eq!("HIGHEST".parse::<Priority>().unwrap(), Priority::Highest);
        assert!("P0".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_ordering() {
        assert!(Priority::Lowest < Priority::Low);
        assert!(Priority::High < Priority::Highest);
        assert_eq!(Priority::ALL.iter().max(), Some(&Priority::Highest));
    }

    #[test]
    fn test_defaults_match_create_form() {
        assert_eq!(IssueType::default(), IssueType::Task);
        assert_eq!(Priority::default(), Priority::Medium);
        assert_eq!(Status::default(), Status::ToDo);
    }

    #[test]
    fn test_touch_never_precedes_created() {
        let created = Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap();
        let mut issue = Issue {
            created,
            updated: created,
            ..Default::default()
        };
        issue.touch(created - Duration::hours(1));
        assert_eq!(issue.updated, created);
        issue.touch(created + Duration::hours(2));
        assert_eq!(issue.updated, created + Duration::hours(2));
    }

    #[test]
    fn test_person_ref_copies_user_fields() {
        let user = User {
            id: "1".to_string(),
            name: "Sarah Chen".to_string(),
            email: "sarah@company.com".to_string(),
            initials: "SC".to_string(),
            avatar: None,
        };
        let snapshot = PersonRef::from(&user);
        assert_eq!(snapshot.name, "Sarah Chen");
        assert_eq!(snapshot.initials, "SC");
        assert_eq!(snapshot.avatar, "");
    }

    #[test]
    fn test_issue_serializes_camel_case_and_null_assignee() {
        let issue = Issue {
            id: "1".to_string(),
            key: "PROJ-1".to_string(),
            summary: "Test".to_string(),
            story_points: Some(3),
            ..Default::default()
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["type"], "Task");
        assert_eq!(value["storyPoints"], 3);
        assert!(value["assignee"].is_null());
        assert!(value.get("labels").is_none());
    }
}
