//! Command payloads, filter state and query scopes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::BoardError;
use crate::model::{Issue, IssueType, PersonRef, Priority, Status};

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
#[allow(clippy::option_option)]
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Fields for a new issue. Everything the store assigns (id, key, status,
/// timestamps, sprint) is absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub summary: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `Task`.
    #[serde(default, rename = "type")]
    pub issue_type: Option<IssueType>,
    /// Defaults to `Medium`.
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignee: Option<PersonRef>,
    #[serde(default)]
    pub reporter: PersonRef,
    #[serde(default)]
    pub story_points: Option<u32>,
    #[serde(default)]
    pub labels: Vec<String>,
}

impl NewIssue {
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Default::default()
        }
    }
}

/// Partial update of an issue.
///
/// `id`, `key`, `created` and `reporter` are accepted so that a whole issue
/// can be sent back as a patch, but they are never applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::option_option)]
pub struct IssueUpdate {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, rename = "type")]
    pub issue_type: Option<IssueType>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default, deserialize_with = "double_option")]
    pub assignee: Option<Option<PersonRef>>,
    #[serde(default, deserialize_with = "double_option")]
    pub story_points: Option<Option<u32>>,
    #[serde(default)]
    pub labels: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub sprint: Option<Option<String>>,

    // Protected: ignored by the store.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reporter: Option<PersonRef>,
}

impl IssueUpdate {
    /// True when no applicable field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.summary.is_none()
            && self.description.is_none()
            && self.issue_type.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assignee.is_none()
            && self.story_points.is_none()
            && self.labels.is_none()
            && self.sprint.is_none()
    }

    /// Names of protected fields present in this patch.
    #[must_use]
    pub fn protected_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.id.is_some() {
            fields.push("id");
        }
        if self.key.is_some() {
            fields.push("key");
        }
        if self.created.is_some() {
            fields.push("created");
        }
        if self.reporter.is_some() {
            fields.push("reporter");
        }
        fields
    }
}

/// One of the four filter categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCategory {
    Assignee,
    Status,
    Type,
    Priority,
}

impl FilterCategory {
    pub const ALL: [Self; 4] = [Self::Assignee, Self::Status, Self::Type, Self::Priority];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Assignee => "assignee",
            Self::Status => "status",
            Self::Type => "type",
            Self::Priority => "priority",
        }
    }

    /// The string an issue exposes for this category; `None` when unassigned.
    #[must_use]
    pub fn value_of<'a>(&self, issue: &'a Issue) -> Option<&'a str> {
        match self {
            Self::Assignee => issue.assignee_name(),
            Self::Status => Some(issue.status.as_str()),
            Self::Type => Some(issue.issue_type.as_str()),
            Self::Priority => Some(issue.priority.as_str()),
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCategory {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assignee" => Ok(Self::Assignee),
            "status" => Ok(Self::Status),
            "type" => Ok(Self::Type),
            "priority" => Ok(Self::Priority),
            _ => Err(BoardError::InvalidFilterCategory {
                category: s.to_string(),
            }),
        }
    }
}

/// Selected filter values. AND across categories, OR within one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub assignee: BTreeSet<String>,
    pub status: BTreeSet<String>,
    #[serde(rename = "type")]
    pub issue_type: BTreeSet<String>,
    pub priority: BTreeSet<String>,
}

impl Filters {
    #[must_use]
    pub const fn get(&self, category: FilterCategory) -> &BTreeSet<String> {
        match category {
            FilterCategory::Assignee => &self.assignee,
            FilterCategory::Status => &self.status,
            FilterCategory::Type => &self.issue_type,
            FilterCategory::Priority => &self.priority,
        }
    }

    fn get_mut(&mut self, category: FilterCategory) -> &mut BTreeSet<String> {
        match category {
            FilterCategory::Assignee => &mut self.assignee,
            FilterCategory::Status => &mut self.status,
            FilterCategory::Type => &mut self.issue_type,
            FilterCategory::Priority => &mut self.priority,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterCategory::ALL.iter().all(|c| self.get(*c).is_empty())
    }

    /// Whether `issue` passes every non-empty category.
    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        FilterCategory::ALL.iter().all(|category| {
            let selected = self.get(*category);
            selected.is_empty()
                || category
                    .value_of(issue)
                    .is_some_and(|value| selected.contains(value))
        })
    }

    /// Replace every category present in `patch`.
    pub fn apply(&mut self, patch: FilterPatch) {
        for (category, values) in patch.into_entries() {
            *self.get_mut(category) = values;
        }
    }

    /// Build the patch that flips `value` within `category`.
    #[must_use]
    pub fn toggled(&self, category: FilterCategory, value: &str) -> FilterPatch {
        let mut next = self.get(category).clone();
        if !next.remove(value) {
            next.insert(value.to_string());
        }
        FilterPatch::default().with(category, next)
    }
}

/// A partial filter update; each present category is replaced wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub assignee: Option<BTreeSet<String>>,
    pub status: Option<BTreeSet<String>>,
    pub issue_type: Option<BTreeSet<String>>,
    pub priority: Option<BTreeSet<String>>,
}

impl FilterPatch {
    #[must_use]
    pub fn with<I, S>(mut self, category: FilterCategory, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set = Some(values.into_iter().map(Into::into).collect());
        match category {
            FilterCategory::Assignee => self.assignee = set,
            FilterCategory::Status => self.status = set,
            FilterCategory::Type => self.issue_type = set,
            FilterCategory::Priority => self.priority = set,
        }
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.assignee.is_none()
            && self.status.is_none()
            && self.issue_type.is_none()
            && self.priority.is_none()
    }

    fn into_entries(self) -> impl Iterator<Item = (FilterCategory, BTreeSet<String>)> {
        [
            (FilterCategory::Assignee, self.assignee),
            (FilterCategory::Status, self.status),
            (FilterCategory::Type, self.issue_type),
            (FilterCategory::Priority, self.priority),
        ]
        .into_iter()
        .filter_map(|(category, values)| values.map(|v| (category, v)))
    }
}

/// Case-insensitive substring match on summary or key. Empty matches all.
#[must_use]
pub fn matches_search(issue: &Issue, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    issue.summary.to_lowercase().contains(&needle) || issue.key.to_lowercase().contains(&needle)
}

/// Which issues a derivation considers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Scope {
    /// Every issue in the store.
    All,
    /// Only issues whose `sprint` is the current sprint.
    #[default]
    CurrentSprint,
}

impl FromStr for Scope {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "sprint" | "current" | "currentsprint" => Ok(Self::CurrentSprint),
            _ => Err(BoardError::validation("scope", format!("unknown scope '{s}'"))),
        }
    }
}

/// UI modal flags kept by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Create,
    Detail,
}

/// UI-only state slice. Carries no business invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    /// Id of the selected issue, resolved against the store on read.
    pub selected_issue: Option<String>,
    pub create_modal_open: bool,
    pub detail_modal_open: bool,
}
