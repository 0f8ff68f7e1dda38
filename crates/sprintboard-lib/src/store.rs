//! In-memory issue store.
//!
//! Owns every issue, user, project and sprint plus the filter and UI slices.
//! Each command either applies completely or returns an error with the store
//! left as it was. Derivations are recomputed on every call.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{BoardError, Result, ValidationError};
use crate::model::{Comment, Issue, PersonRef, Project, Sprint, SprintStatus, Status, User};
use crate::query::{
    FilterCategory, FilterPatch, Filters, IssueUpdate, Modal, NewIssue, Scope, UiState,
    matches_search,
};
use crate::util::{dedup_labels, format_key, generate_id, split_key};
use crate::validation::{CommentValidator, IssueValidator};

/// The issue store.
///
/// Issues are kept in canonical (insertion) order; every listing preserves it.
#[derive(Debug, Clone)]
pub struct IssueStore {
    issues: Vec<Issue>,
    users: Vec<User>,
    projects: Vec<Project>,
    sprints: Vec<Sprint>,
    current_project: Option<String>,
    current_sprint: Option<String>,
    /// Next key number per project key. Never decreases.
    key_counters: HashMap<String, u64>,
    comments: HashMap<String, Vec<Comment>>,
    next_comment_id: i64,
    search_query: String,
    filters: Filters,
    ui: UiState,
    clock: Arc<dyn Clock>,
}

/// Distinct values offered by each filter category, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct Facets {
    pub assignee: Vec<String>,
    pub status: Vec<String>,
    #[serde(rename = "type")]
    pub issue_type: Vec<String>,
    pub priority: Vec<String>,
}

impl Facets {
    #[must_use]
    pub fn get(&self, category: FilterCategory) -> &[String] {
        match category {
            FilterCategory::Assignee => &self.assignee,
            FilterCategory::Status => &self.status,
            FilterCategory::Type => &self.issue_type,
            FilterCategory::Priority => &self.priority,
        }
    }
}

impl IssueStore {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Create an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store stamping timestamps from `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            issues: Vec::new(),
            users: Vec::new(),
            projects: Vec::new(),
            sprints: Vec::new(),
            current_project: None,
            current_sprint: None,
            key_counters: HashMap::new(),
            comments: HashMap::new(),
            next_comment_id: 1,
            search_query: String::new(),
            filters: Filters::default(),
            ui: UiState::default(),
            clock,
        }
    }

    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a user with the same id exists.
    pub fn add_user(&mut self, user: User) -> Result<()> {
        if self.user(&user.id).is_some() {
            return Err(BoardError::validation(
                "id",
                format!("duplicate user id '{}'", user.id),
            ));
        }
        self.users.push(user);
        Ok(())
    }

    /// Register a project. The first project becomes the current one.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the id or key is already taken.
    pub fn add_project(&mut self, project: Project) -> Result<()> {
        if self.projects.iter().any(|p| p.id == project.id) {
            return Err(BoardError::validation(
                "id",
                format!("duplicate project id '{}'", project.id),
            ));
        }
        if self.projects.iter().any(|p| p.key == project.key) {
            return Err(BoardError::validation(
                "key",
                format!("duplicate project key '{}'", project.key),
            ));
        }
        self.key_counters.entry(project.key.clone()).or_insert(1);
        if self.current_project.is_none() {
            self.current_project = Some(project.id.clone());
        }
        self.projects.push(project);
        Ok(())
    }

    /// Register a sprint. The first active sprint becomes the current one.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if a sprint with the same id exists or the
    /// sprint ends before it starts.
    pub fn add_sprint(&mut self, sprint: Sprint) -> Result<()> {
        if self.sprint(&sprint.id).is_some() {
            return Err(BoardError::validation(
                "id",
                format!("duplicate sprint id '{}'", sprint.id),
            ));
        }
        if sprint.end_date < sprint.start_date {
            return Err(BoardError::validation("endDate", "cannot be before startDate"));
        }
        if self.current_sprint.is_none() && sprint.status == SprintStatus::Active {
            self.current_sprint = Some(sprint.id.clone());
        }
        self.sprints.push(sprint);
        Ok(())
    }

    /// Insert a fully formed issue as-is (seed data, fixtures).
    ///
    /// # Errors
    ///
    /// Returns `Validation` if the issue is invalid or its id is taken.
    pub fn insert_issue(&mut self, issue: Issue) -> Result<()> {
        IssueValidator::validate(&issue).map_err(BoardError::from_validation_errors)?;
        if self.issue(&issue.id).is_some() {
            return Err(BoardError::validation(
                "id",
                format!("duplicate issue id '{}'", issue.id),
            ));
        }
        self.observe_key(&issue.key);
        self.issues.push(issue);
        Ok(())
    }

    // ========================================================================
    // Issue Commands
    // ========================================================================

    /// Create an issue in the current project and sprint.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for bad fields and `NoCurrentProject` when no
    /// project is selected.
    pub fn create_issue(&mut self, new: NewIssue) -> Result<Issue> {
        IssueValidator::validate_new(&new).map_err(BoardError::from_validation_errors)?;
        let project_key = self
            .current_project()
            .ok_or(BoardError::NoCurrentProject)?
            .key
            .clone();

        let now = self.now();
        let id = generate_id(
            &new.summary,
            &new.reporter.name,
            now,
            self.issues.len(),
            |candidate| self.issue(candidate).is_some(),
        );
        let key = self.next_key(&project_key);

        let issue = Issue {
            id,
            key,
            summary: new.summary,
            description: new.description,
            issue_type: new.issue_type.unwrap_or_default(),
            status: Status::ToDo,
            priority: new.priority.unwrap_or_default(),
            assignee: new.assignee,
            reporter: new.reporter,
            created: now,
            updated: now,
            story_points: new.story_points,
            labels: dedup_labels(new.labels),
            sprint: self.current_sprint.clone(),
        };
        debug!(id = %issue.id, key = %issue.key, "Created issue");

        self.issues.push(issue.clone());
        self.ui.create_modal_open = false;
        Ok(issue)
    }

    /// Merge the fields present in `update` into an issue.
    ///
    /// `id`, `key`, `created` and `reporter` in the patch are ignored.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound`, `Validation`, or `SprintNotFound` for an
    /// unknown sprint id.
    pub fn update_issue(&mut self, id: &str, update: &IssueUpdate) -> Result<Issue> {
        self.require_issue(id)?;
        IssueValidator::validate_update(update).map_err(BoardError::from_validation_errors)?;
        if let Some(Some(sprint_id)) = &update.sprint {
            if self.sprint(sprint_id).is_none() {
                return Err(BoardError::SprintNotFound {
                    id: sprint_id.clone(),
                });
            }
        }

        let protected = update.protected_fields();
        if !protected.is_empty() {
            debug!(id, fields = ?protected, "Ignoring protected fields in update");
        }

        let now = self.now();
        let issue = self.issue_mut(id)?;
        if let Some(summary) = &update.summary {
            issue.summary.clone_from(summary);
        }
        if let Some(description) = &update.description {
            issue.description.clone_from(description);
        }
        if let Some(issue_type) = update.issue_type {
            issue.issue_type = issue_type;
        }
        if let Some(status) = update.status {
            issue.status = status;
        }
        if let Some(priority) = update.priority {
            issue.priority = priority;
        }
        if let Some(assignee) = &update.assignee {
            issue.assignee.clone_from(assignee);
        }
        if let Some(points) = update.story_points {
            issue.story_points = points;
        }
        if let Some(labels) = &update.labels {
            issue.labels = dedup_labels(labels.clone());
        }
        if let Some(sprint) = &update.sprint {
            issue.sprint.clone_from(sprint);
        }
        issue.touch(now);

        debug!(id, "Updated issue");
        Ok(issue.clone())
    }

    /// Remove an issue and its comments, returning the removed issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn delete_issue(&mut self, id: &str) -> Result<Issue> {
        let index = self
            .issues
            .iter()
            .position(|issue| issue.id == id)
            .ok_or_else(|| BoardError::issue_not_found(id))?;

        let removed = self.issues.remove(index);
        self.comments.remove(id);
        if self.ui.selected_issue.as_deref() == Some(id) {
            self.ui.selected_issue = None;
        }

        debug!(id, key = %removed.key, "Deleted issue");
        Ok(removed)
    }

    /// Move an issue to any status.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn move_issue_to_status(&mut self, id: &str, status: Status) -> Result<Issue> {
        let now = self.now();
        let issue = self.issue_mut(id)?;
        issue.status = status;
        issue.touch(now);

        debug!(id, status = %status, "Moved issue");
        Ok(issue.clone())
    }

    /// Assign an issue to `user` (copied by value), or unassign with `None`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist.
    pub fn assign_issue(&mut self, id: &str, user: Option<&User>) -> Result<Issue> {
        let now = self.now();
        let issue = self.issue_mut(id)?;
        issue.assignee = user.map(PersonRef::from);
        issue.touch(now);

        debug!(id, assignee = ?issue.assignee_name(), "Assigned issue");
        Ok(issue.clone())
    }

    /// Replace the whole issue collection in one step.
    ///
    /// Every issue is validated first; on any failure nothing changes.
    /// Key counters advance past the new keys, comments on issues that are
    /// gone are dropped and a selection that no longer resolves is cleared.
    ///
    /// # Errors
    ///
    /// Returns `Validation`/`ValidationErrors` naming the offending ticket.
    pub fn replace_issues(&mut self, issues: Vec<Issue>) -> Result<usize> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        for (index, issue) in issues.iter().enumerate() {
            if let Err(issue_errors) = IssueValidator::validate(issue) {
                errors.extend(issue_errors.into_iter().map(|err| {
                    ValidationError::new(format!("tickets[{index}].{}", err.field), err.message)
                }));
            }
            if !seen.insert(issue.id.as_str()) {
                errors.push(ValidationError::new(
                    format!("tickets[{index}].id"),
                    format!("duplicate id '{}'", issue.id),
                ));
            }
        }
        if !errors.is_empty() {
            return Err(BoardError::from_validation_errors(errors));
        }

        let count = issues.len();
        self.issues = issues;
        let keys: Vec<String> = self.issues.iter().map(|i| i.key.clone()).collect();
        for key in &keys {
            self.observe_key(key);
        }

        let ids: HashSet<&str> = self.issues.iter().map(|i| i.id.as_str()).collect();
        self.comments.retain(|issue_id, _| ids.contains(issue_id.as_str()));
        if self
            .ui
            .selected_issue
            .as_deref()
            .is_some_and(|selected| !ids.contains(selected))
        {
            self.ui.selected_issue = None;
        }

        debug!(count, "Replaced issue collection");
        Ok(count)
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Add a comment to an issue.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the issue doesn't exist, or `Validation`
    /// for a blank author or body.
    pub fn add_comment(&mut self, issue_id: &str, author: &str, body: &str) -> Result<Comment> {
        self.require_issue(issue_id)?;
        CommentValidator::validate(author, body).map_err(BoardError::from_validation_errors)?;

        let comment = Comment {
            id: self.next_comment_id,
            issue_id: issue_id.to_string(),
            author: author.to_string(),
            body: body.to_string(),
            created: self.now(),
        };
        self.next_comment_id += 1;

        self.comments
            .entry(issue_id.to_string())
            .or_default()
            .push(comment.clone());

        debug!(issue_id, comment_id = comment.id, "Added comment");
        Ok(comment)
    }

    /// Comments on an issue, newest first.
    #[must_use]
    pub fn comments(&self, issue_id: &str) -> Vec<&Comment> {
        self.comments
            .get(issue_id)
            .map(|c| c.iter().rev().collect())
            .unwrap_or_default()
    }

    // ========================================================================
    // Search, Filters, UI
    // ========================================================================

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Replace each filter category present in `patch`; others are kept.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        self.filters.apply(patch);
    }

    /// Select an issue by id, or clear the selection.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` for an unknown id.
    pub fn select_issue(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            self.require_issue(id)?;
        }
        self.ui.selected_issue = id.map(str::to_string);
        Ok(())
    }

    pub fn set_modal_open(&mut self, modal: Modal, open: bool) {
        match modal {
            Modal::Create => self.ui.create_modal_open = open,
            Modal::Detail => self.ui.detail_modal_open = open,
        }
    }

    /// Select an issue and open the detail modal.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` for an unknown id.
    pub fn open_issue_detail(&mut self, id: &str) -> Result<()> {
        self.select_issue(Some(id))?;
        self.ui.detail_modal_open = true;
        Ok(())
    }

    pub fn close_issue_detail(&mut self) {
        self.ui.detail_modal_open = false;
        self.ui.selected_issue = None;
    }

    /// Switch the current sprint; `None` leaves no sprint selected.
    ///
    /// # Errors
    ///
    /// Returns `SprintNotFound` for an unknown id.
    pub fn set_current_sprint(&mut self, id: Option<&str>) -> Result<()> {
        if let Some(id) = id {
            if self.sprint(id).is_none() {
                return Err(BoardError::SprintNotFound { id: id.to_string() });
            }
        }
        self.current_sprint = id.map(str::to_string);
        Ok(())
    }

    /// Switch the current project.
    ///
    /// # Errors
    ///
    /// Returns `ProjectNotFound` for an unknown id.
    pub fn set_current_project(&mut self, id: &str) -> Result<()> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Err(BoardError::ProjectNotFound { id: id.to_string() });
        }
        self.current_project = Some(id.to_string());
        Ok(())
    }

    // ========================================================================
    // Read Accessors
    // ========================================================================

    /// All issues in canonical order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|issue| issue.id == id)
    }

    /// Look an issue up by id, then by key (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` when neither matches.
    pub fn resolve(&self, id_or_key: &str) -> Result<&Issue> {
        let input = id_or_key.trim();
        self.issue(input)
            .or_else(|| {
                self.issues
                    .iter()
                    .find(|issue| issue.key.eq_ignore_ascii_case(input))
            })
            .ok_or_else(|| BoardError::issue_not_found(input))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    #[must_use]
    pub fn user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    /// Find a user by id, full name or initials (names case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` when nothing matches.
    pub fn find_user(&self, id_or_name: &str) -> Result<&User> {
        let input = id_or_name.trim();
        self.user(input)
            .or_else(|| {
                self.users.iter().find(|user| {
                    user.name.eq_ignore_ascii_case(input) || user.initials.eq_ignore_ascii_case(input)
                })
            })
            .ok_or_else(|| BoardError::UserNotFound {
                id: input.to_string(),
            })
    }

    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn sprints(&self) -> &[Sprint] {
        &self.sprints
    }

    #[must_use]
    pub fn sprint(&self, id: &str) -> Option<&Sprint> {
        self.sprints.iter().find(|sprint| sprint.id == id)
    }

    #[must_use]
    pub fn current_project(&self) -> Option<&Project> {
        let id = self.current_project.as_deref()?;
        self.projects.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn current_sprint(&self) -> Option<&Sprint> {
        self.sprint(self.current_sprint.as_deref()?)
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    #[must_use]
    pub const fn filters(&self) -> &Filters {
        &self.filters
    }

    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// The selected issue, resolved against the current collection.
    #[must_use]
    pub fn selected_issue(&self) -> Option<&Issue> {
        self.issue(self.ui.selected_issue.as_deref()?)
    }

    /// Ids of the issues in a sprint, derived from `issue.sprint`.
    #[must_use]
    pub fn sprint_issue_ids(&self, sprint_id: &str) -> Vec<&str> {
        self.sprint_issues(sprint_id)
            .into_iter()
            .map(|issue| issue.id.as_str())
            .collect()
    }

    #[must_use]
    pub fn sprint_issues(&self, sprint_id: &str) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.in_sprint(sprint_id))
            .collect()
    }

    /// Distinct values for each filter category across all issues.
    #[must_use]
    pub fn facets(&self) -> Facets {
        fn push_unique(values: &mut Vec<String>, value: &str) {
            if !values.iter().any(|v| v == value) {
                values.push(value.to_string());
            }
        }

        let mut facets = Facets::default();
        for issue in &self.issues {
            if let Some(name) = issue.assignee_name() {
                push_unique(&mut facets.assignee, name);
            }
            push_unique(&mut facets.status, issue.status.as_str());
            push_unique(&mut facets.issue_type, issue.issue_type.as_str());
            push_unique(&mut facets.priority, issue.priority.as_str());
        }
        facets
    }

    // ========================================================================
    // Derivations
    // ========================================================================

    /// Issues passing the search query and filters, in canonical order.
    ///
    /// `Scope::CurrentSprint` also requires membership in the current
    /// sprint and yields nothing when no sprint is current.
    #[must_use]
    pub fn visible_issues(&self, scope: Scope) -> Vec<&Issue> {
        let sprint = match scope {
            Scope::All => None,
            Scope::CurrentSprint => {
                let Some(id) = self.current_sprint.as_deref() else {
                    return Vec::new();
                };
                Some(id)
            }
        };

        self.issues
            .iter()
            .filter(|issue| sprint.is_none_or(|id| issue.in_sprint(id)))
            .filter(|issue| matches_search(issue, &self.search_query))
            .filter(|issue| self.filters.matches(issue))
            .collect()
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn require_issue(&self, id: &str) -> Result<&Issue> {
        self.issue(id).ok_or_else(|| BoardError::issue_not_found(id))
    }

    fn issue_mut(&mut self, id: &str) -> Result<&mut Issue> {
        self.issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or_else(|| BoardError::issue_not_found(id))
    }

    /// Advance the counter for `key`'s project past its number.
    fn observe_key(&mut self, key: &str) {
        if let Some((project_key, number)) = split_key(key) {
            let next = self.key_counters.entry(project_key.to_string()).or_insert(1);
            *next = (*next).max(number.saturating_add(1));
        }
    }

    /// Take the next unused key for `project_key`.
    fn next_key(&mut self, project_key: &str) -> String {
        let counter = self.key_counters.entry(project_key.to_string()).or_insert(1);
        loop {
            let key = format_key(project_key, *counter);
            *counter += 1;
            if !self.issues.iter().any(|issue| issue.key == key) {
                return key;
            }
        }
    }
}

impl Default for IssueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{IssueType, Priority};
    use crate::report::completion_stats;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()
    }

    fn make_store() -> (IssueStore, ManualClock) {
        let clock = ManualClock::new(start());
        let store = IssueStore::with_sample_data_and_clock(Arc::new(clock.clone()));
        (store, clock)
    }

    fn make_new(summary: &str) -> NewIssue {
        NewIssue {
            reporter: PersonRef::new("John Doe", "JD"),
            ..NewIssue::new(summary)
        }
    }

    #[test]
    fn test_create_assigns_next_key_and_defaults() {
        let (mut store, clock) = make_store();
        clock.advance(Duration::minutes(1));

        let created = store.create_issue(make_new("Add dark mode")).unwrap();
        assert_eq!(created.key, "PROJ-129");
        assert_eq!(created.status, Status::ToDo);
        assert_eq!(created.issue_type, IssueType::Task);
        assert_eq!(created.priority, Priority::Medium);
        assert_eq!(created.sprint.as_deref(), Some("1"));
        assert_eq!(created.created, start() + Duration::minutes(1));
        assert_eq!(created.created, created.updated);
        assert!(!created.id.is_empty());
        assert_eq!(store.len(), 7);
        assert_eq!(store.issues().last().map(|i| i.id.as_str()), Some(created.id.as_str()));
    }

    #[test]
    fn test_create_closes_modal() {
        let (mut store, _) = make_store();
        store.set_modal_open(Modal::Create, true);
        store.create_issue(make_new("Modal")).unwrap();
        assert!(!store.ui().create_modal_open);
    }

    #[test]
    fn test_create_rejects_blank_summary_without_mutating() {
        let (mut store, _) = make_store();
        let before = store.issues().to_vec();
        let err = store.create_issue(make_new("   ")).unwrap_err();
        assert!(matches!(err, BoardError::Validation { ref field, .. } if field == "summary"));
        assert_eq!(store.issues(), before.as_slice());

        let next = store.create_issue(make_new("Next")).unwrap();
        assert_eq!(next.key, "PROJ-129", "failed create must not burn a key");
    }

    #[test]
    fn test_create_requires_current_project() {
        let mut store = IssueStore::new();
        let err = store.create_issue(make_new("Orphan")).unwrap_err();
        assert!(matches!(err, BoardError::NoCurrentProject));
    }

    #[test]
    fn test_keys_never_reused_after_delete() {
        let (mut store, _) = make_store();
        let first = store.create_issue(make_new("First")).unwrap();
        store.delete_issue(&first.id).unwrap();
        let second = store.create_issue(make_new("Second")).unwrap();
        assert_eq!(first.key, "PROJ-129");
        assert_eq!(second.key, "PROJ-130");

        store.delete_issue("6").unwrap();
        let third = store.create_issue(make_new("Third")).unwrap();
        assert_eq!(third.key, "PROJ-131");
    }

    #[test]
    fn test_update_ignores_protected_fields() {
        let (mut store, clock) = make_store();
        let before = store.issue("1").cloned().unwrap();
        clock.advance(Duration::minutes(5));

        let update = IssueUpdate {
            id: Some("hijack".to_string()),
            key: Some("PROJ-999".to_string()),
            created: Some(start() - Duration::days(365)),
            reporter: Some(PersonRef::new("Mallory", "M")),
            summary: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = store.update_issue("1", &update).unwrap();

        assert_eq!(updated.id, before.id);
        assert_eq!(updated.key, before.key);
        assert_eq!(updated.created, before.created);
        assert_eq!(updated.reporter, before.reporter);
        assert_eq!(updated.summary, "Renamed");
        assert_eq!(updated.updated, start() + Duration::minutes(5));
        assert!(store.issue("hijack").is_none());
    }

    #[test]
    fn test_update_clears_nullable_fields() {
        let (mut store, _) = make_store();
        let update: IssueUpdate =
            serde_json::from_str(r#"{"assignee": null, "storyPoints": null, "description": null}"#)
                .unwrap();
        let updated = store.update_issue("1", &update).unwrap();
        assert!(updated.assignee.is_none());
        assert!(updated.story_points.is_none());
        assert!(updated.description.is_none());
    }

    #[test]
    fn test_labels_deduplicated_on_create_and_update() {
        let (mut store, _) = make_store();
        let new = NewIssue {
            labels: vec!["backend".to_string(), "backend".to_string()],
            ..make_new("Twice labelled")
        };
        let created = store.create_issue(new).unwrap();
        assert_eq!(created.labels, vec!["backend"]);

        let update = IssueUpdate {
            labels: Some(["ui", "good first issue", "ui"].map(String::from).to_vec()),
            ..Default::default()
        };
        let updated = store.update_issue(&created.id, &update).unwrap();
        assert_eq!(updated.labels, vec!["ui", "good first issue"]);
    }

    #[test]
    fn test_update_rejects_unknown_sprint() {
        let (mut store, _) = make_store();
        let before = store.issue("2").cloned().unwrap();
        let update = IssueUpdate {
            sprint: Some(Some("42".to_string())),
            status: Some(Status::Done),
            ..Default::default()
        };
        let err = store.update_issue("2", &update).unwrap_err();
        assert!(matches!(err, BoardError::SprintNotFound { .. }));
        assert_eq!(store.issue("2"), Some(&before));
    }

    #[test]
    fn test_update_rejects_invalid_values() {
        let (mut store, _) = make_store();
        let update = IssueUpdate {
            story_points: Some(Some(0)),
            ..Default::default()
        };
        assert!(store.update_issue("1", &update).is_err());
        assert_eq!(store.issue("1").and_then(|i| i.story_points), Some(8));
    }

    #[test]
    fn test_commands_on_missing_issue_leave_store_unchanged() {
        let (mut store, _) = make_store();
        store.delete_issue("3").unwrap();
        let before = store.issues().to_vec();

        let update = IssueUpdate {
            summary: Some("ghost".to_string()),
            ..Default::default()
        };
        for err in [
            store.update_issue("3", &update).unwrap_err(),
            store.move_issue_to_status("3", Status::Done).unwrap_err(),
            store.assign_issue("3", None).unwrap_err(),
            store.delete_issue("3").unwrap_err(),
            store.add_comment("3", "You", "hello").unwrap_err(),
        ] {
            assert!(matches!(err, BoardError::IssueNotFound { ref id } if id == "3"));
        }
        assert_eq!(store.issues(), before.as_slice());
    }

    #[test]
    fn test_move_to_done_updates_sprint_stats() {
        let (mut store, _) = make_store();
        let before = completion_stats(&store.sprint_issues("1"));
        assert_eq!((before.done, before.total), (1, 6));

        store.move_issue_to_status("2", Status::Done).unwrap();
        let after = completion_stats(&store.sprint_issues("1"));
        assert_eq!((after.done, after.total, after.percentage), (2, 6, 33));
    }

    #[test]
    fn test_move_allows_any_transition() {
        let (mut store, _) = make_store();
        store.move_issue_to_status("3", Status::ToDo).unwrap();
        assert_eq!(store.issue("3").map(|i| i.status), Some(Status::ToDo));
    }

    #[test]
    fn test_unassign_unassigned_only_touches_updated() {
        let (mut store, clock) = make_store();
        let before = store.issue("4").cloned().unwrap();
        assert!(before.assignee.is_none());
        clock.advance(Duration::minutes(1));

        let after = store.assign_issue("4", None).unwrap();
        assert_eq!(
            Issue {
                updated: before.updated,
                ..after.clone()
            },
            before
        );
        assert!(after.updated > before.updated);
    }

    #[test]
    fn test_assign_copies_user_snapshot() {
        let (mut store, _) = make_store();
        let user = store.find_user("lisa wang").cloned().unwrap();
        let updated = store.assign_issue("4", Some(&user)).unwrap();
        let assignee = updated.assignee.unwrap();
        assert_eq!(assignee.name, "Lisa Wang");
        assert_eq!(assignee.initials, "LW");
        assert_eq!(assignee.avatar, "");
    }

    #[test]
    fn test_delete_clears_selection_and_comments() {
        let (mut store, _) = make_store();
        store.open_issue_detail("5").unwrap();
        store.add_comment("5", "You", "Looks good").unwrap();

        let removed = store.delete_issue("5").unwrap();
        assert_eq!(removed.key, "PROJ-127");
        assert!(store.selected_issue().is_none());
        assert!(store.ui().selected_issue.is_none());
        assert!(store.comments("5").is_empty());
        assert_eq!(store.sprint_issue_ids("1"), vec!["1", "2", "3", "4", "6"]);
        assert!(store.sprint("1").is_some(), "sprint untouched");
    }

    #[test]
    fn test_selected_issue_reflects_later_updates() {
        let (mut store, _) = make_store();
        store.select_issue(Some("2")).unwrap();
        store.move_issue_to_status("2", Status::InReview).unwrap();
        assert_eq!(store.selected_issue().map(|i| i.status), Some(Status::InReview));
        assert!(store.select_issue(Some("nope")).is_err());
        assert_eq!(store.ui().selected_issue.as_deref(), Some("2"));
    }

    #[test]
    fn test_close_issue_detail_clears_selection() {
        let (mut store, _) = make_store();
        store.open_issue_detail("1").unwrap();
        assert!(store.ui().detail_modal_open);
        store.close_issue_detail();
        assert!(!store.ui().detail_modal_open);
        assert!(store.selected_issue().is_none());
    }

    #[test]
    fn test_search_intersects_filters() {
        let (mut store, _) = make_store();
        store.set_search_query("auth");
        let visible: Vec<_> = store
            .visible_issues(Scope::CurrentSprint)
            .iter()
            .map(|i| i.key.as_str())
            .collect();
        assert_eq!(visible, vec!["PROJ-123"]);

        store.set_filters(FilterPatch::default().with(FilterCategory::Type, ["Bug"]));
        assert!(store.visible_issues(Scope::CurrentSprint).is_empty());

        store.set_search_query("");
        let bugs: Vec<_> = store
            .visible_issues(Scope::All)
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(bugs, vec!["2", "6"]);
    }

    #[test]
    fn test_status_filter_uses_status_values() {
        let (mut store, _) = make_store();
        store.set_filters(FilterPatch::default().with(FilterCategory::Status, ["Bug"]));
        assert!(store.visible_issues(Scope::CurrentSprint).is_empty());
    }

    #[test]
    fn test_visible_issues_without_current_sprint_is_empty() {
        let (mut store, _) = make_store();
        store.set_current_sprint(None).unwrap();
        assert!(store.visible_issues(Scope::CurrentSprint).is_empty());
        assert_eq!(store.visible_issues(Scope::All).len(), 6);
        assert!(store.set_current_sprint(Some("9")).is_err());
    }

    #[test]
    fn test_created_issue_joins_current_sprint() {
        let (mut store, _) = make_store();
        let created = store.create_issue(make_new("Sprint member")).unwrap();
        assert!(store.sprint_issue_ids("1").contains(&created.id.as_str()));
    }

    #[test]
    fn test_comments_newest_first() {
        let (mut store, clock) = make_store();
        store.add_comment("1", "You", "first").unwrap();
        clock.advance(Duration::minutes(1));
        store.add_comment("1", "You", "second").unwrap();

        let bodies: Vec<_> = store.comments("1").iter().map(|c| c.body.as_str()).collect();
        assert_eq!(bodies, vec!["second", "first"]);
        assert!(store.add_comment("1", "You", "  ").is_err());
    }

    #[test]
    fn test_resolve_by_id_or_key() {
        let (store, _) = make_store();
        assert_eq!(store.resolve("3").unwrap().key, "PROJ-125");
        assert_eq!(store.resolve("proj-126").unwrap().id, "4");
        assert!(store.resolve("PROJ-999").unwrap_err().is_not_found());
    }

    #[test]
    fn test_find_user_by_name_initials_or_id() {
        let (store, _) = make_store();
        assert_eq!(store.find_user("1").unwrap().name, "Sarah Chen");
        assert_eq!(store.find_user("mj").unwrap().name, "Mike Johnson");
        assert!(matches!(
            store.find_user("nobody"),
            Err(BoardError::UserNotFound { .. })
        ));
    }

    #[test]
    fn test_facets_first_seen_order() {
        let (store, _) = make_store();
        let facets = store.facets();
        assert_eq!(facets.get(FilterCategory::Assignee)[0], "Sarah Chen");
        assert_eq!(facets.assignee.len(), 5);
        assert_eq!(facets.status, vec!["In Progress", "To Do", "Done", "In Review"]);
        assert_eq!(facets.issue_type, vec!["Story", "Bug", "Task", "Epic"]);
    }

    #[test]
    fn test_replace_issues_is_all_or_nothing() {
        let (mut store, _) = make_store();
        let before = store.issues().to_vec();

        let good = Issue {
            id: "a".to_string(),
            key: "PROJ-500".to_string(),
            summary: "Imported".to_string(),
            created: start(),
            updated: start(),
            ..Default::default()
        };
        let bad = Issue {
            id: "b".to_string(),
            summary: String::new(),
            ..good.clone()
        };
        let err = store.replace_issues(vec![good.clone(), bad]).unwrap_err();
        assert!(matches!(err, BoardError::Validation { ref field, .. } if field == "tickets[1].summary"));
        assert_eq!(store.issues(), before.as_slice());

        let dup = store.replace_issues(vec![good.clone(), good.clone()]).unwrap_err();
        assert!(matches!(dup, BoardError::Validation { ref field, .. } if field == "tickets[1].id"));

        store.select_issue(Some("1")).unwrap();
        assert_eq!(store.replace_issues(vec![good]).unwrap(), 1);
        assert!(store.selected_issue().is_none());
        let next = store.create_issue(make_new("After import")).unwrap();
        assert_eq!(next.key, "PROJ-501");
    }

    #[test]
    fn test_set_current_project_switches_key_prefix() {
        let (mut store, _) = make_store();
        store
            .add_project(Project {
                id: "2".to_string(),
                key: "OPS".to_string(),
                name: "Operations".to_string(),
                avatar: String::new(),
                description: None,
            })
            .unwrap();
        store.set_current_project("2").unwrap();
        assert_eq!(store.create_issue(make_new("Ops task")).unwrap().key, "OPS-1");
        assert!(matches!(
            store.set_current_project("9"),
            Err(BoardError::ProjectNotFound { .. })
        ));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Create,
        Delete(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Create), (0usize..16).prop_map(Op::Delete)]
    }

    proptest! {
        #[test]
        fn prop_keys_unique_and_increasing(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let (mut store, clock) = make_store();
            let mut issued: Vec<u64> = Vec::new();

            for op in ops {
                clock.advance(Duration::seconds(1));
                match op {
                    Op::Create => {
                        let created = store.create_issue(make_new("generated")).unwrap();
                        let (_, number) = split_key(&created.key).unwrap();
                        issued.push(number);
                    }
                    Op::Delete(n) => {
                        if !store.is_empty() {
                            let id = store.issues()[n % store.len()].id.clone();
                            store.delete_issue(&id).unwrap();
                        }
                    }
                }
            }

            prop_assert!(issued.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(issued.first().is_none_or(|first| *first >= 129));
            let keys: HashSet<&str> = store.issues().iter().map(|i| i.key.as_str()).collect();
            prop_assert_eq!(keys.len(), store.len());
        }
    }
}
