//! Command implementations.
//!
//! Each command takes the parsed args and the invocation's [`Session`];
//! mutations go through `IssueStore::apply` so the CLI and embedders share
//! one command surface.

pub mod assign;
pub mod board;
pub mod catalog;
pub mod comment;
pub mod create;
pub mod delete;
pub mod export;
pub mod list;
pub mod move_issue;
pub mod report;
pub mod show;
pub mod update;
pub mod version;

use anyhow::{Result, anyhow};
use serde::Serialize;
use sprintboard_lib::{
    Command, CommandOutcome, FilterCategory, FilterPatch, Issue, IssueType, PersonRef, Priority, Status,
};

use crate::cli::{FilterArgs, Session};

/// Resolve an id or key argument to the issue id.
pub(crate) fn resolve_id(session: &Session, id_or_key: &str) -> Result<String> {
    Ok(session.store.resolve(id_or_key)?.id.clone())
}

/// Resolve a user argument to the reference stored on issues.
pub(crate) fn resolve_person(session: &Session, user: &str) -> Result<PersonRef> {
    Ok(PersonRef::from(session.store.find_user(user)?))
}

/// Apply a command that yields an issue.
pub(crate) fn apply_for_issue(session: &mut Session, command: Command) -> Result<Issue> {
    match session.store.apply(command)? {
        CommandOutcome::Issue(issue) | CommandOutcome::Deleted(issue) => Ok(issue),
        other => Err(anyhow!("Unexpected command outcome: {other:?}")),
    }
}

/// Push search and filter flags into the store.
///
/// Values are canonicalised to the display strings filters match on.
/// Assignees resolve through the user directory, then through the names
/// present on issues (snapshots of users outside the directory); anything
/// else is kept verbatim and simply matches nothing.
pub(crate) fn apply_filters(filter: &FilterArgs, session: &mut Session) -> Result<()> {
    if let Some(query) = &filter.search {
        session.store.apply(Command::SetSearchQuery(query.clone()))?;
    }

    let mut patch = FilterPatch::default();
    if !filter.assignee.is_empty() {
        let known = session.store.facets().assignee;
        let names: Vec<String> = filter
            .assignee
            .iter()
            .map(|user| assignee_filter_value(session, &known, user))
            .collect();
        patch = patch.with(FilterCategory::Assignee, names);
    }
    if !filter.status.is_empty() {
        patch = patch.with(FilterCategory::Status, filter.status.iter().map(Status::as_str));
    }
    if !filter.type_.is_empty() {
        patch = patch.with(FilterCategory::Type, filter.type_.iter().map(IssueType::as_str));
    }
    if !filter.priority.is_empty() {
        patch = patch.with(FilterCategory::Priority, filter.priority.iter().map(Priority::as_str));
    }
    if !patch.is_empty() {
        session.store.apply(Command::SetFilters(patch))?;
    }
    Ok(())
}

fn assignee_filter_value(session: &Session, known: &[String], user: &str) -> String {
    if let Ok(found) = session.store.find_user(user) {
        return found.name.clone();
    }
    known
        .iter()
        .find(|name| name.eq_ignore_ascii_case(user.trim()))
        .cloned()
        .unwrap_or_else(|| user.to_string())
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::cli::Session;
    use crate::config::Config;

    /// Session over the seeded board, never touching disk.
    pub fn make_session() -> Session {
        let config = Config {
            hydrate: false,
            ..Config::default()
        };
        Session::open(config, false)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::make_session;
    use super::*;
    use sprintboard_lib::{IssueUpdate, Scope};

    #[test]
    fn test_resolve_id_accepts_key() {
        let session = make_session();
        assert_eq!(resolve_id(&session, "proj-124").unwrap(), "2");
        assert!(resolve_id(&session, "PROJ-999").is_err());
    }

    #[test]
    fn test_apply_filters_canonicalises_values() {
        let mut session = make_session();
        let filter = FilterArgs {
            assignee: vec!["sc".to_string()],
            status: vec![Status::InProgress],
            ..FilterArgs::default()
        };
        apply_filters(&filter, &mut session).unwrap();

        assert!(session.store.filters().assignee.contains("Sarah Chen"));
        assert!(session.store.filters().status.contains("In Progress"));
        let visible = session.store.visible_issues(Scope::CurrentSprint);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].key, "PROJ-123");
    }

    #[test]
    fn test_apply_filters_matches_snapshot_only_assignee() {
        let mut session = make_session();
        let update = IssueUpdate {
            assignee: Some(Some(PersonRef::new("David Kim", "DK"))),
            ..IssueUpdate::default()
        };
        session.store.update_issue("4", &update).unwrap();

        let filter = FilterArgs {
            assignee: vec!["david kim".to_string()],
            ..FilterArgs::default()
        };
        apply_filters(&filter, &mut session).unwrap();

        assert!(session.store.filters().assignee.contains("David Kim"));
        let visible = session.store.visible_issues(Scope::CurrentSprint);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].key, "PROJ-126");
    }

    #[test]
    fn test_apply_filters_unknown_assignee_matches_nothing() {
        let mut session = make_session();
        let filter = FilterArgs {
            assignee: vec!["Nobody".to_string()],
            ..FilterArgs::default()
        };
        apply_filters(&filter, &mut session).unwrap();
        assert!(session.store.filters().assignee.contains("Nobody"));
        assert!(session.store.visible_issues(Scope::CurrentSprint).is_empty());
    }

    #[test]
    fn test_search_matches_key() {
        let mut session = make_session();
        let filter = FilterArgs {
            search: Some("proj-12".to_string()),
            ..FilterArgs::default()
        };
        apply_filters(&filter, &mut session).unwrap();
        assert_eq!(session.store.visible_issues(Scope::CurrentSprint).len(), 6);
    }
}
