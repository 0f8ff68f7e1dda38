use serde::Serialize;
use sprintboard_lib::report::{CompletionStats, StatusColumn};
use sprintboard_lib::{Comment, Facets, Filters, Issue, Scope};

/// Visible issues plus completion stats for list view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueList<'a> {
    pub scope: Scope,
    pub search: &'a str,
    pub filters: &'a Filters,
    /// Values each filter category can take across all issues.
    pub facets: Facets,
    pub issues: Vec<&'a Issue>,
    pub completion: CompletionStats,
}

/// Status columns for board view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Board<'a> {
    pub sprint: Option<&'a str>,
    pub columns: Vec<StatusColumn<'a>>,
    pub completion: CompletionStats,
}

/// Issue with its comments for show view.
#[derive(Debug, Clone, Serialize)]
pub struct IssueDetails<'a> {
    #[serde(flatten)]
    pub issue: &'a Issue,
    pub comments: Vec<&'a Comment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sprintboard_lib::IssueStore;

    #[test]
    fn test_issue_list_carries_facets() {
        let store = IssueStore::with_sample_data(Utc::now());
        let issues = store.visible_issues(Scope::CurrentSprint);
        let list = IssueList {
            scope: Scope::CurrentSprint,
            search: store.search_query(),
            filters: store.filters(),
            facets: store.facets(),
            completion: sprintboard_lib::report::completion_stats(&issues),
            issues,
        };

        let value = serde_json::to_value(&list).unwrap();
        assert_eq!(value["facets"]["assignee"][0], "Sarah Chen");
        assert!(value["facets"]["type"].as_array().unwrap().contains(&"Epic".into()));
        assert_eq!(value["facets"]["status"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_issue_details_flattens_issue_fields() {
        let mut store = IssueStore::with_sample_data(Utc::now());
        store.add_comment("1", "John Doe", "Looks good").unwrap();
        let details = IssueDetails {
            issue: store.issue("1").unwrap(),
            comments: store.comments("1"),
        };

        let value = serde_json::to_value(&details).unwrap();
        assert_eq!(value["key"], "PROJ-123");
        assert_eq!(value["type"], "Story");
        assert_eq!(value["comments"][0]["body"], "Looks good");
    }
}
