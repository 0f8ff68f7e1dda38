//! Built-in sample board: eight users, one project, one active sprint and
//! six issues, all timed relative to a given "now".

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::clock::Clock;
use crate::model::{Issue, IssueType, PersonRef, Priority, Project, Sprint, SprintStatus, Status, User};
use crate::store::IssueStore;

const USERS: [(&str, &str, &str, &str); 8] = [
    ("1", "Sarah Chen", "sarah@company.com", "SC"),
    ("2", "Mike Johnson", "mike@company.com", "MJ"),
    ("3", "Alex Rodriguez", "alex@company.com", "AR"),
    ("4", "Emma Wilson", "emma@company.com", "EW"),
    ("5", "Chris Lee", "chris@company.com", "CL"),
    ("6", "John Smith", "john@company.com", "JS"),
    ("7", "Emily Davis", "emily@company.com", "ED"),
    ("8", "Lisa Wang", "lisa@company.com", "LW"),
];

struct SeedIssue {
    id: &'static str,
    key: &'static str,
    summary: &'static str,
    description: &'static str,
    issue_type: IssueType,
    status: Status,
    priority: Priority,
    assignee: Option<(&'static str, &'static str)>,
    reporter: (&'static str, &'static str),
    created_ago: Duration,
    updated_ago: Duration,
    story_points: Option<u32>,
}

fn seed_issues() -> [SeedIssue; 6] {
    [
        SeedIssue {
            id: "1",
            key: "PROJ-123",
            summary: "Implement user authentication system with OAuth integration",
            description: "Create a comprehensive authentication system that supports OAuth providers like Google, GitHub, and Microsoft.",
            issue_type: IssueType::Story,
            status: Status::InProgress,
            priority: Priority::High,
            assignee: Some(("Sarah Chen", "SC")),
            reporter: ("John Smith", "JS"),
            created_ago: Duration::days(2),
            updated_ago: Duration::hours(1),
            story_points: Some(8),
        },
        SeedIssue {
            id: "2",
            key: "PROJ-124",
            summary: "Fix memory leak in data processing module",
            description: "Investigate and fix the memory leak that occurs during large data processing operations.",
            issue_type: IssueType::Bug,
            status: Status::ToDo,
            priority: Priority::Highest,
            assignee: Some(("Mike Johnson", "MJ")),
            reporter: ("Emily Davis", "ED"),
            created_ago: Duration::days(1),
            updated_ago: Duration::hours(3),
            story_points: None,
        },
        SeedIssue {
            id: "3",
            key: "PROJ-125",
            summary: "Update API documentation for v2.0 endpoints",
            description: "Comprehensive update of API documentation to reflect all changes in version 2.0.",
            issue_type: IssueType::Task,
            status: Status::Done,
            priority: Priority::Medium,
            assignee: Some(("Alex Rodriguez", "AR")),
            reporter: ("Lisa Wang", "LW"),
            created_ago: Duration::days(5),
            updated_ago: Duration::days(2),
            story_points: Some(3),
        },
        SeedIssue {
            id: "4",
            key: "PROJ-126",
            summary: "Mobile app redesign and UX improvements",
            description: "Complete redesign of the mobile application with focus on user experience and modern design patterns.",
            issue_type: IssueType::Epic,
            status: Status::InProgress,
            priority: Priority::High,
            assignee: None,
            reporter: ("David Kim", "DK"),
            created_ago: Duration::days(7),
            updated_ago: Duration::hours(4),
            story_points: Some(21),
        },
        SeedIssue {
            id: "5",
            key: "PROJ-127",
            summary: "Database performance optimization",
            description: "Optimize database queries and indexes to improve overall application performance.",
            issue_type: IssueType::Task,
            status: Status::InReview,
            priority: Priority::Medium,
            assignee: Some(("Emma Wilson", "EW")),
            reporter: ("Tom Brown", "TB"),
            created_ago: Duration::days(3),
            updated_ago: Duration::minutes(30),
            story_points: Some(5),
        },
        SeedIssue {
            id: "6",
            key: "PROJ-128",
            summary: "Login page crashes on mobile Safari",
            description: "Users report that the login page crashes when accessed through mobile Safari browser.",
            issue_type: IssueType::Bug,
            status: Status::ToDo,
            priority: Priority::High,
            assignee: Some(("Chris Lee", "CL")),
            reporter: ("Anna Taylor", "AT"),
            created_ago: Duration::hours(6),
            updated_ago: Duration::hours(2),
            story_points: None,
        },
    ]
}

impl IssueStore {
    /// The sample board, timed relative to `now`, using the system clock.
    #[must_use]
    pub fn with_sample_data(now: DateTime<Utc>) -> Self {
        let mut store = Self::new();
        store.load_sample_data(now);
        store
    }

    /// The sample board, timed relative to `clock.now()`, stamping later
    /// commands from the same clock.
    #[must_use]
    pub fn with_sample_data_and_clock(clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        let mut store = Self::with_clock(clock);
        store.load_sample_data(now);
        store
    }

    fn load_sample_data(&mut self, now: DateTime<Utc>) {
        // Seed rows are constants; they always satisfy validation.
        for (id, name, email, initials) in USERS {
            let _ = self.add_user(User {
                id: id.to_string(),
                name: name.to_string(),
                email: email.to_string(),
                initials: initials.to_string(),
                avatar: None,
            });
        }

        let _ = self.add_project(Project {
            id: "1".to_string(),
            key: "PROJ".to_string(),
            name: "Project Alpha".to_string(),
            avatar: "🚀".to_string(),
            description: Some("Main project for the team".to_string()),
        });

        let _ = self.add_sprint(Sprint {
            id: "1".to_string(),
            name: "Sprint 1".to_string(),
            start_date: now - Duration::days(14),
            end_date: now + Duration::days(3),
            status: SprintStatus::Active,
        });

        for seed in seed_issues() {
            let _ = self.insert_issue(Issue {
                id: seed.id.to_string(),
                key: seed.key.to_string(),
                summary: seed.summary.to_string(),
                description: Some(seed.description.to_string()),
                issue_type: seed.issue_type,
                status: seed.status,
                priority: seed.priority,
                assignee: seed
                    .assignee
                    .map(|(name, initials)| PersonRef::new(name, initials)),
                reporter: PersonRef::new(seed.reporter.0, seed.reporter.1),
                created: now - seed.created_ago,
                updated: now - seed.updated_ago,
                story_points: seed.story_points,
                labels: Vec::new(),
                sprint: Some("1".to_string()),
            });
        }
    }
}
