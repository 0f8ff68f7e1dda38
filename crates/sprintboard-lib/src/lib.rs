//! `sprintboard-lib` — in-process issue store for a sprint board.
//!
//! Holds issues, users, projects and sprints in memory, applies a closed
//! set of commands, and derives board columns, completion stats and
//! reports on demand. A tickets document can replace the seeded issues.
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::Utc;
//! use sprintboard_lib::{IssueStore, NewIssue, Scope, Status};
//! use sprintboard_lib::report::completion_stats;
//!
//! let mut store = IssueStore::with_sample_data(Utc::now());
//!
//! // Optional: replace the sample issues with a tickets document
//! store.hydrate_from_path("mock/tickets.json");
//!
//! // Create and move
//! let issue = store.create_issue(NewIssue::new("Add dark mode")).unwrap();
//! store.move_issue_to_status(&issue.id, Status::InProgress).unwrap();
//!
//! // Derive
//! let visible = store.visible_issues(Scope::CurrentSprint);
//! println!("{}% done", completion_stats(&visible).percentage);
//! ```

pub mod clock;
pub mod command;
pub mod error;
pub mod hydrate;
pub mod model;
pub mod query;
pub mod report;
pub mod seed;
pub mod shared;
pub mod store;
pub mod util;
pub mod validation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use command::{Command, CommandOutcome};
pub use error::{BoardError, Result, ValidationError};
pub use hydrate::{HydrationOutcome, TicketDocument};
pub use model::{Comment, Issue, IssueType, PersonRef, Priority, Project, Sprint, SprintStatus, Status, User};
pub use query::{FilterCategory, FilterPatch, Filters, IssueUpdate, Modal, NewIssue, Scope, UiState};
pub use report::{CompletionStats, ReportSummary, ReportWindow, StatusColumn};
pub use shared::SharedStore;
pub use store::{Facets, IssueStore};
