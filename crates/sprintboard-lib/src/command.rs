//! Store commands as data.
//!
//! `Command` names every state transition the store accepts, so callers
//! that queue or forward work (see `SharedStore`) need a single entry point.

use crate::error::Result;
use crate::model::{Comment, Issue, Status};
use crate::query::{FilterPatch, IssueUpdate, Modal, NewIssue};
use crate::store::IssueStore;

/// A request to change store state.
#[derive(Debug, Clone)]
pub enum Command {
    CreateIssue(NewIssue),
    UpdateIssue {
        id: String,
        update: IssueUpdate,
    },
    DeleteIssue {
        id: String,
    },
    MoveIssueToStatus {
        id: String,
        status: Status,
    },
    /// `user` is resolved with `IssueStore::find_user`; `None` unassigns.
    AssignIssue {
        id: String,
        user: Option<String>,
    },
    SetSearchQuery(String),
    SetFilters(FilterPatch),
    SelectIssue(Option<String>),
    SetModalOpen {
        modal: Modal,
        open: bool,
    },
    OpenIssueDetail {
        id: String,
    },
    CloseIssueDetail,
    AddComment {
        issue_id: String,
        author: String,
        body: String,
    },
    SetCurrentSprint(Option<String>),
    SetCurrentProject(String),
    ReplaceIssues(Vec<Issue>),
}

/// What a successfully applied command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The issue as it stands after the command.
    Issue(Issue),
    /// The issue that was removed.
    Deleted(Issue),
    Comment(Comment),
    /// Number of issues now in the store.
    Replaced(usize),
    /// A state-only change with nothing to return.
    Applied,
}

impl IssueStore {
    /// Apply one command.
    ///
    /// # Errors
    ///
    /// Returns whatever the underlying command method returns; the store is
    /// unchanged on error.
    pub fn apply(&mut self, command: Command) -> Result<CommandOutcome> {
        let outcome = match command {
            Command::CreateIssue(new) => CommandOutcome::Issue(self.create_issue(new)?),
            Command::UpdateIssue { id, update } => {
                CommandOutcome::Issue(self.update_issue(&id, &update)?)
            }
            Command::DeleteIssue { id } => CommandOutcome::Deleted(self.delete_issue(&id)?),
            Command::MoveIssueToStatus { id, status } => {
                CommandOutcome::Issue(self.move_issue_to_status(&id, status)?)
            }
            Command::AssignIssue { id, user } => {
                let user = user
                    .as_deref()
                    .map(|name| self.find_user(name).cloned())
                    .transpose()?;
                CommandOutcome::Issue(self.assign_issue(&id, user.as_ref())?)
            }
            Command::SetSearchQuery(query) => {
                self.set_search_query(query);
                CommandOutcome::Applied
            }
            Command::SetFilters(patch) => {
                self.set_filters(patch);
                CommandOutcome::Applied
            }
            Command::SelectIssue(id) => {
                self.select_issue(id.as_deref())?;
                CommandOutcome::Applied
            }
            Command::SetModalOpen { modal, open } => {
                self.set_modal_open(modal, open);
                CommandOutcome::Applied
            }
            Command::OpenIssueDetail { id } => {
                self.open_issue_detail(&id)?;
                CommandOutcome::Applied
            }
            Command::CloseIssueDetail => {
                self.close_issue_detail();
                CommandOutcome::Applied
            }
            Command::AddComment {
                issue_id,
                author,
                body,
            } => CommandOutcome::Comment(self.add_comment(&issue_id, &author, &body)?),
            Command::SetCurrentSprint(id) => {
                self.set_current_sprint(id.as_deref())?;
                CommandOutcome::Applied
            }
            Command::SetCurrentProject(id) => {
                self.set_current_project(&id)?;
                CommandOutcome::Applied
            }
            Command::ReplaceIssues(issues) => CommandOutcome::Replaced(self.replace_issues(issues)?),
        };
        Ok(outcome)
    }
}
