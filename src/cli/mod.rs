//! Command-line interface for `sprintboard`.
//!
//! This module provides the CLI parsing and command routing using clap.

pub mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use sprintboard_lib::{IssueStore, IssueType, Priority, ReportWindow, Scope, Status};
use tracing::debug;

use crate::config::{self, CliOverrides, Config};
use crate::logging;

/// `sprintboard` (sb) - Sprint board issue tracker.
#[derive(Parser, Debug)]
#[command(name = "sb")]
#[command(
    author,
    version,
    about = "Sprint board issue tracker",
    long_about = None,
    after_help = "State lives in memory for one invocation; hydrate from a tickets document with --tickets."
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Tickets document to hydrate from
    #[arg(long, global = true, value_name = "PATH")]
    pub tickets: Option<PathBuf>,

    /// Keep the built-in sample issues
    #[arg(long, global = true)]
    pub no_hydrate: bool,

    /// Consider every issue, not just the current sprint
    #[arg(long, global = true)]
    pub all: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List visible issues with completion stats
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show issues in four status columns
    Board(BoardArgs),

    /// Show issue details and comments
    Show(ShowArgs),

    /// Counts by status, type and priority plus daily activity
    Report(ReportArgs),

    /// Create a new issue in the current sprint
    Create(CreateArgs),

    /// Update fields of an existing issue
    Update(UpdateArgs),

    /// Move an issue to another status column
    Move(MoveArgs),

    /// Assign an issue to a user, or unassign it
    Assign(AssignArgs),

    /// Delete an issue and its comments
    Delete(DeleteArgs),

    /// Add a comment to an issue
    Comment(CommentArgs),

    /// List users
    Users,

    /// List projects
    Projects,

    /// List sprints
    Sprints,

    /// Write the issues as a tickets document
    Export(ExportArgs),

    /// Show version information
    Version,
}

/// Search and filter flags shared by list-like views.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Case-insensitive match on summary or key
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by assignee name, id or initials (repeatable)
    #[arg(long)]
    pub assignee: Vec<String>,

    /// Filter by status (repeatable)
    #[arg(long)]
    pub status: Vec<Status>,

    /// Filter by issue type (repeatable)
    #[arg(long = "type", short = 't')]
    pub type_: Vec<IssueType>,

    /// Filter by priority (repeatable)
    #[arg(short, long)]
    pub priority: Vec<Priority>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Debug)]
pub struct BoardArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Column width in terminal cells
    #[arg(long, default_value_t = 30)]
    pub width: usize,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Issue id or key
    pub id: String,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Activity window: 7, 14, 30, 90 or all
    #[arg(short, long)]
    pub window: Option<ReportWindow>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// One-line summary
    pub summary: String,

    #[arg(short, long)]
    pub description: Option<String>,

    /// Issue type (default: Task)
    #[arg(long = "type", short = 't')]
    pub type_: Option<IssueType>,

    /// Priority (default: Medium)
    #[arg(short, long)]
    pub priority: Option<Priority>,

    /// Assignee name, id or initials
    #[arg(short, long)]
    pub assignee: Option<String>,

    /// Story point estimate
    #[arg(long)]
    pub points: Option<u32>,

    /// Label (repeatable)
    #[arg(short, long = "label")]
    pub labels: Vec<String>,
}

#[derive(Args, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct UpdateArgs {
    /// Issue id or key
    pub id: String,

    #[arg(long)]
    pub summary: Option<String>,

    #[arg(short, long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    #[arg(long)]
    pub clear_description: bool,

    #[arg(long = "type", short = 't')]
    pub type_: Option<IssueType>,

    #[arg(short, long)]
    pub status: Option<Status>,

    #[arg(short, long)]
    pub priority: Option<Priority>,

    #[arg(long, conflicts_with = "clear_points")]
    pub points: Option<u32>,

    #[arg(long)]
    pub clear_points: bool,

    /// Replace labels (repeatable)
    #[arg(short, long = "label")]
    pub labels: Vec<String>,

    /// Remove all labels
    #[arg(long, conflicts_with = "labels")]
    pub clear_labels: bool,

    /// Move into this sprint
    #[arg(long, conflicts_with = "no_sprint")]
    pub sprint: Option<String>,

    /// Move to the backlog
    #[arg(long)]
    pub no_sprint: bool,
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Issue id or key
    pub id: String,

    /// Target status
    pub status: Status,
}

#[derive(Args, Debug)]
pub struct AssignArgs {
    /// Issue id or key
    pub id: String,

    /// User name, id or initials; omit to unassign
    pub user: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Issue id or key
    pub id: String,
}

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Issue id or key
    pub id: String,

    /// Comment text
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Author (default: configured reporter)
    #[arg(long)]
    pub author: Option<String>,
}

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// One invocation's store plus its effective configuration.
#[derive(Debug)]
pub struct Session {
    pub store: IssueStore,
    pub config: Config,
    pub json: bool,
}

impl Session {
    /// Seed the store and hydrate it when configured to.
    #[must_use]
    pub fn open(config: Config, json: bool) -> Self {
        let mut store = IssueStore::with_sample_data(Utc::now());
        if config.hydrate {
            let outcome = store.hydrate_from_path(&config.tickets);
            debug!(?outcome, tickets = %config.tickets.display(), "Hydration finished");
        }
        Self {
            store,
            config,
            json,
        }
    }

    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.config.scope
    }
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or the command fails.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    let Some(command) = cli.command else {
        println!("sb - Sprint board issue tracker. Use --help for usage.");
        return Ok(());
    };
    if matches!(command, Commands::Version) {
        return commands::version::execute(cli.json);
    }

    let workspace = std::env::current_dir().context("Failed to read current directory")?;
    let overrides = CliOverrides {
        tickets: cli.tickets,
        no_hydrate: cli.no_hydrate,
        all: cli.all,
        report_window: match &command {
            Commands::Report(args) => args.window,
            _ => None,
        },
    };
    let config = config::load(&workspace, &overrides)?;
    debug!(?config, "Loaded configuration");

    let mut session = Session::open(config, cli.json);
    match command {
        Commands::List(args) => commands::list::execute(&args, &mut session),
        Commands::Board(args) => commands::board::execute(&args, &mut session),
        Commands::Show(args) => commands::show::execute(&args, &mut session),
        Commands::Report(_) => commands::report::execute(&session),
        Commands::Create(args) => commands::create::execute(args, &mut session),
        Commands::Update(args) => commands::update::execute(args, &mut session),
        Commands::Move(args) => commands::move_issue::execute(&args, &mut session),
        Commands::Assign(args) => commands::assign::execute(args, &mut session),
        Commands::Delete(args) => commands::delete::execute(&args, &mut session),
        Commands::Comment(args) => commands::comment::execute(args, &mut session),
        Commands::Users => commands::catalog::users(&session),
        Commands::Projects => commands::catalog::projects(&session),
        Commands::Sprints => commands::catalog::sprints(&session),
        Commands::Export(args) => commands::export::execute(&args, &session),
        Commands::Version => commands::version::execute(session.json),
    }
}
