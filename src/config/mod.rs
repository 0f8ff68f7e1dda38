//! Configuration management for `sprintboard`.
//!
//! Layers, lowest precedence first:
//! - Built-in defaults
//! - User config (`<config_dir>/sprintboard/config.yaml`)
//! - Workspace config (`.sprintboard/config.yaml`)
//! - Environment variables (`SPRINTBOARD_*`)
//! - Command-line overrides

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sprintboard_lib::{PersonRef, ReportWindow, Scope};
use thiserror::Error;
use tracing::debug;

pub const WORKSPACE_CONFIG: &str = ".sprintboard/config.yaml";
pub const USER_CONFIG: &str = "sprintboard/config.yaml";
pub const DEFAULT_TICKETS: &str = "mock/tickets.json";

pub const ENV_TICKETS: &str = "SPRINTBOARD_TICKETS";
pub const ENV_REPORTER: &str = "SPRINTBOARD_REPORTER";
pub const ENV_REPORT_WINDOW: &str = "SPRINTBOARD_REPORT_WINDOW";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

/// Effective configuration after all layers are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Tickets document to hydrate from.
    pub tickets: PathBuf,
    pub hydrate: bool,
    /// Reporter stamped on created issues and author of comments.
    pub reporter: PersonRef,
    pub report_window: ReportWindow,
    pub scope: Scope,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickets: PathBuf::from(DEFAULT_TICKETS),
            hydrate: true,
            reporter: PersonRef::new("John Doe", "JD"),
            report_window: ReportWindow::default(),
            scope: Scope::CurrentSprint,
        }
    }
}

/// Values given on the command line; `None`/`false` leave lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub tickets: Option<PathBuf>,
    pub no_hydrate: bool,
    pub all: bool,
    pub report_window: Option<ReportWindow>,
}

/// One YAML file. Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    tickets: Option<PathBuf>,
    hydrate: Option<bool>,
    reporter: Option<ReporterConfig>,
    report_window: Option<ReportWindow>,
    scope: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReporterConfig {
    name: String,
    #[serde(default)]
    initials: Option<String>,
}

impl Config {
    fn merge_file(&mut self, file: ConfigFile) -> Result<(), ConfigError> {
        if let Some(tickets) = file.tickets {
            self.tickets = tickets;
        }
        if let Some(hydrate) = file.hydrate {
            self.hydrate = hydrate;
        }
        if let Some(reporter) = file.reporter {
            let initials = reporter
                .initials
                .unwrap_or_else(|| initials_of(&reporter.name));
            self.reporter = PersonRef::new(reporter.name, initials);
        }
        if let Some(window) = file.report_window {
            self.report_window = window;
        }
        if let Some(scope) = file.scope {
            self.scope = parse_scope(&scope)?;
        }
        Ok(())
    }

    fn merge_env(&mut self, env: &impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(tickets) = env(ENV_TICKETS).filter(|v| !v.trim().is_empty()) {
            self.tickets = PathBuf::from(tickets);
        }
        if let Some(name) = env(ENV_REPORTER).filter(|v| !v.trim().is_empty()) {
            let name = name.trim();
            self.reporter = PersonRef::new(name, initials_of(name));
        }
        if let Some(window) = env(ENV_REPORT_WINDOW) {
            self.report_window = window.parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_REPORT_WINDOW.to_string(),
                value: window.clone(),
            })?;
        }
        Ok(())
    }

    fn merge_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(tickets) = &overrides.tickets {
            self.tickets.clone_from(tickets);
        }
        if overrides.no_hydrate {
            self.hydrate = false;
        }
        if overrides.all {
            self.scope = Scope::All;
        }
        if let Some(window) = overrides.report_window {
            self.report_window = window;
        }
    }
}

fn parse_scope(value: &str) -> Result<Scope, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: "scope".to_string(),
        value: value.to_string(),
    })
}

/// Initials from the first letter of each word, uppercased.
#[must_use]
pub fn initials_of(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

fn read_layer(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(Some(ConfigFile::default()));
    }
    let file = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Loaded config layer");
    Ok(Some(file))
}

/// Load configuration for `workspace` from the real user config directory
/// and process environment.
///
/// # Errors
///
/// Returns an error if a config file exists but cannot be read or parsed,
/// or a value is invalid.
pub fn load(workspace: &Path, overrides: &CliOverrides) -> Result<Config, ConfigError> {
    load_with(
        workspace,
        dirs::config_dir().as_deref(),
        |key| std::env::var(key).ok(),
        overrides,
    )
}

/// Load configuration with an explicit user config directory and
/// environment lookup.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_with(
    workspace: &Path,
    user_config_dir: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
    overrides: &CliOverrides,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(dir) = user_config_dir {
        if let Some(file) = read_layer(&dir.join(USER_CONFIG))? {
            config.merge_file(file)?;
        }
    }
    if let Some(file) = read_layer(&workspace.join(WORKSPACE_CONFIG))? {
        config.merge_file(file)?;
    }
    config.merge_env(&env)?;
    config.merge_overrides(overrides);

    // A relative tickets path is resolved against the workspace.
    if config.tickets.is_relative() {
        config.tickets = workspace.join(&config.tickets);
    }
    Ok(config)
}
