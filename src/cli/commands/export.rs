//! Export command implementation.
//!
//! Writes every issue, regardless of scope, as a tickets document that
//! `--tickets` can read back.

use std::fs;

use anyhow::{Context, Result};
use sprintboard_lib::hydrate::to_document;

use crate::cli::{ExportArgs, Session};

/// Execute the export command.
///
/// # Errors
///
/// Returns an error if serialization fails or the output file cannot be
/// written.
pub fn execute(args: &ExportArgs, session: &Session) -> Result<()> {
    let document = to_document(session.store.issues());
    let content = serde_json::to_string_pretty(&document)?;

    match &args.output {
        Some(path) => {
            fs::write(path, format!("{content}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} issue(s) to {}",
                document.tickets.len(),
                path.display()
            );
        }
        None => println!("{content}"),
    }
    Ok(())
}
