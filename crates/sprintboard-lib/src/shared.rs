//! Thread-safe handle to an `IssueStore`.
//!
//! Commands, hydration and reads all go through one mutex, so a hydration
//! swap can never interleave with a half-applied command.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::command::{Command, CommandOutcome};
use crate::error::{BoardError, Result};
use crate::hydrate::{self, HydrationOutcome};
use crate::store::IssueStore;

/// Cloneable, shareable store handle. Clones refer to the same store.
#[derive(Debug, Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<IssueStore>>,
}

impl SharedStore {
    #[must_use]
    pub fn new(store: IssueStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, IssueStore>> {
        self.inner.lock().map_err(|_| BoardError::Poisoned)
    }

    /// Apply one command under the lock.
    ///
    /// # Errors
    ///
    /// Returns `Poisoned` if another thread panicked while holding the
    /// lock, or the command's own error.
    pub fn dispatch(&self, command: Command) -> Result<CommandOutcome> {
        self.lock()?.apply(command)
    }

    /// Read the tickets document, then swap it in under the lock.
    ///
    /// The file is read before the lock is taken; only the swap is
    /// serialised with commands.
    ///
    /// # Errors
    ///
    /// Returns `Poisoned` only; hydration problems are reported as
    /// `HydrationOutcome::Skipped`.
    pub fn hydrate_from_path(&self, path: impl AsRef<Path>) -> Result<HydrationOutcome> {
        let path = path.as_ref();
        let loaded = hydrate::load(path);
        Ok(self
            .lock()?
            .hydrate_loaded(&path.display().to_string(), loaded))
    }

    /// Run `f` against a consistent view of the store.
    ///
    /// # Errors
    ///
    /// Returns `Poisoned` if the lock is poisoned.
    pub fn read<R>(&self, f: impl FnOnce(&IssueStore) -> R) -> Result<R> {
        let guard = self.lock()?;
        Ok(f(&guard))
    }

    /// Clone the whole store.
    ///
    /// # Errors
    ///
    /// Returns `Poisoned` if the lock is poisoned.
    pub fn snapshot(&self) -> Result<IssueStore> {
        self.read(Clone::clone)
    }
}

impl From<IssueStore> for SharedStore {
    fn from(store: IssueStore) -> Self {
        Self::new(store)
    }
}
