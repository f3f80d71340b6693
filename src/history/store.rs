//! HistoryStore: bounded chat history persisted as a single JSON array
//!
//! Every mutation rewrites the whole file. Writers are serialized by a
//! mutex held across load-mutate-persist. The mutex is shared by every store
//! in the process that points at the same file, so separately built stores
//! cannot lose each other's updates. Each write goes to a temp file in the
//! same directory that is then renamed over the target, so readers never
//! observe a half-written log.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use tempfile::NamedTempFile;

use crate::errors::{AskError, Result};
use crate::history::types::{HistoryEntry, HistoryStats};

/// Maximum number of entries kept on disk
pub const MAX_HISTORY_ENTRIES: usize = 10;

/// File-backed, capacity-bounded interaction log
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

/// Writer lock for `path`, shared process-wide
fn path_lock(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(lock_key(path)).or_default())
}

/// Absolute path with the parent directory resolved when it exists, so
/// relative and `..` spellings of one file share a lock
fn lock_key(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => parent.canonicalize().ok().map(|p| p.join(name)),
        _ => None,
    };
    resolved.unwrap_or(absolute)
}

impl HistoryStore {
    /// Create a store over `path`. Nothing is touched on disk until the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            write_lock: path_lock(&path),
            path,
        }
    }

    /// Read the persisted log. A missing file is an empty history.
    pub fn load(&self) -> Result<Vec<HistoryEntry>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(AskError::StorageUnavailable {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let entries: Vec<HistoryEntry> =
            serde_json::from_str(&contents).map_err(|e| AskError::StorageCorrupt {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "loaded history");
        Ok(entries)
    }

    /// Record a new interaction, evicting the oldest entries beyond the
    /// capacity, and return the resulting log
    pub fn append(
        &self,
        question: impl Into<String>,
        answer: impl Into<String>,
        source: impl Into<String>,
    ) -> Result<Vec<HistoryEntry>> {
        let _guard = self.lock_writers();
        // stamped under the lock so file order matches timestamp order
        let entry = HistoryEntry::new(question, answer, source);

        let mut history = self.load()?;
        history.push(entry);
        if history.len() > MAX_HISTORY_ENTRIES {
            let excess = history.len() - MAX_HISTORY_ENTRIES;
            history.drain(..excess);
            tracing::debug!(evicted = excess, "evicted oldest history entries");
        }

        self.persist(&history)?;
        tracing::info!(entries = history.len(), "appended history entry");
        Ok(history)
    }

    /// Overwrite the log with an empty sequence. Failures are logged and
    /// reported as `false`.
    pub fn clear(&self) -> bool {
        let _guard = self.lock_writers();

        match self.persist(&[]) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "cleared history");
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to clear history");
                false
            }
        }
    }

    /// Number of persisted entries
    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Per-source tallies over the persisted entries
    pub fn stats(&self) -> Result<HistoryStats> {
        Ok(HistoryStats::from_entries(&self.load()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_writers(&self) -> MutexGuard<'_, ()> {
        // The guarded state is the file itself; a panicked writer never
        // leaves it half-written, so a poisoned lock is still usable.
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &[HistoryEntry]) -> Result<()> {
        let unavailable = |source: io::Error| AskError::StorageUnavailable {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(unavailable)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(unavailable)?;
        serde_json::to_writer_pretty(&mut tmp, entries)?;
        tmp.write_all(b"\n").map_err(unavailable)?;
        if let Ok(metadata) = fs::metadata(&self.path) {
            tmp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(unavailable)?;
        }
        tmp.as_file().sync_all().map_err(unavailable)?;
        tmp.persist(&self.path).map_err(|e| unavailable(e.error))?;

        tracing::debug!(path = %self.path.display(), entries = entries.len(), "persisted history");
        Ok(())
    }
}
