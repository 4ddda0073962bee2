//! Advisory performance caches.
//!
//! `FileCountCache` memoizes per-category file counts under a TTL so the
//! presentation layer can show counts without re-walking directories.
//! `AsyncLoader` warms it from background threads. Both are read-only
//! helpers: anything that writes to the selection store re-derives counts
//! from disk instead of trusting these.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, RwLock};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::scan::CategoryScanner;

pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

struct CountEntry {
    value: usize,
    at: Instant,
}

/// Read-through file-count cache with a TTL.
///
/// A miss recomputes outside the lock, so two threads missing at once both
/// do the work; the duplicate insert is harmless and cheaper than holding
/// the write lock across a directory read.
pub struct FileCountCache {
    counts: RwLock<HashMap<PathBuf, CountEntry>>,
    ttl: Duration,
}

impl FileCountCache {
    pub fn new(ttl: Duration) -> Self {
        Self { counts: RwLock::new(HashMap::new()), ttl }
    }

    /// Cached count while fresh, otherwise recomputed from disk.
    pub fn get(&self, scanner: &CategoryScanner, category: &Path) -> Result<usize> {
        {
            let counts = self.counts.read().unwrap_or_else(|e| e.into_inner());
            if let Some(entry) = counts.get(category) {
                if entry.at.elapsed() < self.ttl {
                    return Ok(entry.value);
                }
            }
        }

        let value = scanner.file_count(category)?;
        let mut counts = self.counts.write().unwrap_or_else(|e| e.into_inner());
        counts.insert(category.to_path_buf(), CountEntry { value, at: Instant::now() });
        Ok(value)
    }

    pub fn clear(&self) {
        self.counts.write().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl Default for FileCountCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

/// An event from the count-warming worker.
#[derive(Debug)]
pub enum PrefetchEvent {
    Counted { category: PathBuf, count: usize },
    Failed { category: PathBuf, error: Error },
    Done,
}

/// Cancellable background prefetch.
///
/// Workers only read the filesystem and the count cache; they never touch
/// the selection store. After `cancel()` they stop emitting events, so a
/// receiver drained after cancellation sees at most what was already sent.
pub struct AsyncLoader {
    cancel: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl AsyncLoader {
    pub fn new() -> Self {
        Self { cancel: Arc::new(AtomicBool::new(false)), handles: Vec::new() }
    }

    fn cancelled(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// List categories on a worker thread. The receiver yields exactly one
    /// result unless the loader was cancelled first.
    pub fn load_categories(
        &mut self,
        root: PathBuf,
        excluded: Vec<String>,
    ) -> Receiver<Result<Vec<PathBuf>>> {
        let (tx, rx) = mpsc::channel();
        let cancel = self.cancelled();
        self.handles.push(std::thread::spawn(move || {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let scanner = CategoryScanner::new(root).excluded_dirs(excluded);
            let result = scanner.categories();
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            // A dropped receiver is not an error worth reporting.
            let _ = tx.send(result);
        }));
        rx
    }

    /// Warm `cache` with the counts for `categories`, one event per
    /// category plus a trailing `Done` when the run wasn't cancelled.
    pub fn warm_counts(
        &mut self,
        root: PathBuf,
        excluded: Vec<String>,
        categories: Vec<PathBuf>,
        cache: Arc<FileCountCache>,
    ) -> Receiver<PrefetchEvent> {
        let (tx, rx) = mpsc::channel();
        let cancel = self.cancelled();
        self.handles.push(std::thread::spawn(move || {
            let scanner = CategoryScanner::new(root).excluded_dirs(excluded);
            for category in categories {
                if cancel.load(Ordering::Relaxed) {
                    return;
                }
                let event = match cache.get(&scanner, &category) {
                    Ok(count) => PrefetchEvent::Counted { category, count },
                    Err(error) => PrefetchEvent::Failed { category, error },
                };
                if cancel.load(Ordering::Relaxed) {
                    return;
                }
                tracing::debug!(?event, "prefetch");
                if tx.send(event).is_err() {
                    return;
                }
            }
            if !cancel.load(Ordering::Relaxed) {
                let _ = tx.send(PrefetchEvent::Done);
            }
        }));
        rx
    }

    /// Tell workers to stop emitting. In-flight directory reads finish but
    /// their results are dropped.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Wait for all spawned workers to exit.
    pub fn join(&mut self) {
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Default for AsyncLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AsyncLoader {
    fn drop(&mut self) {
        self.cancel();
        self.join();
    }
}
