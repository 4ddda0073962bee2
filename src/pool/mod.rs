//! Candidate pool construction.
//!
//! The pool is the set difference between what is on disk and what the
//! selection store already holds, flattened across categories (plus the
//! uncategorized loose files) in scanner order. Downstream picking is
//! random, so no further ordering is applied.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::scan::{base_name, CategoryScanner};
use crate::store::{SelectionStore, UNCATEGORIZED_KEY};

/// One not-yet-selected candidate. Ephemeral: rebuilt on every pool build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute category path as a store key, or `UNCATEGORIZED`.
    pub category_key: String,
    pub path: PathBuf,
    pub name: String,
}

impl FileEntry {
    pub fn is_uncategorized(&self) -> bool {
        self.category_key == UNCATEGORIZED_KEY
    }
}

/// Builds pools, holding an optional cached pool stamped with the store
/// generation it was built at. Purely a performance aid: a stale stamp
/// forces a full rebuild, and correctness holds if every call rebuilds.
pub struct PoolBuilder {
    cached: Option<(u64, Vec<FileEntry>)>,
}

impl Default for PoolBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PoolBuilder {
    pub fn new() -> Self {
        Self { cached: None }
    }

    /// Compute the pool for `categories` and `uncategorized`, reusing the
    /// cached result when the store has not mutated since it was built.
    pub fn pool(
        &mut self,
        scanner: &CategoryScanner,
        categories: &[PathBuf],
        uncategorized: &[PathBuf],
        store: &SelectionStore,
    ) -> Vec<FileEntry> {
        if let Some((stamp, pool)) = &self.cached {
            if *stamp == store.generation() {
                return pool.clone();
            }
        }
        let pool = build_pool(scanner, categories, uncategorized, store);
        self.cached = Some((store.generation(), pool.clone()));
        pool
    }
}

/// Uncached pool build: per category, files on disk minus the persisted
/// selection, one entry per remainder. Categories that fail to list are
/// skipped; the scan that produced the category list already surfaced hard
/// errors.
pub fn build_pool(
    scanner: &CategoryScanner,
    categories: &[PathBuf],
    uncategorized: &[PathBuf],
    store: &SelectionStore,
) -> Vec<FileEntry> {
    let map = store.load();
    let mut pool = Vec::new();

    for cat in categories {
        let key = category_key(cat);
        let seen: HashSet<&str> =
            map.get(&key).map(|v| v.iter().map(String::as_str).collect()).unwrap_or_default();

        let files = match scanner.files(cat) {
            Ok(files) => files,
            Err(err) => {
                tracing::warn!(%err, "skipping unreadable category during pool build");
                continue;
            }
        };
        for path in files {
            let name = base_name(&path);
            if seen.contains(name.as_str()) {
                continue;
            }
            pool.push(FileEntry { category_key: key.clone(), path, name });
        }
    }

    if !uncategorized.is_empty() {
        let seen: HashSet<&str> = map
            .get(UNCATEGORIZED_KEY)
            .map(|v| v.iter().map(String::as_str).collect())
            .unwrap_or_default();
        for path in uncategorized {
            let name = base_name(path);
            if seen.contains(name.as_str()) {
                continue;
            }
            pool.push(FileEntry {
                category_key: UNCATEGORIZED_KEY.to_string(),
                path: path.clone(),
                name,
            });
        }
    }

    pool
}

/// Store key for a category directory: its absolute path as a string.
pub fn category_key(category: &Path) -> String {
    category.to_string_lossy().into_owned()
}
