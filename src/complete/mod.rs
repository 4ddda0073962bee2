//! Category completion detection.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::pool::category_key;
use crate::scan::{base_name, CategoryScanner};
use crate::store::{SelectionStore, UNCATEGORIZED_KEY};

/// Aggregate progress across categories. Display-only; engine decisions
/// never consult it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSummary {
    /// Fully selected, non-empty categories.
    pub completed: usize,
    /// Non-empty categories considered.
    pub total: usize,
    /// Base names of the completed categories, sorted.
    pub names: Vec<String>,
}

/// Checks persisted selections against what is currently on disk.
pub struct CompletionDetector<'a> {
    scanner: &'a CategoryScanner,
}

impl<'a> CompletionDetector<'a> {
    pub fn new(scanner: &'a CategoryScanner) -> Self {
        Self { scanner }
    }

    /// A category is complete when every file currently on disk has been
    /// selected and the category is non-empty; empty categories are never
    /// complete, which keeps a vacuous auto-reset loop from forming. The
    /// sentinel key never completes: loose files have no reset cycle.
    ///
    /// The check is by count, not set membership: if a selected file is
    /// renamed on disk, its old name stays "selected" while the new name
    /// counts as unselected, and the comparison can misreport. Known gap,
    /// kept from the original behavior.
    pub fn is_complete(&self, key: &str, store: &SelectionStore) -> Result<bool> {
        if key == UNCATEGORIZED_KEY {
            return Ok(false);
        }
        let total = self.scanner.file_count(Path::new(key))?;
        let selected = store.selected(key).len();
        Ok(selected >= total && total > 0)
    }

    /// Progress over `categories`. Empty or unreadable categories count in
    /// neither `completed` nor `total`.
    pub fn summary(&self, categories: &[PathBuf], store: &SelectionStore) -> CompletionSummary {
        let map = store.load();
        let mut completed = 0;
        let mut total = 0;
        let mut names = Vec::new();

        for cat in categories {
            let count = match self.scanner.file_count(cat) {
                Ok(0) | Err(_) => continue,
                Ok(count) => count,
            };
            total += 1;
            let selected = map.get(&category_key(cat)).map(Vec::len).unwrap_or(0);
            if selected >= count {
                completed += 1;
                names.push(base_name(cat));
            }
        }

        names.sort();
        CompletionSummary { completed, total, names }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_category(root: &Path, name: &str, files: &[&str]) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir(&dir).unwrap();
        for f in files {
            fs::write(dir.join(f), b"x").unwrap();
        }
        dir
    }

    #[test]
    fn complete_when_all_files_selected() {
        let temp = TempDir::new().unwrap();
        let cat = make_category(temp.path(), "Beach", &["a.jpg", "b.jpg"]);
        let scanner = CategoryScanner::new(temp.path().to_path_buf());
        let mut store = SelectionStore::new(temp.path()).unwrap();
        let detector = CompletionDetector::new(&scanner);
        let key = category_key(&cat);

        store.add("a.jpg", &key);
        assert!(!detector.is_complete(&key, &store).unwrap());

        store.add("b.jpg", &key);
        assert!(detector.is_complete(&key, &store).unwrap());
    }

    #[test]
    fn empty_category_is_never_complete() {
        let temp = TempDir::new().unwrap();
        let cat = make_category(temp.path(), "Empty", &[]);
        let scanner = CategoryScanner::new(temp.path().to_path_buf());
        let mut store = SelectionStore::new(temp.path()).unwrap();
        let detector = CompletionDetector::new(&scanner);
        let key = category_key(&cat);

        assert!(!detector.is_complete(&key, &store).unwrap());
        // Even a stray persisted selection does not make it complete.
        store.add("ghost.jpg", &key);
        assert!(!detector.is_complete(&key, &store).unwrap());
    }

    #[test]
    fn sentinel_key_is_never_complete() {
        let temp = TempDir::new().unwrap();
        let scanner = CategoryScanner::new(temp.path().to_path_buf());
        let mut store = SelectionStore::new(temp.path()).unwrap();
        let detector = CompletionDetector::new(&scanner);

        store.add("loose.jpg", UNCATEGORIZED_KEY);
        assert!(!detector.is_complete(UNCATEGORIZED_KEY, &store).unwrap());
    }

    #[test]
    fn stale_selections_still_count_toward_completion() {
        // The documented count-based gap: more selected names than files on
        // disk still reads as complete.
        let temp = TempDir::new().unwrap();
        let cat = make_category(temp.path(), "Beach", &["new.jpg"]);
        let scanner = CategoryScanner::new(temp.path().to_path_buf());
        let mut store = SelectionStore::new(temp.path()).unwrap();
        let detector = CompletionDetector::new(&scanner);
        let key = category_key(&cat);

        store.add("old.jpg", &key);
        assert!(detector.is_complete(&key, &store).unwrap());
    }

    #[test]
    fn summary_counts_non_empty_categories() {
        let temp = TempDir::new().unwrap();
        let a = make_category(temp.path(), "A", &["1.jpg", "2.jpg", "3.jpg"]);
        let b = make_category(temp.path(), "B", &["1.jpg", "2.jpg"]);
        make_category(temp.path(), "Empty", &[]);

        let scanner = CategoryScanner::new(temp.path().to_path_buf());
        let mut store = SelectionStore::new(temp.path()).unwrap();
        for f in ["1.jpg", "2.jpg", "3.jpg"] {
            store.add(f, &category_key(&a));
        }
        store.add("1.jpg", &category_key(&b));

        let detector = CompletionDetector::new(&scanner);
        let categories = scanner.categories().unwrap();
        let summary = detector.summary(&categories, &store);

        assert_eq!(summary.completed, 1);
        assert_eq!(summary.total, 2, "the empty category is not counted");
        assert_eq!(summary.names, vec!["A"]);
    }
}
