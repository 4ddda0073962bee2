//! Category and file discovery.
//!
//! A category is an immediate subdirectory of the outfit root; its candidate
//! files are the immediate non-directory entries inside it. Listing never
//! recurses. Dotfiles are always ignored, and directory names on the
//! exclusion list (case-insensitive) are treated as not being categories.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::store::CACHE_FILE_NAME;

/// Directory names that are never categories and whose loose files are never
/// candidates.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["Downloads"];

/// Scanner over one outfit root.
pub struct CategoryScanner {
    root: PathBuf,
    excluded: Vec<String>,
}

impl CategoryScanner {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            excluded: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the excluded-name list (matched case-insensitively).
    pub fn excluded_dirs(mut self, excluded: Vec<String>) -> Self {
        self.excluded = excluded;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_excluded(&self, name: &str) -> bool {
        self.excluded.iter().any(|ex| ex.eq_ignore_ascii_case(name))
    }

    /// Immediate subdirectories of the root, sorted ascending by lowercased
    /// base name. The ordering is load-bearing: numeric menu selection in
    /// the presentation layer indexes into this list.
    pub fn categories(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|source| Error::fs(&self.root, source))?;

        let mut cats = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::fs(&self.root, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || self.is_excluded(&name) {
                continue;
            }
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                cats.push(entry.path());
            }
        }

        cats.sort_by_key(|p| base_name(p).to_lowercase());
        tracing::debug!(root = %self.root.display(), count = cats.len(), "listed categories");
        Ok(cats)
    }

    /// Immediate non-directory, non-dotfile entries of `category`, sorted by
    /// name. An empty category is not an error here.
    pub fn files(&self, category: &Path) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(category)
            .map_err(|source| Error::fs(category, source))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::fs(category, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                files.push(entry.path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Loose files directly in the root: not dotfiles, not on the exclusion
    /// list, and not the selection cache itself.
    pub fn uncategorized(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.root)
            .map_err(|source| Error::fs(&self.root, source))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| Error::fs(&self.root, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || self.is_excluded(&name) || name == CACHE_FILE_NAME {
                continue;
            }
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                files.push(entry.path());
            }
        }

        files.sort();
        Ok(files)
    }

    /// Number of candidate files in `category` without building the list.
    pub fn file_count(&self, category: &Path) -> Result<usize> {
        let entries = fs::read_dir(category)
            .map_err(|source| Error::fs(category, source))?;

        let mut count = 0;
        for entry in entries {
            let entry = entry.map_err(|source| Error::fs(category, source))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Last path component as a display string.
pub fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
