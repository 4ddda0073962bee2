//! Shared helpers for the subcommands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config;
use crate::scan::{base_name, CategoryScanner, DEFAULT_EXCLUDED_DIRS};

/// Resolve the outfit root: an explicit path wins, then the saved config.
/// Returns the canonical root and the exclusion list to scan with.
pub fn resolve_root(path: Option<PathBuf>) -> Result<(PathBuf, Vec<String>)> {
    let (root, excluded) = match path {
        Some(path) => {
            (path, DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect())
        }
        None => {
            let cfg = config::load()?;
            (cfg.root, cfg.excluded_dirs)
        }
    };
    let root = root
        .canonicalize()
        .with_context(|| format!("outfit root is not accessible: {}", root.display()))?;
    anyhow::ensure!(root.is_dir(), "outfit root is not a directory: {}", root.display());
    Ok((root, excluded))
}

/// Find a category by base name, case-insensitive.
pub fn find_category<'a>(name: &str, categories: &'a [PathBuf]) -> Option<&'a Path> {
    categories
        .iter()
        .find(|c| base_name(c).eq_ignore_ascii_case(name))
        .map(PathBuf::as_path)
}

pub fn scanner_for(root: &Path, excluded: &[String]) -> CategoryScanner {
    CategoryScanner::new(root.to_path_buf()).excluded_dirs(excluded.to_vec())
}
