//! Progress display.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use console::style;

use crate::cache::{AsyncLoader, FileCountCache};
use crate::complete::CompletionDetector;
use crate::pool::category_key;
use crate::scan::base_name;
use crate::store::{SelectionStore, UNCATEGORIZED_KEY};

#[derive(Args)]
pub struct StatusArgs {
    /// Outfit root directory (defaults to the saved config)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// List the already-picked file names per category
    #[arg(long)]
    pub selected: bool,

    /// List the not-yet-picked file names per category
    #[arg(long)]
    pub unselected: bool,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let (root, excluded) = super::utils::resolve_root(args.path)?;
    let scanner = super::utils::scanner_for(&root, &excluded);
    let store = SelectionStore::new(&root)?;

    let categories = scanner.categories()?;
    let uncategorized = scanner.uncategorized()?;
    let map = store.load();

    // Prefetch counts for the whole listing up front; the display below
    // then reads them back out of the warmed cache.
    let counts = Arc::new(FileCountCache::default());
    let mut loader = AsyncLoader::new();
    let events =
        loader.warm_counts(root.clone(), excluded.clone(), categories.clone(), Arc::clone(&counts));
    for _ in events {}
    loader.join();

    for cat in &categories {
        let key = category_key(cat);
        let selected = map.get(&key).map(Vec::len).unwrap_or(0);
        let total = counts.get(&scanner, cat).unwrap_or(0);
        let name = base_name(cat);
        if selected >= total && total > 0 {
            println!("{}  {selected}/{total} {}", style(&name).cyan(), style("complete").green());
        } else {
            println!("{}  {selected}/{total}", style(&name).cyan());
        }
        if args.selected {
            print_names("picked", map.get(&key).map(Vec::as_slice).unwrap_or(&[]));
        }
        if args.unselected {
            let remaining = unselected_names(&scanner, cat, &map, &key)?;
            print_names("remaining", &remaining);
        }
    }

    if !uncategorized.is_empty() {
        let selected = map.get(UNCATEGORIZED_KEY).map(Vec::len).unwrap_or(0);
        println!("{}  {selected}/{}", style("Uncategorized").cyan(), uncategorized.len());
        if args.selected {
            print_names("picked", map.get(UNCATEGORIZED_KEY).map(Vec::as_slice).unwrap_or(&[]));
        }
        if args.unselected {
            let picked: Vec<&str> = map
                .get(UNCATEGORIZED_KEY)
                .map(|v| v.iter().map(String::as_str).collect())
                .unwrap_or_default();
            let remaining: Vec<String> = uncategorized
                .iter()
                .map(|p| base_name(p))
                .filter(|n| !picked.contains(&n.as_str()))
                .collect();
            print_names("remaining", &remaining);
        }
    }

    let detector = CompletionDetector::new(&scanner);
    let summary = detector.summary(&categories, &store);
    if summary.total > 0 {
        println!(
            "\nCompleted {} of {} categories{}",
            style(summary.completed).green(),
            summary.total,
            if summary.names.is_empty() {
                String::new()
            } else {
                format!(": {}", summary.names.join(", "))
            }
        );
    }
    Ok(())
}

fn unselected_names(
    scanner: &crate::scan::CategoryScanner,
    cat: &Path,
    map: &crate::store::SelectionMap,
    key: &str,
) -> Result<Vec<String>> {
    let picked: Vec<&str> =
        map.get(key).map(|v| v.iter().map(String::as_str).collect()).unwrap_or_default();
    Ok(scanner
        .files(cat)?
        .iter()
        .map(|p| base_name(p))
        .filter(|n| !picked.contains(&n.as_str()))
        .collect())
}

fn print_names(label: &str, names: &[String]) {
    if names.is_empty() {
        println!("  {label}: none");
        return;
    }
    for name in names {
        println!("  {label}: {name}");
    }
}
