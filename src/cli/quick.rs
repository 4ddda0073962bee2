//! One-shot non-interactive pick.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use console::style;

use crate::complete::CompletionDetector;
use crate::engine::{Pick, SelectionEngine};
use crate::pool::build_pool;
use crate::scan::base_name;
use crate::store::SelectionStore;

#[derive(Args)]
pub struct QuickArgs {
    /// Outfit root directory (defaults to the saved config)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Pick from a single category (by folder name, case-insensitive)
    #[arg(short, long, value_name = "NAME")]
    pub category: Option<String>,
}

pub fn run(args: QuickArgs) -> Result<()> {
    let (root, excluded) = super::utils::resolve_root(args.path)?;
    let scanner = super::utils::scanner_for(&root, &excluded);
    let mut store = SelectionStore::new(&root)?;

    let all_categories = scanner.categories()?;
    let (categories, uncategorized) = match &args.category {
        Some(name) => {
            let cat = super::utils::find_category(name, &all_categories)
                .ok_or_else(|| anyhow::anyhow!("category {name:?} not found"))?;
            (vec![cat.to_path_buf()], Vec::new())
        }
        None => (all_categories, scanner.uncategorized()?),
    };

    if categories.is_empty() && uncategorized.is_empty() {
        anyhow::bail!("no outfit files found in {:?}", base_name(&root));
    }

    let pool = build_pool(&scanner, &categories, &uncategorized, &store);
    let include_uncategorized = !uncategorized.is_empty();
    let mut engine = SelectionEngine::new(pool, categories, include_uncategorized);
    let detector = CompletionDetector::new(&scanner);

    match engine.pick(&mut store) {
        Pick::Candidate(_) => {
            if let Some(kept) = engine.keep(&mut store, &detector) {
                println!("{} Selected: {}", style("✔").green(), kept.entry.name);
                if kept.completed_category {
                    println!(
                        "That finished {}; its cycle starts over.",
                        base_name(std::path::Path::new(&kept.entry.category_key))
                    );
                }
            }
        }
        Pick::AllSelected { .. } => {
            println!("Everything was already picked; starting a fresh cycle. Run again.");
        }
        // Quick mode never skips, so exhaustion is unreachable.
        Pick::AllSkipped => {}
    }
    Ok(())
}
