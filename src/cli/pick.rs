//! Interactive pick session.

use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use console::style;

use crate::cache::{AsyncLoader, FileCountCache};
use crate::complete::CompletionDetector;
use crate::engine::{Action, Kept, Pick, SelectionEngine};
use crate::pool::{build_pool, FileEntry};
use crate::prompt::Prompter;
use crate::scan::base_name;
use crate::store::SelectionStore;

#[derive(Args)]
pub struct PickArgs {
    /// Outfit root directory (defaults to the saved config)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Pick from a single category (by folder name, case-insensitive)
    #[arg(short, long, value_name = "NAME")]
    pub category: Option<String>,
}

pub fn run(args: PickArgs) -> Result<()> {
    let (root, excluded) = super::utils::resolve_root(args.path)?;
    let scanner = super::utils::scanner_for(&root, &excluded);
    let mut store = SelectionStore::new(&root)?;

    let all_categories = scanner.categories()?;
    let uncategorized = scanner.uncategorized()?;

    let (categories, uncategorized) = match &args.category {
        Some(name) => {
            let cat = super::utils::find_category(name, &all_categories)
                .ok_or_else(|| anyhow::anyhow!("category {name:?} not found"))?;
            (vec![cat.to_path_buf()], Vec::new())
        }
        None => (all_categories.clone(), uncategorized),
    };

    if categories.is_empty() && uncategorized.is_empty() {
        anyhow::bail!("no outfit files found in {:?}", base_name(&root));
    }

    // Warm per-category counts in the background while the user reads the
    // first candidate. Display-only; the session never blocks on it.
    let counts = Arc::new(FileCountCache::default());
    let mut loader = AsyncLoader::new();
    let _events = loader.warm_counts(
        root.clone(),
        excluded.clone(),
        categories.clone(),
        Arc::clone(&counts),
    );

    let pool = build_pool(&scanner, &categories, &uncategorized, &store);
    let include_uncategorized = !uncategorized.is_empty();
    let engine = SelectionEngine::new(pool, categories.clone(), include_uncategorized);

    let stdin = std::io::stdin();
    let prompter = Prompter::new(stdin.lock());
    let outcome = drive_session(engine, &mut store, &scanner, prompter, &counts)?;
    loader.cancel();

    if let Some(kept) = outcome {
        if kept.completed_category && !kept.entry.is_uncategorized() {
            println!(
                "\n{} You've picked everything from {}! Starting fresh with this folder.",
                style("🎉").bold(),
                style(key_display(&kept.entry)).cyan()
            );
        }
        let detector = CompletionDetector::new(&scanner);
        let summary = detector.summary(&all_categories, &store);
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
    }
    Ok(())
}

/// Run the prompt loop until the engine terminates. Returns the committed
/// pick, if the session ended with one.
fn drive_session<R: BufRead>(
    mut engine: SelectionEngine,
    store: &mut SelectionStore,
    scanner: &crate::scan::CategoryScanner,
    mut prompter: Prompter<R>,
    counts: &FileCountCache,
) -> Result<Option<Kept>> {
    let detector = CompletionDetector::new(scanner);

    loop {
        match engine.pick(store) {
            Pick::AllSelected { .. } => {
                println!("{} You've picked all your outfits!", style("🎉").bold());
                println!("Starting fresh: you can pick from everything again.");
                return Ok(None);
            }
            Pick::AllSkipped => {
                println!("{} You've skipped every remaining outfit.", style("⚠").yellow());
                print!("Try again with the same outfits? [y/N]: ");
                flush();
                if prompter.confirm() {
                    engine.retry();
                    continue;
                }
                engine.quit();
                return Ok(None);
            }
            Pick::Candidate(entry) => {
                show_candidate(&entry, scanner, counts);
                print!("Keep it, skip it, or quit? [K/s/q]: ");
                flush();
                match Action::parse(&prompter.read_token_or("k")) {
                    Action::Keep => {
                        let kept = engine.keep(store, &detector);
                        if let Some(kept) = &kept {
                            println!("{} Kept {}", style("✔").green(), style(&kept.entry.name).bold());
                        }
                        return Ok(kept);
                    }
                    Action::Skip => {
                        println!("Skipped {}", entry.name);
                        engine.skip();
                    }
                    Action::Quit => {
                        println!("Exiting.");
                        engine.quit();
                        return Ok(None);
                    }
                    Action::Unrecognized(token) => {
                        println!("Unrecognized action {token:?}; use k, s, or q.");
                    }
                }
            }
        }
    }
}

fn show_candidate(
    entry: &FileEntry,
    scanner: &crate::scan::CategoryScanner,
    counts: &FileCountCache,
) {
    if entry.is_uncategorized() {
        println!("\n{} From your other outfits", style("📄").dim());
    } else {
        let category = std::path::Path::new(&entry.category_key);
        match counts.get(scanner, category) {
            Ok(count) => println!(
                "\n{} From your {} collection ({count} files)",
                style("📂").dim(),
                style(key_display(entry)).cyan()
            ),
            Err(_) => println!(
                "\n{} From your {} collection",
                style("📂").dim(),
                style(key_display(entry)).cyan()
            ),
        }
    }
    println!("  {}", style(&entry.name).bold());
}

fn key_display(entry: &FileEntry) -> String {
    base_name(std::path::Path::new(&entry.category_key))
}

fn flush() {
    use std::io::Write;
    let _ = std::io::stdout().flush();
}
