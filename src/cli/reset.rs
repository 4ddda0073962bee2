//! Clear remembered selections.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::pool::category_key;
use crate::store::SelectionStore;

#[derive(Args)]
pub struct ResetArgs {
    /// Outfit root directory (defaults to the saved config)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Clear a single category (by folder name, case-insensitive)
    #[arg(short, long, value_name = "NAME", conflicts_with = "all")]
    pub category: Option<String>,

    /// Clear every remembered selection under this root
    #[arg(long)]
    pub all: bool,
}

pub fn run(args: ResetArgs) -> Result<()> {
    let (root, excluded) = super::utils::resolve_root(args.path)?;
    let scanner = super::utils::scanner_for(&root, &excluded);
    let mut store = SelectionStore::new(&root)?;

    match (args.category, args.all) {
        (Some(name), _) => {
            let categories = scanner.categories()?;
            let cat = super::utils::find_category(&name, &categories)
                .ok_or_else(|| anyhow::anyhow!("category {name:?} not found"))?;
            let key = category_key(cat);
            store.clear(&key);
            println!("Cleared selections for {name}; its next pick restarts the cycle.");
        }
        (None, true) => {
            let keys: Vec<String> = store.load().keys().cloned().collect();
            for key in &keys {
                store.clear(key);
            }
            println!("Cleared {} remembered selection list(s).", keys.len());
        }
        (None, false) => {
            anyhow::bail!("pass --category NAME or --all to say what to clear");
        }
    }
    Ok(())
}
