//! Saved-configuration management.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::{self, Config};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the saved configuration
    Show,

    /// Save the outfit root to use when no path is given
    Set {
        /// Root directory holding the category folders
        #[arg(value_name = "PATH")]
        root: PathBuf,
    },

    /// Delete the saved configuration
    Unset,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let cfg = config::load()?;
            println!("root: {}", cfg.root.display());
            println!("excluded dirs: {}", cfg.excluded_dirs.join(", "));
        }
        ConfigAction::Set { root } => {
            let cfg = Config::new(root);
            config::save(&cfg)?;
            println!("Saved root {}", cfg.root.display());
        }
        ConfigAction::Unset => {
            config::delete()?;
            println!("Removed the saved configuration.");
        }
    }
    Ok(())
}
