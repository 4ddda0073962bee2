//! outfit-picker: pick outfit files from category folders without repeats.

use anyhow::Result;

fn main() -> Result<()> {
    outfit_picker::cli::run()
}
