//! outfit-picker: cycle through outfit files in category folders without
//! repeats.
//!
//! Categories are the immediate subdirectories of a root folder; picks are
//! remembered in a JSON cache colocated with the root, and a fully-picked
//! category resets itself so the cycle can start over.

pub mod cache;
pub mod cli;
pub mod complete;
pub mod config;
pub mod engine;
pub mod error;
pub mod pool;
pub mod prompt;
pub mod scan;
pub mod store;

pub use complete::{CompletionDetector, CompletionSummary};
pub use engine::{Action, EngineState, Kept, Pick, SelectionEngine};
pub use error::{Error, Result};
pub use pool::{build_pool, category_key, FileEntry, PoolBuilder};
pub use scan::CategoryScanner;
pub use store::{SelectionMap, SelectionStore, CACHE_FILE_NAME, UNCATEGORIZED_KEY};
