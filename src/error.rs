//! Library error kinds.
//!
//! Malformed cache JSON is deliberately not represented here: the store
//! recovers from it locally by treating the cache as empty.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A directory could not be read. Aborts the current operation.
    #[error("failed to read {}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Bad input from the user or the saved config (nonexistent root,
    /// unknown category name, ...).
    #[error("{0}")]
    Validation(String),

    /// The selection cache could not be written. The store logs this and
    /// keeps the in-memory result; it never propagates past the store.
    #[error("could not write selection cache {}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The user config file is missing or unusable.
    #[error("{0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::FileSystem { path: path.into(), source }
    }
}
