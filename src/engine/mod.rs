//! Random-pick state machine.
//!
//! One engine instance drives one pick session over a prebuilt pool. The
//! engine owns the session-local skip-set and commits keeps to the store;
//! everything user-facing (prompts, rendering) lives in the caller.

use std::collections::HashSet;
use std::path::PathBuf;

use rand::seq::IndexedRandom;

use crate::complete::CompletionDetector;
use crate::pool::{category_key, FileEntry};
use crate::store::{SelectionStore, UNCATEGORIZED_KEY};

/// Session states. `Exhausted` means every remaining candidate was skipped
/// this session; the caller decides between retrying and giving up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Picking,
    Exhausted,
    Terminated,
}

/// Result of asking the engine for a candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    /// A candidate was drawn; it stays current until kept or skipped.
    Candidate(FileEntry),
    /// The pool was empty before any skipping: everything is already
    /// selected. The involved keys have been cleared for a fresh cycle.
    AllSelected { reset_keys: Vec<String> },
    /// Every remaining candidate is in the skip-set. `retry` or `quit`.
    AllSkipped,
}

/// What a committed keep did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kept {
    pub entry: FileEntry,
    /// The keep completed its category, which has been auto-reset.
    pub completed_category: bool,
}

/// Single-token user action, parsed from a prompt response. Closed set so
/// callers match exhaustively; anything unknown lands in `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Keep,
    Skip,
    Quit,
    Unrecognized(String),
}

impl Action {
    pub fn parse(token: &str) -> Self {
        match token {
            "k" => Action::Keep,
            "s" => Action::Skip,
            "q" => Action::Quit,
            other => Action::Unrecognized(other.to_string()),
        }
    }
}

pub struct SelectionEngine {
    pool: Vec<FileEntry>,
    categories: Vec<PathBuf>,
    include_uncategorized: bool,
    skipped: HashSet<PathBuf>,
    current: Option<FileEntry>,
    state: EngineState,
}

impl SelectionEngine {
    /// `categories` and `include_uncategorized` name the keys the session
    /// covers; they are what gets auto-reset when the pool is empty from
    /// the start.
    pub fn new(pool: Vec<FileEntry>, categories: Vec<PathBuf>, include_uncategorized: bool) -> Self {
        Self {
            pool,
            categories,
            include_uncategorized,
            skipped: HashSet::new(),
            current: None,
            state: EngineState::Picking,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Draw uniformly among pool entries not yet skipped this session.
    pub fn pick(&mut self, store: &mut SelectionStore) -> Pick {
        let remaining: Vec<&FileEntry> =
            self.pool.iter().filter(|e| !self.skipped.contains(&e.path)).collect();

        match remaining.choose(&mut rand::rng()) {
            Some(&entry) => {
                let entry = entry.clone();
                self.state = EngineState::Picking;
                self.current = Some(entry.clone());
                Pick::Candidate(entry)
            }
            None if self.skipped.is_empty() => {
                let reset_keys = self.reset_all(store);
                self.state = EngineState::Terminated;
                Pick::AllSelected { reset_keys }
            }
            None => {
                self.state = EngineState::Exhausted;
                Pick::AllSkipped
            }
        }
    }

    /// Commit the current candidate, if any. Runs completion detection and
    /// auto-resets the category when the keep finished it. Terminates the
    /// session either way.
    pub fn keep(
        &mut self,
        store: &mut SelectionStore,
        detector: &CompletionDetector<'_>,
    ) -> Option<Kept> {
        let entry = self.current.take()?;
        store.add(&entry.name, &entry.category_key);

        // Completion re-derives the file count from disk. A count failure
        // here only costs the auto-reset, never the pick itself.
        let completed_category = match detector.is_complete(&entry.category_key, store) {
            Ok(done) => done,
            Err(err) => {
                tracing::warn!(%err, "could not verify completion after keep");
                false
            }
        };
        if completed_category {
            store.clear(&entry.category_key);
        }

        self.state = EngineState::Terminated;
        Some(Kept { entry, completed_category })
    }

    /// Put the current candidate on the session skip-set and stay picking.
    pub fn skip(&mut self) {
        if let Some(entry) = self.current.take() {
            self.skipped.insert(entry.path);
        }
    }

    /// Clear the skip-set after exhaustion and go back to picking.
    pub fn retry(&mut self) {
        self.skipped.clear();
        self.state = EngineState::Picking;
    }

    /// End the session without touching the store.
    pub fn quit(&mut self) {
        self.current = None;
        self.state = EngineState::Terminated;
    }

    /// Clear every key this session covers; returns the cleared keys.
    fn reset_all(&self, store: &mut SelectionStore) -> Vec<String> {
        let mut keys: Vec<String> = self.categories.iter().map(|c| category_key(c)).collect();
        if self.include_uncategorized {
            keys.push(UNCATEGORIZED_KEY.to_string());
        }
        for key in &keys {
            store.clear(key);
        }
        keys
    }
}
