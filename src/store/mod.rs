//! Persistent selection cache.
//!
//! One JSON object maps a category key (absolute directory path, or the
//! `UNCATEGORIZED` sentinel for loose files in the root) to the base names
//! already picked from it. Every mutation is written through to disk
//! immediately; there is no cross-process locking, so concurrent writers are
//! last-write-wins. Reads are lenient: a missing or corrupt cache file is
//! the same as an empty one.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the selection cache, colocated with the outfit root.
pub const CACHE_FILE_NAME: &str = "OutfitSelectorCache.json";

/// Cache key for loose files that live directly in the root.
pub const UNCATEGORIZED_KEY: &str = "UNCATEGORIZED";

/// Category key -> selected base file names. `BTreeMap` keeps the on-disk
/// ordering deterministic.
pub type SelectionMap = BTreeMap<String, Vec<String>>;

/// Owns the path of the selection cache file and mediates all access to it.
pub struct SelectionStore {
    cache_file: PathBuf,
    generation: u64,
}

impl SelectionStore {
    /// Resolve the cache location for `root`. If the root exists and is a
    /// directory the cache lives inside it (so a synced folder carries its
    /// own history); otherwise it falls back to the per-user cache dir.
    pub fn new(root: &Path) -> Result<Self> {
        let cache_file = if root.is_dir() {
            root.join(CACHE_FILE_NAME)
        } else {
            let sys = dirs::cache_dir().ok_or_else(|| {
                Error::Validation("could not determine a user cache directory".to_string())
            })?;
            sys.join(CACHE_FILE_NAME)
        };
        Ok(Self { cache_file, generation: 0 })
    }

    /// Build a store around an explicit cache file path.
    pub fn at_path(cache_file: PathBuf) -> Self {
        Self { cache_file, generation: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.cache_file
    }

    /// Monotone counter bumped by every mutation. Pool caches compare it to
    /// decide whether they are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Read the cache from disk. Missing file or malformed JSON degrades to
    /// an empty map; corruption never surfaces as an error.
    pub fn load(&self) -> SelectionMap {
        let data = match fs::read(&self.cache_file) {
            Ok(data) => data,
            Err(_) => return SelectionMap::new(),
        };
        match serde_json::from_slice(&data) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(
                    cache = %self.cache_file.display(),
                    %err,
                    "selection cache is not valid JSON; treating it as empty"
                );
                SelectionMap::new()
            }
        }
    }

    /// Write the full mapping with two-space indentation and owner-only
    /// permissions.
    pub fn save(&self, map: &SelectionMap) -> Result<()> {
        let mut data = serde_json::to_vec_pretty(map)
            .map_err(|err| Error::Save {
                path: self.cache_file.clone(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, err),
            })?;
        data.push(b'\n');
        write_owner_only(&self.cache_file, &data)
            .map_err(|source| Error::Save { path: self.cache_file.clone(), source })
    }

    /// Record `name` as selected under `key`. Idempotent: a name already
    /// present is left alone and the file is not rewritten. A failed write
    /// is logged and otherwise ignored; the selection still counts for the
    /// rest of the session.
    pub fn add(&mut self, name: &str, key: &str) {
        let mut map = self.load();
        let names = map.entry(key.to_string()).or_default();
        if names.iter().any(|n| n == name) {
            return;
        }
        names.push(name.to_string());
        self.generation += 1;
        if let Err(err) = self.save(&map) {
            tracing::warn!(%err, "selection was not persisted");
        }
    }

    /// Forget everything selected under `key`. Removing the key (rather
    /// than leaving an empty list) is what lets a completed category start
    /// a fresh cycle.
    pub fn clear(&mut self, key: &str) {
        let mut map = self.load();
        map.remove(key);
        self.generation += 1;
        if let Err(err) = self.save(&map) {
            tracing::warn!(%err, "selection reset was not persisted");
        }
    }

    /// Names currently selected under `key`.
    pub fn selected(&self, key: &str) -> Vec<String> {
        self.load().get(key).cloned().unwrap_or_default()
    }
}

#[cfg(unix)]
fn write_owner_only(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(data)?;
    // mode() only applies on create; fix up a pre-existing file too.
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn write_owner_only(path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SelectionStore {
        SelectionStore::new(dir.path()).expect("store")
    }

    #[test]
    fn cache_colocated_with_existing_root() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert_eq!(store.path(), temp.path().join(CACHE_FILE_NAME));
    }

    #[test]
    fn load_missing_file_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(store_in(&temp).load().is_empty());
    }

    #[test]
    fn load_corrupted_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        fs::write(store.path(), b"invalid json {").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut map = SelectionMap::new();
        map.insert("/wardrobe/Beach".to_string(), vec!["a.jpg".into(), "b.jpg".into()]);
        map.insert(UNCATEGORIZED_KEY.to_string(), vec!["loose.png".into()]);
        store.save(&map).unwrap();

        assert_eq!(store.load(), map);
    }

    #[test]
    fn unicode_names_survive_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let names = vec!["файл.jpg".to_string(), "文件.jpg".to_string(), "🎉.jpg".to_string()];
        let mut map = SelectionMap::new();
        map.insert("unicode".to_string(), names.clone());
        store.save(&map).unwrap();

        assert_eq!(store.load().get("unicode"), Some(&names));
    }

    #[test]
    fn add_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.add("file1.jpg", "cat");
        store.add("file1.jpg", "cat");
        store.add("file1.jpg", "cat");

        assert_eq!(store.selected("cat"), vec!["file1.jpg".to_string()]);
    }

    #[test]
    fn add_bumps_generation_once_per_new_name() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.add("a.jpg", "cat");
        let after_first = store.generation();
        store.add("a.jpg", "cat");
        assert_eq!(store.generation(), after_first, "duplicate add must not invalidate pools");
        store.add("b.jpg", "cat");
        assert!(store.generation() > after_first);
    }

    #[test]
    fn clear_removes_the_key_entirely() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);

        store.add("a.jpg", "cat");
        store.clear("cat");

        assert!(store.selected("cat").is_empty());
        assert!(!store.load().contains_key("cat"), "key must be gone, not empty");
    }

    #[cfg(unix)]
    #[test]
    fn cache_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        store.save(&SelectionMap::new()).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn saved_json_uses_two_space_indent() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);

        let mut map = SelectionMap::new();
        map.insert("cat".to_string(), vec!["a.jpg".into()]);
        store.save(&map).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("  \"cat\""), "expected two-space indent, got:\n{text}");
    }
}
