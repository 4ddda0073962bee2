//! Persisted user configuration.
//!
//! A small JSON file under the per-user config dir remembers the outfit
//! root (and scan exclusions) so the CLI can run without arguments.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scan::DEFAULT_EXCLUDED_DIRS;

const APP_DIR: &str = "outfit-picker";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Root directory holding the category folders.
    pub root: PathBuf,
    /// Directory names excluded from scanning, case-insensitive.
    #[serde(default = "default_excluded")]
    pub excluded_dirs: Vec<String>,
}

fn default_excluded() -> Vec<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
}

impl Config {
    pub fn new(root: PathBuf) -> Self {
        Self { root, excluded_dirs: default_excluded() }
    }

    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(Error::Validation("root directory is required".to_string()));
        }
        if self.root.components().any(|c| c == Component::ParentDir) {
            return Err(Error::Validation("root path must not contain '..'".to_string()));
        }
        if !self.root.is_dir() {
            return Err(Error::Validation(format!(
                "root directory does not exist: {}",
                self.root.display()
            )));
        }
        Ok(())
    }
}

/// Location of the config file under the platform config dir.
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| {
        Error::Config("could not determine a user config directory".to_string())
    })?;
    Ok(dir.join(APP_DIR).join(CONFIG_FILE))
}

/// Load the saved config. A missing file means the tool was never
/// configured. Malformed JSON is reported rather than silently recovered,
/// unlike the selection cache.
pub fn load() -> Result<Config> {
    let path = config_path()?;
    load_from(&path)
}

fn load_from(path: &Path) -> Result<Config> {
    let data = match fs::read(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::Config(
                "no outfit root configured; pass a path or save one with `config set`".to_string(),
            ));
        }
        Err(source) => return Err(Error::fs(path, source)),
    };
    serde_json::from_slice(&data)
        .map_err(|err| Error::Config(format!("invalid config file {}: {err}", path.display())))
}

/// Validate and write the config with owner-only permissions.
pub fn save(config: &Config) -> Result<()> {
    config.validate()?;
    let path = config_path()?;
    save_to(config, &path)
}

fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_private_dir(parent).map_err(|source| Error::fs(parent, source))?;
    }
    let mut data = serde_json::to_vec_pretty(config)
        .map_err(|err| Error::Config(format!("could not encode config: {err}")))?;
    data.push(b'\n');
    write_private(path, &data).map_err(|source| Error::fs(path, source))
}

/// Remove the saved config; already-absent is fine.
pub fn delete() -> Result<()> {
    let path = config_path()?;
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(Error::fs(path, source)),
    }
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(data)
}

#[cfg(not(unix))]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(path, data)
}
