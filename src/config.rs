//! Per-user credentials file (`~/.npconfig`)
//!
//! Plain `key=value` lines. The file is always read and rewritten as a whole;
//! there is no locking, so concurrent writers can lose updates.

use crate::error::{NpError, Result};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the store inside the home directory
pub const CONFIG_FILE_NAME: &str = ".npconfig";

/// In-memory contents of the store
pub type ConfigMap = BTreeMap<String, String>;

/// Keys np reads from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Username,
    Password,
    Registry,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Username => "username",
            ConfigKey::Password => "password",
            ConfigKey::Registry => "registry",
        }
    }
}

/// Handle on the `key=value` file at a given path
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    /// Store at `~/.npconfig`.
    pub fn default_location() -> Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| NpError::config("could not determine the home directory"))?;
        Ok(ConfigStore::new(home.join(CONFIG_FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty file if none exists yet.
    pub fn ensure(&self) -> Result<()> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "creating empty config file");
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(false)
                .open(&self.path)?;
        }
        Ok(())
    }

    /// Read the whole file. A missing file is created and yields an empty map.
    pub fn load(&self) -> Result<ConfigMap> {
        self.ensure()?;
        let content = fs::read_to_string(&self.path).map_err(|e| {
            NpError::config(format!("cannot read {}: {}", self.path.display(), e))
        })?;
        Ok(parse_config(&content))
    }

    /// Replace the file contents with `config`, one `key=value` line per entry.
    pub fn save(&self, config: &ConfigMap) -> Result<()> {
        let mut file = fs::File::create(&self.path).map_err(|e| {
            NpError::config(format!("cannot write {}: {}", self.path.display(), e))
        })?;
        for (key, value) in config {
            writeln!(file, "{}={}", key, value)?;
        }
        file.sync_all()?;
        debug!(path = %self.path.display(), entries = config.len(), "config saved");
        Ok(())
    }

    /// Merge `updates` into the stored map and write it back.
    pub fn set<I, K, V>(&self, updates: I) -> Result<ConfigMap>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut config = self.load()?;
        for (key, value) in updates {
            config.insert(key.into(), value.into());
        }
        self.save(&config)?;
        Ok(config)
    }
}

/// Parses `key=value` lines. Lines without `=` are skipped; keys and values
/// are trimmed and the last occurrence of a key wins.
pub fn parse_config(content: &str) -> ConfigMap {
    content
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

/// Registry login details taken from the store
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub registry: Option<String>,
}

impl Credentials {
    /// Extract credentials; username and password are required.
    pub fn from_config(config: &ConfigMap) -> Result<Self> {
        let required = |key: ConfigKey, flag: &str| {
            config
                .get(key.as_str())
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| {
                    NpError::config(format!(
                        "{} is not set; run `np config set {}`",
                        key.as_str(),
                        flag
                    ))
                })
        };

        Ok(Credentials {
            username: required(ConfigKey::Username, "--name <NAME>")?,
            password: required(ConfigKey::Password, "--pwd <PASSWORD>")?,
            registry: config
                .get(ConfigKey::Registry.as_str())
                .filter(|v| !v.is_empty())
                .cloned(),
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .field("registry", &self.registry)
            .finish()
    }
}
