//! `np config` subcommands

use crate::config::{ConfigKey, ConfigMap, ConfigStore};
use crate::error::Result;

/// Values supplied to `np config set`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSetArgs {
    pub username: Option<String>,
    pub password: Option<String>,
    pub registry: Option<String>,
}

impl ConfigSetArgs {
    /// Supplied values keyed by their config key
    pub fn updates(&self) -> Vec<(ConfigKey, String)> {
        [
            (ConfigKey::Username, &self.username),
            (ConfigKey::Password, &self.password),
            (ConfigKey::Registry, &self.registry),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }
}

/// What `np config set` did
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSetOutcome {
    /// No values supplied; the store was not touched
    NothingToSet,
    /// These keys were written
    Updated(Vec<ConfigKey>),
}

/// Write every supplied value into the store.
pub fn run_config_set(store: &ConfigStore, args: &ConfigSetArgs) -> Result<ConfigSetOutcome> {
    let updates = args.updates();
    if updates.is_empty() {
        return Ok(ConfigSetOutcome::NothingToSet);
    }

    let keys: Vec<ConfigKey> = updates.iter().map(|(key, _)| *key).collect();
    store.set(
        updates
            .into_iter()
            .map(|(key, value)| (key.as_str(), value)),
    )?;
    Ok(ConfigSetOutcome::Updated(keys))
}

/// Stored entries, with the password masked.
pub fn run_config_list(store: &ConfigStore) -> Result<ConfigMap> {
    let mut config = store.load()?;
    if let Some(password) = config.get_mut(ConfigKey::Password.as_str()) {
        *password = mask(password);
    }
    Ok(config)
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "*".repeat(8)
    }
}
