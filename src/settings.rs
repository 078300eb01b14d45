use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{NpError, Result};

/// Project-local settings file name
pub const SETTINGS_FILE_NAME: &str = "np.toml";

/// Represents the project settings for np.
///
/// Describes which commands run during a publish and how the release commit is pushed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct ProjectSettings {
    #[serde(default)]
    pub build: BuildSettings,

    #[serde(default)]
    pub git: GitSettings,

    #[serde(default)]
    pub registry: RegistrySettings,
}

/// Returns the default build command.
fn default_build_command() -> Vec<String> {
    vec!["npm".to_string(), "run".to_string(), "build".to_string()]
}

/// Build step configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BuildSettings {
    /// Program and arguments, executed without a shell
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,
}

impl Default for BuildSettings {
    fn default() -> Self {
        BuildSettings {
            command: default_build_command(),
        }
    }
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_push_ref() -> String {
    "HEAD".to_string()
}

fn default_commit_message() -> String {
    "Added version {version}".to_string()
}

/// Release commit configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GitSettings {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_push_ref")]
    pub push_ref: String,

    /// Commit message template; `{version}` is replaced by the new version
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl Default for GitSettings {
    fn default() -> Self {
        GitSettings {
            remote: default_remote(),
            push_ref: default_push_ref(),
            commit_message: default_commit_message(),
        }
    }
}

impl GitSettings {
    /// Render the commit message for `version`.
    pub fn commit_message_for(&self, version: &str) -> String {
        self.commit_message.replace("{version}", version)
    }
}

fn default_client() -> String {
    "npm".to_string()
}

/// Registry client configuration.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RegistrySettings {
    /// Program used for `config set registry`, `login` and `publish`
    #[serde(default = "default_client")]
    pub client: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        RegistrySettings {
            client: default_client(),
        }
    }
}

/// Loads project settings from file or returns defaults.
///
/// Attempts to load settings in the following order:
/// 1. Custom path provided as parameter
/// 2. `np.toml` in current directory
/// 3. `np/np.toml` in the user config directory
/// 4. Default settings if no file found
///
/// # Returns
/// * `Ok(ProjectSettings)` - Loaded or default settings
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_settings(settings_path: Option<&str>) -> Result<ProjectSettings> {
    let path: PathBuf = if let Some(path) = settings_path {
        PathBuf::from(path)
    } else if Path::new(SETTINGS_FILE_NAME).exists() {
        PathBuf::from(SETTINGS_FILE_NAME)
    } else if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("np").join(SETTINGS_FILE_NAME);
        if path.exists() {
            path
        } else {
            return Ok(ProjectSettings::default());
        }
    } else {
        return Ok(ProjectSettings::default());
    };

    let content = fs::read_to_string(&path)
        .map_err(|e| NpError::settings(format!("cannot read {}: {}", path.display(), e)))?;
    let settings = parse_settings(&content)
        .map_err(|e| NpError::settings(format!("{}: {}", path.display(), e)))?;
    Ok(settings)
}

/// Parses and validates a settings document.
pub fn parse_settings(content: &str) -> Result<ProjectSettings> {
    let settings: ProjectSettings =
        toml::from_str(content).map_err(|e| NpError::settings(e.to_string()))?;

    if settings.build.command.is_empty() {
        return Err(NpError::settings("build.command must not be empty"));
    }
    if settings.registry.client.trim().is_empty() {
        return Err(NpError::settings("registry.client must not be empty"));
    }
    Ok(settings)
}
