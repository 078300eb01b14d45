//! `package.json` access
//!
//! Only the `version` field is ever modified. The document is kept as an
//! ordered JSON object so every other field survives a rewrite in place.

use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::collaborators::ManifestStore;
use crate::domain::Version;
use crate::error::{NpError, Result};

/// Default manifest file name
pub const MANIFEST_FILE_NAME: &str = "package.json";

/// A `package.json` document bound to its path on disk
#[derive(Debug, Clone)]
pub struct PackageManifest {
    path: PathBuf,
    document: Map<String, Value>,
}

impl PackageManifest {
    /// Read and parse the manifest at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path)
            .map_err(|e| NpError::manifest(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(path, &content)
    }

    /// Parse manifest `content` that belongs to `path`.
    pub fn from_json(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let document = match serde_json::from_str::<Value>(content)? {
            Value::Object(map) => map,
            _ => {
                return Err(NpError::manifest(format!(
                    "{} is not a JSON object",
                    path.display()
                )))
            }
        };
        Ok(PackageManifest { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> Option<&str> {
        self.document.get("name").and_then(Value::as_str)
    }

    /// The raw `version` string.
    pub fn raw_version(&self) -> Result<&str> {
        self.document
            .get("version")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                NpError::manifest(format!(
                    "{} has no string \"version\" field",
                    self.path.display()
                ))
            })
    }

    pub fn version(&self) -> Result<Version> {
        Version::parse(self.raw_version()?)
    }

    /// Replace the `version` field, keeping its position in the document.
    pub fn set_version(&mut self, version: &Version) {
        self.document
            .insert("version".to_string(), Value::String(version.to_string()));
    }

    /// Serialize with two-space indentation and a trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        let mut out = serde_json::to_string_pretty(&self.document)?;
        out.push('\n');
        Ok(out)
    }

    pub fn save(&self) -> Result<()> {
        let content = self.to_json_string()?;
        fs::write(&self.path, content)
            .map_err(|e| NpError::manifest(format!("cannot write {}: {}", self.path.display(), e)))?;
        debug!(path = %self.path.display(), "manifest written");
        Ok(())
    }
}

impl ManifestStore for PackageManifest {
    fn current_version(&self) -> Result<Version> {
        self.version()
    }

    fn write_version(&mut self, version: &Version) -> Result<()> {
        self.set_version(version);
        self.save()
    }
}
