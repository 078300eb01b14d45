//! Pre-release labels for semantic versions
//!
//! A pre-release is a tag from a fixed set (alpha, beta, rc) plus an ordinal
//! distinguishing successive builds of the same cycle, e.g. `alpha.3`.

use crate::error::{NpError, Result};
use std::fmt;
use std::str::FromStr;

/// Pre-release tag accepted by np
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PreReleaseTag {
    Alpha,
    Beta,
    ReleaseCandidate,
}

impl PreReleaseTag {
    /// All accepted tags, in release order.
    pub const ALL: [PreReleaseTag; 3] = [
        PreReleaseTag::Alpha,
        PreReleaseTag::Beta,
        PreReleaseTag::ReleaseCandidate,
    ];

    /// The lower-case form used in version strings and npm dist-tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            PreReleaseTag::Alpha => "alpha",
            PreReleaseTag::Beta => "beta",
            PreReleaseTag::ReleaseCandidate => "rc",
        }
    }
}

impl FromStr for PreReleaseTag {
    type Err = NpError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        PreReleaseTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == wanted)
            .ok_or_else(|| {
                let expected: Vec<&str> = PreReleaseTag::ALL.iter().map(|t| t.as_str()).collect();
                NpError::invalid_version(format!(
                    "unknown pre-release tag '{}' (expected one of: {})",
                    s,
                    expected.join(", ")
                ))
            })
    }
}

impl fmt::Display for PreReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pre-release state of a version: tag and ordinal.
///
/// An ordinal of zero is rendered as the bare tag (`alpha`), anything greater
/// as `alpha.N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreRelease {
    pub tag: PreReleaseTag,
    pub number: u64,
}

impl PreRelease {
    pub fn new(tag: PreReleaseTag, number: u64) -> Self {
        PreRelease { tag, number }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag)?;
        if self.number > 0 {
            write!(f, ".{}", self.number)?;
        }
        Ok(())
    }
}
