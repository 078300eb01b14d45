use crate::domain::prerelease::{PreRelease, PreReleaseTag};
use crate::error::{NpError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

const VERSION_PATTERN: &str = r"^(\d+)\.(\d+)\.(\d+)(?:-([A-Za-z]+)(?:\.(\d+))?)?$";

/// Semantic version of a package, with an optional pre-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre_release: Option<PreRelease>,
}

impl Version {
    /// Create a release version without pre-release state
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            pre_release: None,
        }
    }

    /// Create a pre-release version
    pub fn with_pre_release(mut self, tag: PreReleaseTag, number: u64) -> Self {
        self.pre_release = Some(PreRelease::new(tag, number));
        self
    }

    /// Parse `MAJOR.MINOR.PATCH` with an optional `-TAG[.NUMBER]` suffix.
    ///
    /// The tag must be one of the known [`PreReleaseTag`]s. A missing number
    /// parses as zero, which is also how a zero number renders.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let re = Regex::new(VERSION_PATTERN)
            .map_err(|e| NpError::invalid_version(format!("bad version pattern: {}", e)))?;

        let captures = re.captures(input).ok_or_else(|| {
            NpError::invalid_version(format!(
                "'{}' - expected MAJOR.MINOR.PATCH[-TAG.NUMBER]",
                input
            ))
        })?;

        let major = parse_component(&captures[1], "major")?;
        let minor = parse_component(&captures[2], "minor")?;
        let patch = parse_component(&captures[3], "patch")?;

        let pre_release = match captures.get(4) {
            Some(tag) => {
                let tag = tag.as_str().parse::<PreReleaseTag>()?;
                let number = match captures.get(5) {
                    Some(n) => parse_component(n.as_str(), "pre-release")?,
                    None => 0,
                };
                Some(PreRelease::new(tag, number))
            }
            None => None,
        };

        Ok(Version {
            major,
            minor,
            patch,
            pre_release,
        })
    }

    /// The pre-release tag, if any
    pub fn pre_release_tag(&self) -> Option<PreReleaseTag> {
        self.pre_release.map(|pr| pr.tag)
    }

    /// Continue the `tag` pre-release cycle, or start a new one at `.1`.
    ///
    /// Fails when the ordinal is already at its maximum.
    pub fn increment_pre_release(&mut self, tag: PreReleaseTag) -> Result<()> {
        match self.pre_release {
            Some(ref mut pr) if pr.tag == tag => {
                pr.number = increment(pr.number, "pre-release")?;
            }
            _ => self.pre_release = Some(PreRelease::new(tag, 1)),
        }
        Ok(())
    }

    /// Pin the pre-release ordinal. Has no effect on a release version.
    pub fn set_pre_release_number(&mut self, number: u64) {
        if let Some(pr) = self.pre_release.as_mut() {
            pr.number = number;
        }
    }

    /// Plain release increment: `patch + 1`, pre-release state dropped.
    pub fn bump_patch(&mut self) -> Result<()> {
        self.patch = increment(self.patch, "patch")?;
        self.pre_release = None;
        Ok(())
    }
}

fn increment(value: u64, name: &str) -> Result<u64> {
    value.checked_add(1).ok_or_else(|| {
        NpError::invalid_version(format!("{} component {} cannot be incremented", name, value))
    })
}

fn parse_component(raw: &str, name: &str) -> Result<u64> {
    raw.parse::<u64>()
        .map_err(|_| NpError::invalid_version(format!("invalid {} component: {}", name, raw)))
}

impl FromStr for Version {
    type Err = NpError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pr) = &self.pre_release {
            write!(f, "-{}", pr)?;
        }
        Ok(())
    }
}
