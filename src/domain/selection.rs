//! Choosing the next version to publish
//!
//! An explicit version always wins. Otherwise a requested pre-release tag
//! continues (or starts) a pre-release cycle, and with no flags at all the
//! patch component is bumped.

use crate::domain::prerelease::PreReleaseTag;
use crate::domain::version::Version;
use crate::error::{NpError, Result};

/// Version-related inputs of a publish run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionRequest {
    /// Version given verbatim on the command line
    pub explicit: Option<String>,
    /// Pre-release tag to publish under
    pub tag: Option<PreReleaseTag>,
    /// Pre-release ordinal to pin; required together with `tag`
    pub pre_release_number: Option<u64>,
}

/// Which update rule produced the next version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionChange {
    Explicit,
    PreRelease,
    Patch,
}

/// Computes the version to publish from the manifest's current version.
pub fn next_version(current: &Version, request: &VersionRequest) -> Result<(Version, VersionChange)> {
    if let Some(explicit) = &request.explicit {
        return Ok((Version::parse(explicit)?, VersionChange::Explicit));
    }

    let mut next = *current;
    match request.tag {
        Some(tag) => {
            let number = request
                .pre_release_number
                .ok_or_else(|| NpError::MissingPreReleaseNumber(tag.to_string()))?;
            next.increment_pre_release(tag)?;
            next.set_pre_release_number(number);
            Ok((next, VersionChange::PreRelease))
        }
        None => {
            next.bump_patch()?;
            Ok((next, VersionChange::Patch))
        }
    }
}

/// Whether `next` has higher semver precedence than `current`.
pub fn is_upgrade(current: &Version, next: &Version) -> bool {
    match (
        semver::Version::parse(&current.to_string()),
        semver::Version::parse(&next.to_string()),
    ) {
        (Ok(current), Ok(next)) => next > current,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(explicit: Option<&str>, tag: Option<PreReleaseTag>, n: Option<u64>) -> VersionRequest {
        VersionRequest {
            explicit: explicit.map(String::from),
            tag,
            pre_release_number: n,
        }
    }

    #[test]
    fn test_explicit_version_wins_over_tag() {
        let current = Version::new(1, 0, 0);
        let (next, change) = next_version(
            &current,
            &request(Some("3.0.0"), Some(PreReleaseTag::Beta), Some(2)),
        )
        .unwrap();
        assert_eq!(next, Version::new(3, 0, 0));
        assert_eq!(change, VersionChange::Explicit);
    }

    #[test]
    fn test_explicit_version_must_parse() {
        let current = Version::new(1, 0, 0);
        assert!(next_version(&current, &request(Some("latest"), None, None)).is_err());
    }

    #[test]
    fn test_tag_wins_over_patch_bump() {
        let current = Version::new(1, 2, 3);
        let (next, change) =
            next_version(&current, &request(None, Some(PreReleaseTag::Alpha), Some(1))).unwrap();
        assert_eq!(next.to_string(), "1.2.3-alpha.1");
        assert_eq!(change, VersionChange::PreRelease);
    }

    #[test]
    fn test_tag_number_pins_ordinal() {
        let current = Version::parse("1.2.3-alpha.4").unwrap();
        let (next, _) =
            next_version(&current, &request(None, Some(PreReleaseTag::Alpha), Some(7))).unwrap();
        assert_eq!(next.to_string(), "1.2.3-alpha.7");
    }

    #[test]
    fn test_tag_without_number_is_an_error() {
        let current = Version::new(1, 2, 3);
        let err =
            next_version(&current, &request(None, Some(PreReleaseTag::Beta), None)).unwrap_err();
        assert!(matches!(err, NpError::MissingPreReleaseNumber(ref t) if t == "beta"));
    }

    #[test]
    fn test_default_is_patch_bump() {
        let current = Version::new(1, 2, 3);
        let (next, change) = next_version(&current, &VersionRequest::default()).unwrap();
        assert_eq!(next.to_string(), "1.2.4");
        assert_eq!(change, VersionChange::Patch);
    }

    #[test]
    fn test_number_without_tag_is_ignored() {
        let current = Version::new(1, 2, 3);
        let (next, _) = next_version(&current, &request(None, None, Some(5))).unwrap();
        assert_eq!(next.to_string(), "1.2.4");
    }

    #[test]
    fn test_largest_components_are_rejected_not_wrapped() {
        let current = Version::parse("1.2.18446744073709551615").unwrap();
        let err = next_version(&current, &VersionRequest::default()).unwrap_err();
        assert!(matches!(err, NpError::InvalidVersion(_)));

        let current = Version::parse("1.2.3-alpha.18446744073709551615").unwrap();
        let err = next_version(&current, &request(None, Some(PreReleaseTag::Alpha), Some(1)))
            .unwrap_err();
        assert!(matches!(err, NpError::InvalidVersion(_)));
    }

    #[test]
    fn test_is_upgrade() {
        let v = |s: &str| Version::parse(s).unwrap();
        assert!(is_upgrade(&v("1.2.3"), &v("1.2.4")));
        assert!(is_upgrade(&v("1.2.3-alpha.1"), &v("1.2.3-alpha.2")));
        assert!(is_upgrade(&v("1.2.3-alpha.2"), &v("1.2.3-beta.1")));
        assert!(is_upgrade(&v("1.2.3-rc.1"), &v("1.2.3")));
        assert!(!is_upgrade(&v("1.2.3"), &v("1.2.3")));
        assert!(!is_upgrade(&v("2.0.0"), &v("1.9.9")));
        assert!(!is_upgrade(&v("1.2.3"), &v("1.2.3-alpha.1")));
    }
}
