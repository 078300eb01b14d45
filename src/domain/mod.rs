//! Domain logic - version model and update rules, free of I/O

pub mod prerelease;
pub mod selection;
pub mod version;

pub use prerelease::{PreRelease, PreReleaseTag};
pub use selection::{is_upgrade, next_version, VersionChange, VersionRequest};
pub use version::Version;
