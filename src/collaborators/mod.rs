//! External collaborators of the publish workflow
//!
//! Every side effect of a publish goes through one of the traits below, so the
//! workflow itself can run against the recording doubles in [`mock`] as well
//! as against the real `npm` and `git` executables.
//!
//! - [`npm::CommandBuild`]: runs the configured build command
//! - [`npm::NpmClient`]: `config set registry`, `login` and `publish`
//! - [`git::GitCli`]: `add`, `commit` and `push`
//! - [`crate::manifest::PackageManifest`]: `package.json` on disk

pub mod git;
pub mod mock;
pub mod npm;

pub use git::GitCli;
pub use npm::{CommandBuild, NpmClient};

use crate::config::Credentials;
use crate::domain::Version;
use crate::error::Result;

/// Source and sink of the package version.
pub trait ManifestStore {
    /// Version currently declared by the package
    fn current_version(&self) -> Result<Version>;

    /// Persist `version` as the package's declared version
    fn write_version(&mut self, version: &Version) -> Result<()>;
}

/// Produces the package's build output.
pub trait BuildRunner {
    /// Run the build, returning its console output
    fn build(&self) -> Result<String>;
}

/// Version control operations for the release commit.
pub trait VcsClient {
    /// Stage every change in the working tree
    fn stage_all(&self) -> Result<()>;

    /// Commit staged changes with `message`
    fn commit(&self, message: &str) -> Result<()>;

    /// Push `refspec` to `remote`
    fn push(&self, remote: &str, refspec: &str) -> Result<()>;
}

/// Package registry operations.
pub trait RegistryClient {
    /// Point the client at `url`
    fn set_registry(&self, url: &str) -> Result<()>;

    /// Authenticate with stored credentials, returning the client's output
    fn login(&self, credentials: &Credentials) -> Result<String>;

    /// Publish the package, under `dist_tag` when given, returning the client's output
    fn publish(&self, dist_tag: Option<&str>) -> Result<String>;
}
