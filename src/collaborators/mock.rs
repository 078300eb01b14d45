use std::cell::RefCell;
use std::rc::Rc;

use crate::collaborators::{BuildRunner, ManifestStore, RegistryClient, VcsClient};
use crate::config::Credentials;
use crate::domain::Version;
use crate::error::{NpError, Result};

/// Ordered record of collaborator calls, shared by all mocks of one test
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    /// All calls recorded so far, oldest first
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

fn mock_failure(call: &str) -> NpError {
    NpError::command(call, 1, "mock failure")
}

/// In-memory manifest holding a single version
pub struct MockManifest {
    version: Version,
    log: CallLog,
}

impl MockManifest {
    pub fn new(version: Version, log: CallLog) -> Self {
        MockManifest { version, log }
    }

    /// Version as last written (or as created)
    pub fn version(&self) -> Version {
        self.version
    }
}

impl ManifestStore for MockManifest {
    fn current_version(&self) -> Result<Version> {
        Ok(self.version)
    }

    fn write_version(&mut self, version: &Version) -> Result<()> {
        self.log.record(format!("manifest {}", version));
        self.version = *version;
        Ok(())
    }
}

/// Build that succeeds or fails on demand
pub struct MockBuild {
    log: CallLog,
    fail: bool,
}

impl MockBuild {
    pub fn new(log: CallLog) -> Self {
        MockBuild { log, fail: false }
    }

    pub fn failing(log: CallLog) -> Self {
        MockBuild { log, fail: true }
    }
}

impl BuildRunner for MockBuild {
    fn build(&self) -> Result<String> {
        self.log.record("build");
        if self.fail {
            return Err(mock_failure("build"));
        }
        Ok("built".to_string())
    }
}

/// Version control double; `fail_on` names the operation that errors
/// (`add`, `commit` or `push`)
pub struct MockVcs {
    log: CallLog,
    fail_on: Option<&'static str>,
}

impl MockVcs {
    pub fn new(log: CallLog) -> Self {
        MockVcs { log, fail_on: None }
    }

    pub fn failing_on(log: CallLog, operation: &'static str) -> Self {
        MockVcs {
            log,
            fail_on: Some(operation),
        }
    }

    fn call(&self, operation: &str, detail: String) -> Result<()> {
        self.log.record(format!("git {}{}", operation, detail));
        if self.fail_on == Some(operation) {
            return Err(mock_failure(operation));
        }
        Ok(())
    }
}

impl VcsClient for MockVcs {
    fn stage_all(&self) -> Result<()> {
        self.call("add", String::new())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.call("commit", format!(" {}", message))
    }

    fn push(&self, remote: &str, refspec: &str) -> Result<()> {
        self.call("push", format!(" {} {}", remote, refspec))
    }
}

/// Registry double; `fail_on` names the operation that errors
/// (`registry`, `login` or `publish`)
pub struct MockRegistry {
    log: CallLog,
    fail_on: Option<&'static str>,
}

impl MockRegistry {
    pub fn new(log: CallLog) -> Self {
        MockRegistry { log, fail_on: None }
    }

    pub fn failing_on(log: CallLog, operation: &'static str) -> Self {
        MockRegistry {
            log,
            fail_on: Some(operation),
        }
    }

    fn call(&self, operation: &str, detail: String) -> Result<String> {
        self.log.record(format!("{}{}", operation, detail));
        if self.fail_on == Some(operation) {
            return Err(mock_failure(operation));
        }
        Ok(format!("{} ok", operation))
    }
}

impl RegistryClient for MockRegistry {
    fn set_registry(&self, url: &str) -> Result<()> {
        self.call("registry", format!(" {}", url))?;
        Ok(())
    }

    fn login(&self, credentials: &Credentials) -> Result<String> {
        self.call("login", format!(" {}", credentials.username))
    }

    fn publish(&self, dist_tag: Option<&str>) -> Result<String> {
        let detail = dist_tag
            .map(|tag| format!(" --tag {}", tag))
            .unwrap_or_default();
        self.call("publish", detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_log_is_shared_between_mocks() {
        let log = CallLog::new();
        let build = MockBuild::new(log.clone());
        let vcs = MockVcs::new(log.clone());

        build.build().unwrap();
        vcs.commit("msg").unwrap();

        assert_eq!(log.calls(), vec!["build", "git commit msg"]);
    }

    #[test]
    fn test_mock_manifest_keeps_written_version() {
        let log = CallLog::new();
        let mut manifest = MockManifest::new(Version::new(1, 0, 0), log.clone());
        manifest.write_version(&Version::new(1, 0, 1)).unwrap();
        assert_eq!(manifest.current_version().unwrap(), Version::new(1, 0, 1));
        assert_eq!(log.calls(), vec!["manifest 1.0.1"]);
    }

    #[test]
    fn test_failing_operation_still_records_call() {
        let log = CallLog::new();
        let registry = MockRegistry::failing_on(log.clone(), "publish");
        assert!(registry.publish(Some("beta")).is_err());
        assert_eq!(log.calls(), vec!["publish --tag beta"]);
    }
}
