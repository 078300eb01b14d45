use crate::collaborators::VcsClient;
use crate::error::Result;
use crate::process::ProcessRunner;

/// Release commit via the `git` executable, so the user's own credential
/// helpers and hooks apply to the push.
#[derive(Debug, Clone)]
pub struct GitCli {
    runner: ProcessRunner,
}

impl GitCli {
    pub fn new(runner: ProcessRunner) -> Self {
        GitCli { runner }
    }
}

impl VcsClient for GitCli {
    fn stage_all(&self) -> Result<()> {
        self.runner.run("git", &["add", "."])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.runner.run("git", &["commit", "-m", message])?;
        Ok(())
    }

    fn push(&self, remote: &str, refspec: &str) -> Result<()> {
        self.runner.run("git", &["push", remote, refspec])?;
        Ok(())
    }
}
