use crate::collaborators::{BuildRunner, RegistryClient};
use crate::config::Credentials;
use crate::error::{NpError, Result};
use crate::process::ProcessRunner;

/// Build step backed by an arbitrary command line, `npm run build` by default
#[derive(Debug, Clone)]
pub struct CommandBuild {
    runner: ProcessRunner,
    command: Vec<String>,
}

impl CommandBuild {
    pub fn new(runner: ProcessRunner, command: Vec<String>) -> Self {
        CommandBuild { runner, command }
    }
}

impl BuildRunner for CommandBuild {
    fn build(&self) -> Result<String> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| NpError::settings("build command is empty"))?;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.runner.run(program, &args)
    }
}

/// Registry client driving the `npm` executable (or a compatible one)
#[derive(Debug, Clone)]
pub struct NpmClient {
    runner: ProcessRunner,
    program: String,
}

impl NpmClient {
    pub fn new(runner: ProcessRunner, program: impl Into<String>) -> Self {
        NpmClient {
            runner,
            program: program.into(),
        }
    }
}

/// Answers to the interactive `login` prompts: username, password and an
/// empty line for the e-mail prompt older clients still show.
pub fn login_input(credentials: &Credentials) -> String {
    format!("{}\n{}\n\n", credentials.username, credentials.password)
}

/// Arguments for `publish`, adding `--tag` for pre-releases.
pub fn publish_args(dist_tag: Option<&str>) -> Vec<&str> {
    match dist_tag {
        Some(tag) => vec!["publish", "--tag", tag],
        None => vec!["publish"],
    }
}

impl RegistryClient for NpmClient {
    fn set_registry(&self, url: &str) -> Result<()> {
        self.runner
            .run(&self.program, &["config", "set", "registry", url])?;
        Ok(())
    }

    fn login(&self, credentials: &Credentials) -> Result<String> {
        self.runner
            .run_with_input(&self.program, &["login"], &login_input(credentials))
    }

    fn publish(&self, dist_tag: Option<&str>) -> Result<String> {
        self.runner.run(&self.program, &publish_args(dist_tag))
    }
}
