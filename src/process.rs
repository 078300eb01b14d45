use crate::error::{NpError, Result};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Runs external programs in a fixed working directory
///
/// A program that cannot be started, or exits with a non-zero status, is
/// reported as [`NpError::Command`] carrying its captured output.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    cwd: PathBuf,
}

impl ProcessRunner {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        ProcessRunner { cwd: cwd.into() }
    }

    /// Run `program` with `args` and return its combined stdout and stderr.
    pub fn run(&self, program: &str, args: &[&str]) -> Result<String> {
        let command = command_line(program, args);
        debug!(command = %command, cwd = %self.cwd.display(), "running command");

        let output = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| NpError::command(&command, -1, format!("failed to start: {}", e)))?;

        check_output(&command, output)
    }

    /// Like [`run`](Self::run), but writes `input` to the child's stdin first.
    pub fn run_with_input(&self, program: &str, args: &[&str], input: &str) -> Result<String> {
        let command = command_line(program, args);
        debug!(command = %command, cwd = %self.cwd.display(), "running command with piped stdin");

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&self.cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| NpError::command(&command, -1, format!("failed to start: {}", e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        check_output(&command, output)
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn check_output(command: &str, output: Output) -> Result<String> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{}{}", stdout, stderr).trim_end().to_string();

    if !output.status.success() {
        return Err(NpError::command(
            command,
            output.status.code().unwrap_or(-1),
            combined,
        ));
    }

    debug!(command = %command, "command succeeded");
    Ok(combined)
}
