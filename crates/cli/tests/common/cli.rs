//! CLI command execution helpers with automatic timing
//!
//! Wraps the built `agerotate` binary, measures how long each invocation
//! takes and offers a few assertion helpers.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct RotateCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
}

impl RotateCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_agerotate")),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    #[allow(dead_code)]
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let output = Command::new(&self.binary_path)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .envs(&self.env)
            .env("NO_COLOR", "1")
            .output()
            .context("Failed to execute command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    #[allow(dead_code)]
    pub duration: Duration,
}

impl CommandResult {
    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```ignore
/// rotate!(dir, "check", "--config", "rotate.conf").assert_success()?;
/// ```
#[macro_export]
macro_rules! rotate {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::RotateCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
