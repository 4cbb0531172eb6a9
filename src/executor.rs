// file: src/executor.rs
// version: 1.0.0
// guid: f90c0c4e-c5b4-4c8d-a35b-7e5146128a49

//! Blocking execution of external tools and interpretation of their output

use crate::env;
use crate::error::{Result, ToolError};
use crate::outcome::Payload;
use std::collections::HashMap;
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// A single command line to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Positional argument
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.args.push(value.to_string());
        self
    }

    pub fn args<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: fmt::Display,
    {
        self.args.extend(values.into_iter().map(|v| v.to_string()));
        self
    }

    /// `--name=value`
    pub fn flag(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.args.push(format!("--{}={}", name, value));
        self
    }

    /// `--name=value`, dropped when the value is missing or empty
    pub fn opt_flag<V: fmt::Display>(self, name: &str, value: Option<V>) -> Self {
        match value.map(|value| value.to_string()) {
            Some(value) if !value.is_empty() => self.flag(name, value),
            _ => self,
        }
    }

    /// Bare `--name`
    pub fn switch(mut self, name: &str) -> Self {
        self.args.push(format!("--{}", name));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured output of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
}

impl RawOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn err(stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// Anything that can run an [`Invocation`] to completion
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<RawOutput>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<RawOutput> {
        (**self).run(invocation)
    }
}

/// Runs tools as real child processes
#[derive(Debug, Clone, Copy)]
pub struct SystemRunner {
    env: &'static HashMap<OsString, OsString>,
}

impl SystemRunner {
    /// Create a runner whose children see `extra_paths` in front of `PATH`
    pub fn new(extra_paths: &[PathBuf]) -> Result<Self> {
        Ok(Self {
            env: env::tool_env(extra_paths)?,
        })
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<RawOutput> {
        let mut cmd = Command::new(invocation.program());
        cmd.args(invocation.get_args())
            .env_clear()
            .envs(self.env.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = invocation.get_current_dir() {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| ToolError::Spawn {
            program: invocation.program().to_string(),
            source: e,
        })?;

        Ok(RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Turn captured output into a payload.
///
/// Any text on stderr is a failure regardless of exit status.
pub fn interpret(program: &str, output: RawOutput) -> Result<Payload> {
    if !output.stderr.is_empty() {
        return Err(ToolError::cli(program, output.stderr));
    }
    Ok(Payload::parse(&output.stdout))
}

/// Runner plus output interpretation
pub struct Executor<R> {
    runner: R,
}

impl<R: CommandRunner> Executor<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    pub fn run(&self, invocation: &Invocation) -> Result<Payload> {
        let output = self.run_raw(invocation)?;
        interpret(invocation.program(), output)
    }

    /// Trimmed stdout, for tools that print a single value such as an
    /// address or a hash. Skips JSON decoding so digit-only output stays text.
    pub fn run_text(&self, invocation: &Invocation) -> Result<String> {
        let output = self.run_raw(invocation)?;
        Ok(output.stdout.trim().to_string())
    }

    fn run_raw(&self, invocation: &Invocation) -> Result<RawOutput> {
        debug!("Executing: {}", invocation);
        if let Some(dir) = invocation.get_current_dir() {
            debug!("Working directory: {}", dir.display());
        }

        let output = self.runner.run(invocation)?;
        if !output.stderr.is_empty() {
            warn!("{} failed: {}", invocation.program(), output.stderr.trim_end());
            return Err(ToolError::cli(invocation.program(), output.stderr));
        }
        Ok(output)
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }
}
