// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Blocking invocation of external tools.
//!
//! Every tool in this crate describes the programs it wants to run as
//! [`ToolCommand`] values and hands them to a [`CommandRunner`]. The
//! production implementation is [`SystemRunner`]; tests substitute a runner
//! that records commands and replays scripted exit statuses.

use crate::error::{Error, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

/// A single external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// The program to execute.
    pub program: PathBuf,
    /// Arguments passed to the program, in order.
    pub args: Vec<OsString>,
    /// Variables added to the inherited environment.
    pub envs: Vec<(OsString, OsString)>,
    /// Working directory of the child. Inherited when `None`.
    pub current_dir: Option<PathBuf>,
}

impl ToolCommand {
    /// Creates a command with no arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets an environment variable for the child process only.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Runs the program from `dir`.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Returns the arguments as lossy UTF-8 strings.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How an external program exited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    /// The exit code, or `None` if the process was terminated by a signal.
    pub code: Option<i32>,
}

impl ToolStatus {
    /// A successful exit.
    pub const SUCCESS: ToolStatus = ToolStatus { code: Some(0) };

    /// A status carrying the given exit code.
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Returns `true` for a zero exit code.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ToolStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Executes [`ToolCommand`]s.
pub trait CommandRunner {
    /// Runs `command` to completion and reports how it exited.
    ///
    /// # Errors
    /// Returns [`Error::Spawn`] if the program could not be started.
    fn run(&mut self, command: &ToolCommand) -> Result<ToolStatus>;

    /// Runs `command` and treats a non-zero exit as an error.
    ///
    /// # Errors
    /// Returns [`Error::ToolFailed`] when the program exits unsuccessfully, in
    /// addition to the errors of [`CommandRunner::run`].
    fn check(&mut self, command: &ToolCommand) -> Result<()> {
        let status = self.run(command)?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                command: command.to_string(),
                status,
            })
        }
    }
}

/// Runs commands as real child processes with inherited stdio.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Creates a new runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<ToolStatus> {
        log::info!("{command}");
        let start_time = Instant::now();

        let mut child = Command::new(&command.program);
        child
            .args(&command.args)
            .envs(command.envs.iter().map(|(k, v)| (k, v)));
        if let Some(dir) = &command.current_dir {
            child.current_dir(dir);
        }

        let status = child
            .status()
            .map_err(|source| Error::Spawn {
                program: command.program.display().to_string(),
                source,
            })?;

        let status = ToolStatus::from(status);
        log::debug!(
            "'{}' finished with {} in {:.2}s",
            command.program.display(),
            status,
            start_time.elapsed().as_secs_f64()
        );
        Ok(status)
    }
}
