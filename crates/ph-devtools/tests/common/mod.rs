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

use ph_devtools::{CommandRunner, Error, Result, ToolCommand, ToolStatus};
use std::collections::VecDeque;

/// Records every command and replays scripted exit statuses.
/// Once the script runs out, every command succeeds.
#[derive(Default)]
pub struct RecordingRunner {
    pub commands: Vec<ToolCommand>,
    statuses: VecDeque<Result<ToolStatus>>,
    on_run: Option<Box<dyn FnMut(&ToolCommand)>>,
}

#[allow(dead_code)]
impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the outcome of the next unscripted command.
    pub fn then_exit(mut self, code: i32) -> Self {
        self.statuses.push_back(Ok(ToolStatus::from_code(code)));
        self
    }

    /// Queues a spawn failure for the next unscripted command.
    pub fn then_fail_to_spawn(mut self) -> Self {
        self.statuses.push_back(Err(Error::Spawn {
            program: "scripted".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "scripted"),
        }));
        self
    }

    /// Runs `hook` for every command, before its status is returned.
    pub fn with_hook(mut self, hook: impl FnMut(&ToolCommand) + 'static) -> Self {
        self.on_run = Some(Box::new(hook));
        self
    }

    /// The command lines seen so far, `Display`-formatted.
    pub fn lines(&self) -> Vec<String> {
        self.commands.iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, command: &ToolCommand) -> Result<ToolStatus> {
        self.commands.push(command.clone());
        if let Some(hook) = self.on_run.as_mut() {
            hook(command);
        }
        self.statuses
            .pop_front()
            .unwrap_or(Ok(ToolStatus::SUCCESS))
    }
}
