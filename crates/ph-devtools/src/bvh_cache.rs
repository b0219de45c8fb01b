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

//! Regenerates the BVH caches shipped with the desktop samples.
//!
//! Each sample is started for a single offscreen frame with the cache-saving
//! environment variable set. Runs are best effort: a missing binary is
//! skipped and a failing run does not stop the remaining ones.

use crate::config::{BvhCacheConfig, SdkRoot};
use crate::discovery;
use crate::process::{CommandRunner, ToolCommand};
use std::path::PathBuf;

/// Arguments given to every sample: offscreen, ray query disabled, one frame.
pub const BASE_ARGS: &[&str] = &["-oQ", "--max-frames", "1"];

/// One sample invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheRun {
    /// Sample program name, without platform suffix.
    pub program: &'static str,
    /// Extra arguments selecting a scene variant.
    pub extra_args: &'static [&'static str],
}

impl CacheRun {
    const fn new(program: &'static str, extra_args: &'static [&'static str]) -> Self {
        Self {
            program,
            extra_args,
        }
    }
}

/// Every scene whose BVH cache is checked in.
pub const CACHE_RUNS: &[CacheRun] = &[
    CacheRun::new("suzanne", &[]),
    CacheRun::new("suzanne", &["--glasses"]),
    CacheRun::new("suzanne", &["--helmet"]),
    CacheRun::new("suzanne", &["--rocket"]),
    CacheRun::new("ring", &[]),
    CacheRun::new("shadow", &[]),
    CacheRun::new("garage", &[]),
];

/// What happened to the runs of one regeneration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegenReport {
    /// Runs that exited successfully.
    pub succeeded: usize,
    /// Runs that could not start or exited with an error.
    pub failed: usize,
    /// Runs skipped because no binary was found.
    pub skipped: usize,
}

/// Locates the sample binaries and runs them.
#[derive(Debug, Clone)]
pub struct CacheRegenerator {
    root: SdkRoot,
    config: BvhCacheConfig,
}

impl CacheRegenerator {
    /// Creates a regenerator for the SDK at `root`.
    pub fn new(root: SdkRoot, config: BvhCacheConfig) -> Self {
        Self { root, config }
    }

    /// The most recent build of `program`, if any.
    pub fn locate(&self, program: &str) -> Option<PathBuf> {
        discovery::find_latest_binary(
            self.root.path(),
            &self.config.binary_template,
            program,
            &self.config.variants,
        )
    }

    /// The command regenerating the cache for `run` with the binary `exe`.
    pub fn command(&self, exe: PathBuf, run: &CacheRun) -> ToolCommand {
        ToolCommand::new(exe)
            .args(BASE_ARGS.iter().copied())
            .args(run.extra_args.iter().copied())
            .env(&self.config.env_var, "1")
    }

    /// Executes `runs` one after the other.
    pub fn run(&self, runner: &mut dyn CommandRunner, runs: &[CacheRun]) -> RegenReport {
        let mut report = RegenReport::default();
        for run in runs {
            let Some(exe) = self.locate(run.program) else {
                log::debug!("No binary found for '{}'. Skipping.", run.program);
                report.skipped += 1;
                continue;
            };

            let cmd = self.command(exe, run);
            match runner.check(&cmd) {
                Ok(()) => report.succeeded += 1,
                Err(err) => {
                    log::warn!("{err}");
                    report.failed += 1;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn table_runs_suzanne_with_each_accessory() {
        let suzanne: Vec<&[&str]> = CACHE_RUNS
            .iter()
            .filter(|run| run.program == "suzanne")
            .map(|run| run.extra_args)
            .collect();
        let expected: Vec<&[&str]> = vec![&[], &["--glasses"], &["--helmet"], &["--rocket"]];
        assert_eq!(suzanne, expected);
        assert!(CACHE_RUNS
            .iter()
            .filter(|run| run.program != "suzanne")
            .all(|run| run.extra_args.is_empty()));
    }

    #[test]
    fn command_sets_cache_variable_and_fixed_arguments() {
        let regen = CacheRegenerator::new(SdkRoot::new("sdk"), BvhCacheConfig::default());
        let cmd = regen.command(PathBuf::from("suzanne"), &CACHE_RUNS[2]);

        assert_eq!(cmd.args_lossy(), ["-oQ", "--max-frames", "1", "--helmet"]);
        assert_eq!(
            cmd.envs,
            vec![(OsString::from("PH_SAVE_BVH"), OsString::from("1"))]
        );
    }
}
