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

//! Deploys the Android hub application and starts one of its activities.
//!
//! Installation goes through the project's Gradle wrapper; launching goes
//! through `adb shell am start`.

use crate::config::{LauncherConfig, SdkRoot};
use crate::discovery;
use crate::error::Result;
use crate::process::{CommandRunner, ToolCommand};
use std::fmt;
use std::path::PathBuf;

/// Which build of the hub application to deploy and launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildVariant {
    /// The default development build, installed with an id suffix.
    #[default]
    Debug,
    /// The release build.
    Release,
}

impl BuildVariant {
    /// Selects the variant from the release flag.
    pub fn from_release_flag(release: bool) -> Self {
        if release {
            BuildVariant::Release
        } else {
            BuildVariant::Debug
        }
    }

    /// Gradle task installing this variant.
    pub fn install_task(self) -> &'static str {
        match self {
            BuildVariant::Debug => "installDebug",
            BuildVariant::Release => "installRelease",
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildVariant::Debug => f.write_str("Debug"),
            BuildVariant::Release => f.write_str("Release"),
        }
    }
}

/// The activities of the hub application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    /// The scene picker.
    #[default]
    Main,
    /// The garage scene.
    Garage,
    /// The ring scene.
    Ring,
    /// The path tracer demo scene.
    PathTracerDemo,
    /// The test activity.
    Test,
}

impl Activity {
    /// Java class name of the activity.
    pub fn class_name(self) -> &'static str {
        match self {
            Activity::Main => "MainActivity",
            Activity::Garage => "GarageActivity",
            Activity::Ring => "RingActivity",
            Activity::PathTracerDemo => "PTDemoActivity",
            Activity::Test => "TestActivity",
        }
    }
}

/// Scene selection flags as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SceneFlags {
    /// `-G`
    pub garage: bool,
    /// `-R`
    pub ring: bool,
    /// `-P`
    pub path_tracer_demo: bool,
    /// `-T`
    pub test: bool,
}

/// Resolves the activity to start.
///
/// Flags are checked in the order garage, ring, path tracer demo, test and
/// each set flag overrides the previous choice, so the last one wins.
pub fn resolve_activity(flags: SceneFlags) -> Activity {
    let mut activity = Activity::Main;
    if flags.garage {
        activity = Activity::Garage;
    }
    if flags.ring {
        activity = Activity::Ring;
    }
    if flags.path_tracer_demo {
        activity = Activity::PathTracerDemo;
    }
    if flags.test {
        activity = Activity::Test;
    }
    activity
}

/// Everything the launcher needs to know about one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Serial number of the target device, when several are attached.
    pub device: Option<String>,
    /// Build variant to install and start.
    pub variant: BuildVariant,
    /// Scene selection.
    pub scenes: SceneFlags,
    /// Skip the Gradle installation step.
    pub skip_install: bool,
}

/// Drives Gradle and `adb` for the hub application.
#[derive(Debug, Clone)]
pub struct Launcher {
    gradle: PathBuf,
    adb: PathBuf,
    package: String,
    debug_suffix: String,
}

impl Launcher {
    /// Builds a launcher from the `[launcher]` configuration section.
    pub fn from_config(root: &SdkRoot, config: &LauncherConfig) -> Self {
        let project_dir = root.resolve(&config.project_dir);
        Self {
            gradle: discovery::gradle_wrapper(&project_dir),
            adb: discovery::adb_path(config.adb.as_deref()),
            package: config.package.clone(),
            debug_suffix: config.debug_suffix.clone(),
        }
    }

    /// Builds a launcher from explicit tool paths.
    ///
    /// Gradle runs from the directory holding the wrapper.
    pub fn new(
        gradle: impl Into<PathBuf>,
        adb: impl Into<PathBuf>,
        package: impl Into<String>,
        debug_suffix: impl Into<String>,
    ) -> Self {
        Self {
            gradle: gradle.into(),
            adb: adb.into(),
            package: package.into(),
            debug_suffix: debug_suffix.into(),
        }
    }

    /// Installs (unless skipped) and then starts the selected activity.
    pub fn run(&self, runner: &mut dyn CommandRunner, options: &LaunchOptions) -> Result<Activity> {
        if options.skip_install {
            log::debug!("Skipping installation");
        } else {
            self.install(runner, options.variant)?;
        }
        let activity = resolve_activity(options.scenes);
        self.start(runner, options.device.as_deref(), options.variant, activity)?;
        Ok(activity)
    }

    /// Installs `variant` on the device.
    ///
    /// A failed first attempt is followed by `uninstallAll` and exactly one
    /// more install. Any failure after that is returned.
    pub fn install(&self, runner: &mut dyn CommandRunner, variant: BuildVariant) -> Result<()> {
        log::info!("Deploy {variant} build to phone...");
        let install = self.gradle_task(variant.install_task());

        match runner.check(&install) {
            Err(err) if err.is_tool_failure() => {
                log::warn!("{err}. Uninstalling and retrying once.");
                runner.check(&self.gradle_task("uninstallAll"))?;
                runner.check(&install)
            }
            other => other,
        }
    }

    /// A Gradle wrapper invocation run from the Android project directory.
    pub fn gradle_task(&self, task: &str) -> ToolCommand {
        let cmd = ToolCommand::new(&self.gradle).arg(task);
        match self.gradle.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            Some(project_dir) => cmd.current_dir(project_dir),
            None => cmd,
        }
    }

    /// The `am start` component string for `activity`.
    pub fn component(&self, variant: BuildVariant, activity: Activity) -> String {
        let suffix = match variant {
            BuildVariant::Debug => self.debug_suffix.as_str(),
            BuildVariant::Release => "",
        };
        format!(
            "{package}{suffix}/{package}.{class}",
            package = self.package,
            class = activity.class_name()
        )
    }

    /// Starts `activity` through `adb`.
    pub fn start(
        &self,
        runner: &mut dyn CommandRunner,
        device: Option<&str>,
        variant: BuildVariant,
        activity: Activity,
    ) -> Result<()> {
        log::info!("Launching {}...", activity.class_name());
        let mut cmd = ToolCommand::new(&self.adb);
        if let Some(serial) = device {
            cmd = cmd.args(["-s", serial]);
        }
        let cmd = cmd.args([
            "shell".to_string(),
            format!("am start {}", self.component(variant, activity)),
        ]);
        runner.check(&cmd)
    }
}
