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

mod common;

use common::RecordingRunner;
use ph_devtools::launcher::{Activity, BuildVariant, LaunchOptions, Launcher, SceneFlags};
use ph_devtools::config::{LauncherConfig, SdkRoot};
use ph_devtools::Error;
use std::path::{Path, PathBuf};

fn launcher() -> Launcher {
    Launcher::new("hub/gradlew", "adb", "com.innopeak.ph.sdk.sample.hub", ".DBG")
}

#[test]
fn debug_launch_installs_then_starts_main_activity() {
    let mut runner = RecordingRunner::new();
    let activity = launcher()
        .run(&mut runner, &LaunchOptions::default())
        .unwrap();

    assert_eq!(activity, Activity::Main);
    assert_eq!(
        runner.lines(),
        [
            "hub/gradlew installDebug",
            "adb shell am start com.innopeak.ph.sdk.sample.hub.DBG/com.innopeak.ph.sdk.sample.hub.MainActivity",
        ]
    );
    // The activity component travels as a single shell argument.
    assert_eq!(runner.commands[1].args.len(), 2);
}

#[test]
fn release_launch_on_device_without_install() {
    let mut runner = RecordingRunner::new();
    let options = LaunchOptions {
        device: Some("R5CT1234".to_string()),
        variant: BuildVariant::Release,
        scenes: SceneFlags {
            garage: true,
            path_tracer_demo: true,
            ..SceneFlags::default()
        },
        skip_install: true,
    };

    let activity = launcher().run(&mut runner, &options).unwrap();

    assert_eq!(activity, Activity::PathTracerDemo);
    assert_eq!(
        runner.commands[0].args_lossy(),
        [
            "-s",
            "R5CT1234",
            "shell",
            "am start com.innopeak.ph.sdk.sample.hub/com.innopeak.ph.sdk.sample.hub.PTDemoActivity",
        ]
    );
    assert_eq!(runner.commands.len(), 1);
}

#[test]
fn failed_install_is_retried_once_after_uninstall() {
    let mut runner = RecordingRunner::new().then_exit(1);
    launcher()
        .install(&mut runner, BuildVariant::Release)
        .unwrap();

    assert_eq!(
        runner.lines(),
        [
            "hub/gradlew installRelease",
            "hub/gradlew uninstallAll",
            "hub/gradlew installRelease",
        ]
    );
}

#[test]
fn second_install_failure_is_fatal_and_nothing_is_launched() {
    let mut runner = RecordingRunner::new().then_exit(1).then_exit(0).then_exit(1);
    let err = launcher()
        .run(&mut runner, &LaunchOptions::default())
        .unwrap_err();

    assert!(err.is_tool_failure());
    assert_eq!(runner.commands.len(), 3);
    assert!(runner.lines().iter().all(|line| !line.starts_with("adb")));
}

#[test]
fn failed_uninstall_is_fatal() {
    let mut runner = RecordingRunner::new().then_exit(1).then_exit(1);
    let err = launcher()
        .install(&mut runner, BuildVariant::Debug)
        .unwrap_err();

    assert!(err.is_tool_failure());
    assert_eq!(
        runner.lines(),
        ["hub/gradlew installDebug", "hub/gradlew uninstallAll"]
    );
}

#[test]
fn missing_gradle_wrapper_is_not_retried() {
    let mut runner = RecordingRunner::new().then_fail_to_spawn();
    let err = launcher()
        .install(&mut runner, BuildVariant::Debug)
        .unwrap_err();

    assert!(matches!(err, Error::Spawn { .. }));
    assert_eq!(runner.commands.len(), 1);
}

#[test]
fn failed_activity_start_is_reported() {
    let mut runner = RecordingRunner::new().then_exit(0).then_exit(255);
    let err = launcher()
        .run(&mut runner, &LaunchOptions::default())
        .unwrap_err();
    assert!(err.to_string().contains("exit code 255"));
}

#[test]
fn gradle_runs_from_the_android_project_directory() {
    let root = SdkRoot::new("/work/ph-sdk");
    let launcher = Launcher::from_config(&root, &LauncherConfig::default());
    let project_dir = PathBuf::from("/work/ph-sdk/sample/src/android/hub");

    let mut runner = RecordingRunner::new().then_exit(1);
    launcher
        .run(&mut runner, &LaunchOptions::default())
        .unwrap();

    assert_eq!(runner.commands.len(), 4);
    for gradle in &runner.commands[..3] {
        assert_eq!(gradle.current_dir.as_deref(), Some(project_dir.as_path()));
        assert!(gradle.program.starts_with(&project_dir));
    }
    assert_eq!(runner.commands[3].current_dir, None);
}

#[test]
fn explicit_wrapper_path_sets_the_working_directory() {
    let cmd = launcher().gradle_task("installDebug");
    assert_eq!(cmd.current_dir.as_deref(), Some(Path::new("hub")));

    let bare = Launcher::new("gradlew", "adb", "com.example.hub", ".DBG");
    assert_eq!(bare.gradle_task("installDebug").current_dir, None);
}
