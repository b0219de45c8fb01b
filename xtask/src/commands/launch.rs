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

use crate::helpers::*;
use crate::LaunchArgs;
use anyhow::Result;
use ph_devtools::launcher::{BuildVariant, LaunchOptions, Launcher, SceneFlags};
use ph_devtools::{DevToolsConfig, SdkRoot, SystemRunner};

pub fn run(root: &SdkRoot, config: &DevToolsConfig, args: &LaunchArgs) -> Result<()> {
    print_task_start("Launching Hub", PHONE, BLUE);

    let options = LaunchOptions {
        device: args.device.clone(),
        variant: BuildVariant::from_release_flag(args.release),
        scenes: SceneFlags {
            garage: args.garage,
            ring: args.ring,
            path_tracer_demo: args.path_tracer_demo,
            test: args.test,
        },
        skip_install: args.skip_install,
    };
    if let Some(device) = &options.device {
        print_info(&format!("Target device: {device}"));
    }

    let launcher = Launcher::from_config(root, &config.launcher);
    let activity = run_task("Launch", || {
        Ok(launcher.run(&mut SystemRunner::new(), &options)?)
    })?;

    println!(
        "{}{} {} {} started ({} build){}",
        BOLD,
        GREEN,
        ROCKET,
        activity.class_name(),
        options.variant,
        RESET
    );
    Ok(())
}
