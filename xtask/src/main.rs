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

// Developer tooling for the sample suite
// Run with: cargo xtask <command>

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use helpers::*;
use ph_devtools::{DevToolsConfig, SdkRoot};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "xtask", about = "Sample suite developer tools", version)]
struct Cli {
    /// SDK checkout root. Falls back to $PH_SDK_ROOT, then to discovery from
    /// the working directory.
    #[arg(long, global = true)]
    sdk_root: Option<PathBuf>,

    /// Log debug output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Deploy the Android hub application and start one of its activities.
    Launch(LaunchArgs),
    /// Transcode textures and rewrite glTF documents into the runtime asset directory.
    ConvertAssets(ConvertArgs),
    /// Re-run the desktop samples to regenerate their BVH caches.
    RegenBvh,
}

#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// Serial number of the Android device.
    #[arg(short = 's', value_name = "SERIAL")]
    pub device: Option<String>,
    /// Launch Release build instead of Debug build.
    #[arg(short = 'r')]
    pub release: bool,
    /// Launch Garage scene.
    #[arg(short = 'G')]
    pub garage: bool,
    /// Launch Ring scene.
    #[arg(short = 'R')]
    pub ring: bool,
    /// Launch PathTracerDemo scene.
    #[arg(short = 'P')]
    pub path_tracer_demo: bool,
    /// Launch test activity.
    #[arg(short = 'T')]
    pub test: bool,
    /// Skip installation.
    #[arg(short = 'I')]
    pub skip_install: bool,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Source directory, overriding `[assets].source_dir`.
    #[arg(long)]
    pub source: Option<PathBuf>,
    /// Destination directory, overriding `[assets].dest_dir`.
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    std::process::exit(exit_code(run(cli)));
}

/// Reports a failure once, on the console, and maps it to the exit code.
fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&format!("{err:#}"));
            1
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    let root = SdkRoot::discover(cli.sdk_root.as_deref(), &cwd);
    let config = DevToolsConfig::load(&root)?;

    println!("{}", BANNER);
    print_info(&format!("SDK root: {}", root.path().display()));

    match cli.command {
        Command::Launch(args) => commands::launch::run(&root, &config, &args),
        Command::ConvertAssets(args) => commands::assets::convert(&root, &config, &args),
        Command::RegenBvh => commands::bvh_cache::regen(&root, &config),
    }
}
