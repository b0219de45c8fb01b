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

use anyhow::Result;
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::time::Instant;

// ANSI color codes
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const GREEN: &str = "\x1b[32m";
pub const RED: &str = "\x1b[31m";
pub const BLUE: &str = "\x1b[34m";
pub const YELLOW: &str = "\x1b[33m";
pub const MAGENTA: &str = "\x1b[35m";

// Visual symbols
pub const CHECK: &str = "✓";
pub const CROSS: &str = "✗";
pub const ROCKET: &str = "🚀";
pub const PHONE: &str = "📱";
pub const BRUSH: &str = "🎨";
pub const TREE: &str = "🌲";

pub const BANNER: &str = concat!(
    "\x1b[1m",
    "\x1b[36m", // BOLD, CYAN
    "╔═══════════════════════════════════════════════════════════╗\n",
    "║                ",
    "⚙",
    " PH SDK SAMPLE DEVTOOLS ",
    "⚙",
    "                 ║\n",
    "║          Launcher · Asset Pipeline · BVH Caches           ║\n",
    "╚═══════════════════════════════════════════════════════════╝",
    "\x1b[0m" // RESET
);

/// Sets up `env_logger`, defaulting to `info` (`debug` when verbose).
/// `RUST_LOG` still wins when set.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .filter_module("walkdir", LevelFilter::Warn)
        .init();
}

pub fn print_task_start(task_name: &str, emoji: &str, color: &str) {
    println!(
        "\n{}{}━━━ {} {} {}━━━{}",
        BOLD, color, emoji, task_name, emoji, RESET
    );
}

pub fn print_info(message: &str) {
    println!("{}💡 Info:{} {}", BOLD, RESET, message);
}

pub fn print_success(message: &str) {
    println!("{}{} {} {}{}", BOLD, GREEN, CHECK, message, RESET);
}

pub fn print_warning(message: &str) {
    println!("{}{} ⚠ {}{}", BOLD, YELLOW, message, RESET);
}

pub fn print_error(message: &str) {
    println!("{}{} {} {}{}", BOLD, RED, CROSS, message, RESET);
}

/// Runs one task, reporting its outcome and duration.
pub fn run_task<T>(task_name: &str, task: impl FnOnce() -> Result<T>) -> Result<T> {
    let start_time = Instant::now();
    let result = task();
    let duration = start_time.elapsed();

    match &result {
        Ok(_) => print_success(&format!(
            "{} completed in {:.2}s",
            task_name,
            duration.as_secs_f64()
        )),
        Err(_) => print_error(&format!(
            "{} failed after {:.2}s",
            task_name,
            duration.as_secs_f64()
        )),
    }
    result
}
