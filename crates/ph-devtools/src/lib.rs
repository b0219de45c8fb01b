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

//! # PH DevTools
//!
//! Developer tooling for the sample suite. Three independent tools share this
//! crate:
//!
//! - [`launcher`]: deploys the Android hub application through the Gradle
//!   wrapper and starts one of its activities through `adb`.
//! - [`assets`]: converts a directory of authored assets, transcoding textures
//!   to KTX2 and rewriting the texture references of glTF documents.
//! - [`bvh_cache`]: re-runs the desktop samples with BVH cache saving enabled.
//!
//! All external processes go through the [`process::CommandRunner`] trait so
//! every tool can be exercised without spawning real programs.

#![warn(missing_docs)]

pub mod assets;
pub mod bvh_cache;
pub mod config;
pub mod discovery;
pub mod error;
pub mod launcher;
pub mod process;

pub use config::{DevToolsConfig, SdkRoot};
pub use error::{Error, Result};
pub use process::{CommandRunner, SystemRunner, ToolCommand, ToolStatus};
