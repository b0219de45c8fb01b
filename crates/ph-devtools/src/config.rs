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

//! Configuration resolution, run once when a tool starts.
//!
//! The tools locate the SDK root first ([`SdkRoot::discover`]) and then read
//! the optional `DevTools.toml` manifest found there. Every field has a
//! default matching the standard SDK layout, so the manifest only needs to
//! list what differs.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the optional manifest at the SDK root.
pub const CONFIG_FILE_NAME: &str = "DevTools.toml";

/// Environment variable that overrides SDK root discovery.
pub const SDK_ROOT_ENV: &str = "PH_SDK_ROOT";

/// The root directory of the SDK checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkRoot(PathBuf);

impl SdkRoot {
    /// Wraps an explicit root directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Resolves the SDK root.
    ///
    /// In order: `explicit`, the `PH_SDK_ROOT` environment variable, the
    /// nearest ancestor of `start` holding a `DevTools.toml`, the nearest
    /// ancestor holding both `dev/` and `sample/`, and finally `start`.
    pub fn discover(explicit: Option<&Path>, start: &Path) -> Self {
        if let Some(path) = explicit {
            return Self::new(path);
        }
        if let Some(path) = env::var_os(SDK_ROOT_ENV).filter(|v| !v.is_empty()) {
            return Self::new(path);
        }
        Self::search(start)
    }

    /// Ancestor search used by [`SdkRoot::discover`], without the overrides.
    pub fn search(start: &Path) -> Self {
        let by_manifest = start
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE_NAME).is_file());
        let by_layout = || {
            start
                .ancestors()
                .find(|dir| dir.join("dev").is_dir() && dir.join("sample").is_dir())
        };

        match by_manifest.or_else(by_layout) {
            Some(dir) => Self::new(dir),
            None => Self::new(start),
        }
    }

    /// The root directory itself.
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Resolves `relative` against the root. Absolute paths are returned as is.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.0.join(relative)
    }
}

/// Contents of `DevTools.toml`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct DevToolsConfig {
    /// Settings for the Android launcher.
    pub launcher: LauncherConfig,
    /// Settings for the asset converter.
    pub assets: AssetsConfig,
    /// Settings for the BVH cache regenerator.
    pub bvh_cache: BvhCacheConfig,
}

impl DevToolsConfig {
    /// Loads `DevTools.toml` from the SDK root.
    /// If the file does not exist, it returns the default configuration.
    ///
    /// # Errors
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid TOML for this schema.
    pub fn load(root: &SdkRoot) -> Result<Self> {
        let path = root.resolve(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("No '{}' found. Using default configuration.", path.display());
            return Ok(Self::default());
        }

        log::debug!("Loading configuration from '{}'", path.display());
        let text = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        Self::from_toml(&text).map_err(|source| Error::Config { path, source })
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// `[launcher]` section.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LauncherConfig {
    /// The Android Gradle project holding the hub application.
    pub project_dir: PathBuf,
    /// Java package of the hub application.
    pub package: String,
    /// Application id suffix used by debug builds.
    pub debug_suffix: String,
    /// Explicit `adb` executable. Discovered when absent.
    pub adb: Option<PathBuf>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("sample/src/android/hub"),
            package: "com.innopeak.ph.sdk.sample.hub".to_string(),
            debug_suffix: ".DBG".to_string(),
            adb: None,
        }
    }
}

/// `[assets]` section.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding the authored assets.
    pub source_dir: PathBuf,
    /// Directory receiving the converted assets.
    pub dest_dir: PathBuf,
    /// Extensions (without the dot) that are never converted nor copied.
    pub ignored_extensions: Vec<String>,
    /// Explicit `toktx` executable. Defaults to the copy under `dev/bin`.
    pub compressor: Option<PathBuf>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("sample/src/asset-source/garage-4.0a"),
            dest_dir: PathBuf::from("sample/src/asset/model/garage/4.0a"),
            ignored_extensions: vec!["cmd".to_string(), "py".to_string()],
            compressor: None,
        }
    }
}

/// `[bvh_cache]` section.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BvhCacheConfig {
    /// Location of the sample executables, with `{variant}` and `{program}`
    /// placeholders.
    pub binary_template: String,
    /// Build variant directories to consider. Empty means all of them.
    pub variants: Vec<String>,
    /// Variable that makes the samples save their BVH cache.
    pub env_var: String,
}

impl Default for BvhCacheConfig {
    fn default() -> Self {
        Self {
            binary_template: "build/sample/desktop/{variant}/{program}".to_string(),
            variants: Vec::new(),
            env_var: "PH_SAVE_BVH".to_string(),
        }
    }
}
