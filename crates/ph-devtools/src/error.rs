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

//! Error types shared by every tool in the crate.

use crate::process::ToolStatus;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenient alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can stop one of the developer tools.
#[derive(Debug, Error)]
pub enum Error {
    /// A filesystem operation failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The path being read or written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A file could not be copied to the output directory.
    #[error("Failed to copy '{from}' to '{to}': {source}")]
    Copy {
        /// The file being copied.
        from: PathBuf,
        /// The destination that could not be written.
        to: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A scene document could not be parsed or serialized.
    #[error("Invalid JSON in '{path}': {source}")]
    Json {
        /// The offending document.
        path: PathBuf,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// `DevTools.toml` exists but is not valid.
    #[error("Failed to parse configuration '{path}': {source}")]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// An external program could not be started at all.
    #[error("Failed to execute '{program}': {source}")]
    Spawn {
        /// The program that failed to start.
        program: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An external program ran but exited unsuccessfully.
    #[error("'{command}' failed with {status}")]
    ToolFailed {
        /// The full command line.
        command: String,
        /// How the program exited.
        status: ToolStatus,
    },

    /// The texture compressor executable is missing.
    #[error("{} not found. The KTX tools are expected under the SDK's dev/bin directory.", .path.display())]
    CompressorNotFound {
        /// Where the compressor was expected.
        path: PathBuf,
    },
}

impl Error {
    /// Builds an [`Error::Io`] for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` when an external program ran and reported failure.
    pub fn is_tool_failure(&self) -> bool {
        matches!(self, Error::ToolFailed { .. })
    }
}
