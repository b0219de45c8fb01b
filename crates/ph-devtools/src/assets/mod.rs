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

//! Conversion of authored assets into the runtime asset directory.
//!
//! Every regular file directly inside the source directory is classified by
//! [`classify()`] and then transcoded to KTX2 with `toktx`, rewritten (glTF
//! documents) or copied as is.

pub mod classify;
pub mod gltf;

pub use classify::{
    classify, AssetKind, ColorSpace, TextureRole, TranscodePolicy, KTX2_EXTENSION,
};

use crate::config::{AssetsConfig, SdkRoot};
use crate::discovery;
use crate::error::{Error, Result};
use crate::process::{CommandRunner, ToolCommand};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Counts of what a conversion run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Textures transcoded to KTX2.
    pub transcoded: usize,
    /// glTF documents rewritten.
    pub rewritten: usize,
    /// Files copied unchanged.
    pub copied: usize,
    /// Files skipped because of their extension.
    pub ignored: usize,
}

/// Converts one source directory into one destination directory.
#[derive(Debug, Clone)]
pub struct AssetConverter {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    compressor: PathBuf,
    ignored_extensions: Vec<String>,
}

impl AssetConverter {
    /// Creates a converter using the `toktx` binary at `compressor`.
    ///
    /// # Errors
    /// Returns [`Error::CompressorNotFound`] if `compressor` is not a file.
    pub fn new(
        source_dir: impl Into<PathBuf>,
        dest_dir: impl Into<PathBuf>,
        compressor: impl Into<PathBuf>,
        ignored_extensions: Vec<String>,
    ) -> Result<Self> {
        let compressor = compressor.into();
        if !compressor.is_file() {
            return Err(Error::CompressorNotFound { path: compressor });
        }
        Ok(Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            compressor,
            ignored_extensions,
        })
    }

    /// Creates a converter from the `[assets]` configuration section.
    ///
    /// `source_dir` and `dest_dir` override the configured directories.
    pub fn from_config(
        root: &SdkRoot,
        config: &AssetsConfig,
        source_dir: Option<&Path>,
        dest_dir: Option<&Path>,
    ) -> Result<Self> {
        let compressor = match &config.compressor {
            Some(path) => root.resolve(path),
            None => discovery::compressor_path(root.path()),
        };
        Self::new(
            root.resolve(source_dir.unwrap_or(&config.source_dir)),
            root.resolve(dest_dir.unwrap_or(&config.dest_dir)),
            compressor,
            config.ignored_extensions.clone(),
        )
    }

    /// The directory being converted.
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// The directory receiving the output.
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Converts every file of the source directory.
    ///
    /// Stops at the first failure: a compressor error, an unreadable
    /// document or a failed copy.
    pub fn run(&self, runner: &mut dyn CommandRunner) -> Result<ConversionReport> {
        fs::create_dir_all(&self.dest_dir).map_err(|e| Error::io(&self.dest_dir, e))?;

        let mut report = ConversionReport::default();
        for source in self.source_files()? {
            match classify(&source, &self.ignored_extensions) {
                AssetKind::Ignored => {
                    log::debug!("Ignore: {}", source.display());
                    report.ignored += 1;
                }
                AssetKind::Texture(role) => {
                    self.transcode(runner, &source, role.transcode_policy())?;
                    report.transcoded += 1;
                }
                AssetKind::SceneDocument => {
                    let dest = self.dest_path(&source);
                    log::info!("Convert GLTF: {} -> {}", source.display(), dest.display());
                    let uris = gltf::convert_document(&source, &dest)?;
                    log::debug!("Rewrote {uris} texture reference(s)");
                    report.rewritten += 1;
                }
                AssetKind::PassThrough => {
                    let dest = self.dest_path(&source);
                    log::info!("Copy: {} -> {}", source.display(), dest.display());
                    fs::copy(&source, &dest).map_err(|e| Error::Copy {
                        from: source.clone(),
                        to: dest.clone(),
                        source: e,
                    })?;
                    report.copied += 1;
                }
            }
        }
        Ok(report)
    }

    /// Builds the compressor invocation for `source`.
    pub fn transcode_command(&self, source: &Path, policy: TranscodePolicy) -> ToolCommand {
        let cmd = ToolCommand::new(&self.compressor).args([
            "--encode",
            "astc",
            "--astc_blk_d",
            "8x8",
            "--t2",
            "--target_type",
            "RGBA",
            "--assign_oetf",
            policy.color_space.oetf(),
        ]);
        let cmd = if policy.generate_mipmaps {
            cmd.arg("--genmipmap")
        } else {
            cmd
        };
        cmd.arg(self.texture_dest_path(source))
            .arg(source.as_os_str())
    }

    /// Where the KTX2 output of `source` is written.
    pub fn texture_dest_path(&self, source: &Path) -> PathBuf {
        let mut name = source
            .file_stem()
            .unwrap_or(source.as_os_str())
            .to_os_string();
        name.push(".");
        name.push(KTX2_EXTENSION);
        self.dest_dir.join(name)
    }

    fn transcode(
        &self,
        runner: &mut dyn CommandRunner,
        source: &Path,
        policy: TranscodePolicy,
    ) -> Result<()> {
        runner.check(&self.transcode_command(source, policy))
    }

    fn dest_path(&self, source: &Path) -> PathBuf {
        match source.file_name() {
            Some(name) => self.dest_dir.join(name),
            None => self.dest_dir.clone(),
        }
    }

    /// Regular files directly inside the source directory, sorted by name.
    fn source_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(&self.source_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.source_dir).to_path_buf();
                Error::io(path, e.into())
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn converter(dest: &Path) -> (tempfile::TempDir, AssetConverter) {
        let dir = tempdir().unwrap();
        let toktx = dir.path().join("toktx");
        fs::write(&toktx, b"").unwrap();
        let converter = AssetConverter::new(dir.path(), dest, &toktx, Vec::new()).unwrap();
        (dir, converter)
    }

    #[test]
    fn texture_output_keeps_every_dot_of_the_stem() {
        let (_dir, converter) = converter(Path::new("out"));
        assert_eq!(
            converter.texture_dest_path(Path::new("src/wall.v2.png")),
            Path::new("out/wall.v2.ktx2")
        );
        assert_eq!(
            converter.texture_dest_path(Path::new("src/wall_basecolor.png")),
            Path::new("out/wall_basecolor.ktx2")
        );
    }

    #[test]
    fn failed_copy_names_both_paths() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(&source).unwrap();
        fs::write(source.join("readme.txt"), b"hello").unwrap();
        // A directory squatting on the output name makes the copy fail.
        let dest = dir.path().join("dest");
        fs::create_dir_all(dest.join("readme.txt")).unwrap();

        let toktx = dir.path().join("toktx");
        fs::write(&toktx, b"").unwrap();
        let converter = AssetConverter::new(&source, &dest, &toktx, Vec::new()).unwrap();

        struct NoTools;
        impl CommandRunner for NoTools {
            fn run(&mut self, command: &ToolCommand) -> Result<crate::process::ToolStatus> {
                panic!("unexpected command {command}")
            }
        }

        let err = converter.run(&mut NoTools).unwrap_err();
        match &err {
            Error::Copy { from, to, .. } => {
                assert_eq!(from, &source.join("readme.txt"));
                assert_eq!(to, &dest.join("readme.txt"));
            }
            other => panic!("unexpected error: {other}"),
        }
        let message = err.to_string();
        assert!(message.contains("src") && message.contains("dest"));
    }
}
