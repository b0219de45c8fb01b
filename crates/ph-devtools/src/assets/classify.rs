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

//! Classification of source assets by file name.

use std::path::Path;

/// Extension of the compressed texture container produced by the converter.
pub const KTX2_EXTENSION: &str = "ktx2";

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg"];
const SCENE_EXTENSION: &str = "gltf";

/// What the converter does with a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Packaging scripts and the like, left behind.
    Ignored,
    /// Texture transcoded to KTX2.
    Texture(TextureRole),
    /// glTF document whose texture references get rewritten.
    SceneDocument,
    /// Copied unchanged.
    PassThrough,
}

/// The material slot a texture feeds, which fixes how it is transcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureRole {
    /// Base color map, transcoded with mipmaps.
    BaseColor,
    /// Normal map, transcoded without mipmaps.
    Normal,
}

/// Transfer function tagged onto a transcoded texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Linear values.
    Linear,
    /// sRGB encoded values.
    Srgb,
}

impl ColorSpace {
    /// Value of the compressor's `--assign_oetf` option.
    pub fn oetf(self) -> &'static str {
        match self {
            ColorSpace::Linear => "linear",
            ColorSpace::Srgb => "srgb",
        }
    }
}

/// How a texture is transcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscodePolicy {
    /// Whether the compressor generates a mip chain.
    pub generate_mipmaps: bool,
    /// Transfer function assigned to the output.
    pub color_space: ColorSpace,
}

impl TextureRole {
    /// How textures of this role are transcoded.
    pub fn transcode_policy(self) -> TranscodePolicy {
        match self {
            // TODO: tag base color maps as sRGB once the samples sample them as such.
            TextureRole::BaseColor => TranscodePolicy {
                generate_mipmaps: true,
                color_space: ColorSpace::Linear,
            },
            // Mipmaps blur normal maps.
            TextureRole::Normal => TranscodePolicy {
                generate_mipmaps: false,
                color_space: ColorSpace::Linear,
            },
        }
    }
}

/// Classifies `path` by its extension and stem.
///
/// `ignored_extensions` are compared case-insensitively and without the dot.
/// Images whose stem carries neither `basecolor` nor `normal` are passed
/// through.
pub fn classify(path: &Path, ignored_extensions: &[String]) -> AssetKind {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if ignored_extensions
        .iter()
        .any(|ignored| ignored.trim_start_matches('.').eq_ignore_ascii_case(&extension))
    {
        return AssetKind::Ignored;
    }

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        if stem.contains("basecolor") {
            return AssetKind::Texture(TextureRole::BaseColor);
        }
        if stem.contains("normal") {
            return AssetKind::Texture(TextureRole::Normal);
        }
    }

    if extension == SCENE_EXTENSION {
        return AssetKind::SceneDocument;
    }

    AssetKind::PassThrough
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(name: &str) -> AssetKind {
        classify(Path::new(name), &["cmd".to_string(), "py".to_string()])
    }

    #[test]
    fn textures_by_stem() {
        let base_color = AssetKind::Texture(TextureRole::BaseColor);
        let normal = AssetKind::Texture(TextureRole::Normal);
        assert_eq!(kind("wall_basecolor.png"), base_color);
        assert_eq!(kind("Wall_BaseColor.JPG"), base_color);
        assert_eq!(kind("wall_normal.png"), normal);
        assert_eq!(kind("basecolor_normal.jpg"), base_color);
    }

    #[test]
    fn other_images_pass_through() {
        assert_eq!(kind("wall_roughness.png"), AssetKind::PassThrough);
        assert_eq!(kind("wall_normal.tga"), AssetKind::PassThrough);
    }

    #[test]
    fn scenes_scripts_and_the_rest() {
        assert_eq!(kind("garage.gltf"), AssetKind::SceneDocument);
        assert_eq!(kind("garage.GLTF"), AssetKind::SceneDocument);
        assert_eq!(kind("gen-assets.py"), AssetKind::Ignored);
        assert_eq!(kind("pack.CMD"), AssetKind::Ignored);
        assert_eq!(kind("garage.bin"), AssetKind::PassThrough);
        assert_eq!(kind("readme.txt"), AssetKind::PassThrough);
        assert_eq!(kind("LICENSE"), AssetKind::PassThrough);
    }

    #[test]
    fn ignore_set_accepts_leading_dot() {
        assert_eq!(
            classify(Path::new("notes.md"), &[".md".to_string()]),
            AssetKind::Ignored
        );
    }

    #[test]
    fn policies_keep_linear_base_color() {
        let base = TextureRole::BaseColor.transcode_policy();
        assert!(base.generate_mipmaps);
        assert_eq!(base.color_space, ColorSpace::Linear);

        let normal = TextureRole::Normal.transcode_policy();
        assert!(!normal.generate_mipmaps);
        assert_eq!(normal.color_space.oetf(), "linear");
    }
}
