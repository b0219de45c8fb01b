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

//! Locating the external executables the tools depend on.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

const VARIANT_PLACEHOLDER: &str = "{variant}";
const PROGRAM_PLACEHOLDER: &str = "{program}";

/// Appends the platform executable suffix to `name`.
pub fn exe_name(name: &str) -> String {
    format!("{name}{}", env::consts::EXE_SUFFIX)
}

/// Location of the bundled `toktx` compressor under the SDK root.
pub fn compressor_path(sdk_root: &Path) -> PathBuf {
    if cfg!(windows) {
        sdk_root.join("dev/bin/mswin/ktx/toktx.exe")
    } else {
        sdk_root.join("dev/bin/linux/toktx")
    }
}

/// The Gradle wrapper script of an Android project.
pub fn gradle_wrapper(project_dir: &Path) -> PathBuf {
    if cfg!(windows) {
        project_dir.join("gradlew.bat")
    } else {
        project_dir.join("gradlew")
    }
}

/// Picks the `adb` executable.
///
/// An explicit override wins, then the `platform-tools` directory of
/// `ANDROID_HOME` or `ANDROID_SDK_ROOT`, then plain `adb` from `PATH`.
pub fn adb_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    ["ANDROID_HOME", "ANDROID_SDK_ROOT"]
        .iter()
        .filter_map(|var| env::var_os(var))
        .map(|home| PathBuf::from(home).join("platform-tools").join(exe_name("adb")))
        .find(|candidate| candidate.is_file())
        .unwrap_or_else(|| PathBuf::from(exe_name("adb")))
}

/// A path template such as `build/sample/desktop/{variant}/{program}`, split
/// around its `{variant}` component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryPattern {
    /// The directory whose subdirectories are the build variants.
    variants_dir: PathBuf,
    /// Whatever follows the variant component, with `{program}` expanded.
    tail: PathBuf,
}

impl BinaryPattern {
    /// Expands `{program}` in `template` and resolves it against `root`.
    ///
    /// Without a `{variant}` component the template names a single file.
    pub fn new(root: &Path, template: &str, program: &str) -> Self {
        let expanded = template.replace(PROGRAM_PLACEHOLDER, &exe_name(program));
        match expanded.split_once(VARIANT_PLACEHOLDER) {
            Some((head, tail)) => Self {
                variants_dir: root.join(head.trim_end_matches(['/', '\\'])),
                tail: PathBuf::from(tail.trim_start_matches(['/', '\\'])),
            },
            None => Self {
                variants_dir: root.join(expanded),
                tail: PathBuf::new(),
            },
        }
    }

    /// Lists every existing executable matching the pattern, restricted to
    /// `variants` unless it is empty.
    pub fn candidates(&self, variants: &[String]) -> Vec<PathBuf> {
        if self.tail.as_os_str().is_empty() {
            return Some(self.variants_dir.clone())
                .filter(|path| path.is_file())
                .into_iter()
                .collect();
        }

        let mut found: Vec<PathBuf> = WalkDir::new(&self.variants_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_dir())
            .filter(|entry| {
                variants.is_empty()
                    || variants
                        .iter()
                        .any(|v| entry.file_name().to_str() == Some(v.as_str()))
            })
            .map(|entry| entry.path().join(&self.tail))
            .filter(|path| path.is_file())
            .collect();
        found.sort();
        found
    }
}

/// Returns the most recently modified executable matching `template` for
/// `program`, or `None` when no build variant contains it.
pub fn find_latest_binary(
    root: &Path,
    template: &str,
    program: &str,
    variants: &[String],
) -> Option<PathBuf> {
    BinaryPattern::new(root, template, program)
        .candidates(variants)
        .into_iter()
        .map(|path| {
            let modified = fs::metadata(&path)
                .and_then(|meta| meta.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, path)
        })
        .max_by(|a, b| a.0.cmp(&b.0))
        .map(|(_, path)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    const TEMPLATE: &str = "build/sample/desktop/{variant}/{program}";

    fn touch(path: &Path, age_secs: u64) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let file = File::create(path).unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(age_secs);
        file.set_modified(mtime).unwrap();
    }

    #[test]
    fn picks_most_recent_variant() {
        let dir = tempdir().unwrap();
        let desktop = dir.path().join("build/sample/desktop");
        touch(&desktop.join("debug").join(exe_name("ring")), 3600);
        touch(&desktop.join("release").join(exe_name("ring")), 10);
        touch(&desktop.join("profile").join(exe_name("ring")), 600);

        let found = find_latest_binary(dir.path(), TEMPLATE, "ring", &[]).unwrap();
        assert_eq!(found, desktop.join("release").join(exe_name("ring")));
    }

    #[test]
    fn variant_filter_restricts_candidates() {
        let dir = tempdir().unwrap();
        let desktop = dir.path().join("build/sample/desktop");
        touch(&desktop.join("debug").join(exe_name("ring")), 3600);
        touch(&desktop.join("release").join(exe_name("ring")), 10);

        let found =
            find_latest_binary(dir.path(), TEMPLATE, "ring", &["debug".to_string()]).unwrap();
        assert_eq!(found, desktop.join("debug").join(exe_name("ring")));
    }

    #[test]
    fn only_variant_directories_are_scanned() {
        let dir = tempdir().unwrap();
        let desktop = dir.path().join("build/sample/desktop");
        touch(&desktop.join("debug").join(exe_name("ring")), 60);
        // Neither a loose file nor a deeper build counts as a variant.
        touch(&desktop.join("CMakeCache.txt"), 0);
        touch(&desktop.join("debug/nested").join(exe_name("ring")), 0);

        let candidates = BinaryPattern::new(dir.path(), TEMPLATE, "ring").candidates(&[]);
        assert_eq!(candidates, [desktop.join("debug").join(exe_name("ring"))]);
    }

    #[test]
    fn missing_program_or_build_dir_yields_none() {
        let dir = tempdir().unwrap();
        assert_eq!(find_latest_binary(dir.path(), TEMPLATE, "garage", &[]), None);

        touch(&dir.path().join("build/sample/desktop/debug").join(exe_name("ring")), 0);
        assert_eq!(find_latest_binary(dir.path(), TEMPLATE, "garage", &[]), None);
    }

    #[test]
    fn template_without_variant_names_a_single_file() {
        let dir = tempdir().unwrap();
        let exe = dir.path().join("bin").join(exe_name("shadow"));
        touch(&exe, 0);

        let found = find_latest_binary(dir.path(), "bin/{program}", "shadow", &[]);
        assert_eq!(found, Some(exe));
    }

    #[test]
    fn platform_specific_tool_locations() {
        let root = Path::new("sdk");
        let toktx = compressor_path(root);
        let gradlew = gradle_wrapper(Path::new("hub"));
        if cfg!(windows) {
            assert!(toktx.ends_with("dev/bin/mswin/ktx/toktx.exe"));
            assert!(gradlew.ends_with("gradlew.bat"));
        } else {
            assert!(toktx.ends_with("dev/bin/linux/toktx"));
            assert!(gradlew.ends_with("gradlew"));
        }
    }

    #[test]
    fn explicit_adb_wins() {
        assert_eq!(
            adb_path(Some(Path::new("/opt/android/adb"))),
            PathBuf::from("/opt/android/adb")
        );
    }
}
