use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::patch::constants::{
    CLASSES_DST, CLASS_EXTENSION, GRADLE_DST, GRADLE_FILENAME, MANIFEST_DST, MANIFEST_FILENAME,
    SOURCE_DIR, STRINGS_DST, STRINGS_FILENAME,
};

/// Where patch files come from and where each kind is copied to.
///
/// Missing fields in a layout file fall back to the defaults, so a file only
/// needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub source_dir: PathBuf,
    pub class_extension: String,
    pub manifest_file: String,
    pub gradle_file: String,
    pub strings_file: String,
    pub classes_dst: PathBuf,
    pub manifest_dst: PathBuf,
    pub gradle_dst: PathBuf,
    pub strings_dst: PathBuf,
}

impl Default for Layout {
    fn default() -> Self {
        Layout {
            source_dir: PathBuf::from(SOURCE_DIR),
            class_extension: CLASS_EXTENSION.to_string(),
            manifest_file: MANIFEST_FILENAME.to_string(),
            gradle_file: GRADLE_FILENAME.to_string(),
            strings_file: STRINGS_FILENAME.to_string(),
            classes_dst: PathBuf::from(CLASSES_DST),
            manifest_dst: PathBuf::from(MANIFEST_DST),
            gradle_dst: PathBuf::from(GRADLE_DST),
            strings_dst: PathBuf::from(STRINGS_DST),
        }
    }
}

impl Layout {
    pub fn load(path: &Path) -> io::Result<Layout> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.to_json()?)
    }

    pub fn to_json(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Resolve every relative path against `root`.
    ///
    /// A root of `.` leaves the layout untouched so printed paths keep their
    /// `./` prefix.
    pub fn resolve(&self, root: &Path) -> Layout {
        let join = |p: &Path| resolve_path(root, p);
        Layout {
            source_dir: join(&self.source_dir),
            classes_dst: join(&self.classes_dst),
            manifest_dst: join(&self.manifest_dst),
            gradle_dst: join(&self.gradle_dst),
            strings_dst: join(&self.strings_dst),
            ..self.clone()
        }
    }

    pub fn manifest_source(&self) -> PathBuf {
        self.source_dir.join(&self.manifest_file)
    }

    pub fn gradle_source(&self) -> PathBuf {
        self.source_dir.join(&self.gradle_file)
    }

    pub fn strings_source(&self) -> PathBuf {
        self.source_dir.join(&self.strings_file)
    }

    pub fn destinations(&self) -> [&Path; 4] {
        [
            self.classes_dst.as_path(),
            self.manifest_dst.as_path(),
            self.gradle_dst.as_path(),
            self.strings_dst.as_path(),
        ]
    }

    /// Top-level destination directories that differ only by ASCII case.
    ///
    /// On a case-sensitive filesystem these name two different directories,
    /// so one of them is likely missing.
    pub fn case_conflicts(&self) -> Vec<(String, String)> {
        let mut roots: Vec<String> = Vec::new();
        for dst in self.destinations() {
            if let Some(root) = first_component(dst) {
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
        }

        let mut conflicts = Vec::new();
        for (i, a) in roots.iter().enumerate() {
            for b in &roots[i + 1..] {
                if a.eq_ignore_ascii_case(b) {
                    conflicts.push((a.clone(), b.clone()));
                }
            }
        }
        conflicts
    }
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || root.as_os_str().is_empty() || root == Path::new(".") {
        return path.to_path_buf();
    }
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    root.join(relative)
}

fn first_component(path: &Path) -> Option<String> {
    path.components().find_map(|c| match c {
        Component::Normal(name) => name.to_str().map(str::to_string),
        _ => None,
    })
}
