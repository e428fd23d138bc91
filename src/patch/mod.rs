pub mod apply;
pub mod constants;
mod error;
pub mod verify;

use std::fmt;
use std::path::PathBuf;

// Re-export public items
pub use apply::copy_into;
pub use error::PatchError;
pub use verify::verify_copy;

/// Kind of patch file, which decides its destination directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    Class,
    Manifest,
    Gradle,
    Strings,
}

impl fmt::Display for PatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatchKind::Class => "class",
            PatchKind::Manifest => "manifest",
            PatchKind::Gradle => "gradle",
            PatchKind::Strings => "strings",
        };
        f.write_str(name)
    }
}

/// Record of one completed copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub kind: PatchKind,
    pub source: PathBuf,
    pub target: PathBuf,
    /// SHA-256 of the copied content, present when verification ran
    pub hash: Option<String>,
}
