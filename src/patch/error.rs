use std::fmt;

/// Error type for patch operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// Source directory does not exist or cannot be listed
    SourceDirMissing(String),
    /// Fixed patch file not found in the source directory
    SourceMissing(String),
    /// Destination directory does not exist
    DestinationMissing { file: String, dir: String },
    /// Copy failed for a file
    CopyFailed { file: String, reason: String },
    /// Verification failed - hash mismatch
    VerificationFailed { file: String, expected: String, actual: String },
    /// Layout file could not be read or written
    LayoutError { reason: String },
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::SourceDirMissing(dir) => {
                write!(f, "patch source directory not found: '{}'", dir)
            }
            PatchError::SourceMissing(file) => {
                write!(f, "patch file not found: '{}'", file)
            }
            PatchError::DestinationMissing { file, dir } => {
                write!(
                    f,
                    "cannot copy '{}': destination directory '{}' does not exist",
                    file, dir
                )
            }
            PatchError::CopyFailed { file, reason } => {
                write!(f, "copy failed for '{}': {}", file, reason)
            }
            PatchError::VerificationFailed { file, expected, actual } => {
                write!(
                    f,
                    "verification failed for '{}': expected hash {}, got {}",
                    file, expected, actual
                )
            }
            PatchError::LayoutError { reason } => {
                write!(f, "layout error: {}", reason)
            }
        }
    }
}

impl std::error::Error for PatchError {}
