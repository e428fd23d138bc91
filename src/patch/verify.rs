use std::path::Path;

use crate::patch::PatchError;
use crate::utils::hash::hash_file;

/// Check that a copied file is byte-for-byte identical to its source.
///
/// Returns the SHA-256 hash shared by both files.
pub fn verify_copy(source: &Path, target: &Path) -> Result<String, PatchError> {
    let file = target.display().to_string();

    let expected = hash_file(source).map_err(|e| PatchError::CopyFailed {
        file: source.display().to_string(),
        reason: format!("failed to read source for verification: {}", e),
    })?;
    let actual = hash_file(target).map_err(|e| PatchError::CopyFailed {
        file: file.clone(),
        reason: format!("failed to read copy for verification: {}", e),
    })?;

    if expected != actual {
        return Err(PatchError::VerificationFailed {
            file,
            expected,
            actual,
        });
    }

    Ok(actual)
}
