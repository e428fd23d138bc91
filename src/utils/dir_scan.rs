use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Check whether a file name matches `*.<extension>`.
///
/// Follows shell glob rules: names starting with `.` never match a leading `*`.
/// Names need not be valid UTF-8.
pub fn matches_extension(name: &OsStr, extension: &str) -> bool {
    if name.as_encoded_bytes().starts_with(b".") {
        return false;
    }
    Path::new(name).extension() == Some(OsStr::new(extension))
}

/// List the class files in a patch source directory.
///
/// Returns `dir.join(name)` for every regular file (symlinks followed) whose
/// name matches the extension. Subdirectories are skipped. Sorted by name.
pub fn list_class_files(dir: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut names: Vec<OsString> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !matches_extension(&name, extension) {
            continue;
        }

        // fs::metadata follows symlinks; a dangling link is not a file
        let is_file = fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false);
        if is_file {
            names.push(name);
        }
    }

    names.sort();
    Ok(names.into_iter().map(|name| dir.join(name)).collect())
}
