use std::fs::{self, File, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use crate::patch::PatchError;

/// Copy a patch file into a destination directory, overwriting any file of
/// the same name.
///
/// The copy keeps the source's permission bits and its access and
/// modification times. Returns the path that was written.
pub fn copy_into(source: &Path, dest_dir: &Path) -> Result<PathBuf, PatchError> {
    let file = source.display().to_string();

    if !source.is_file() {
        return Err(PatchError::SourceMissing(file));
    }
    if !dest_dir.is_dir() {
        return Err(PatchError::DestinationMissing {
            file,
            dir: dest_dir.display().to_string(),
        });
    }

    let Some(name) = source.file_name() else {
        return Err(PatchError::SourceMissing(file));
    };
    let target = dest_dir.join(name);

    if is_same_file(source, &target) {
        return Err(PatchError::CopyFailed {
            file,
            reason: format!("'{}' is the same file", target.display()),
        });
    }

    // fs::copy also carries over permission bits
    fs::copy(source, &target).map_err(|e| PatchError::CopyFailed {
        file: file.clone(),
        reason: format!("failed to copy to '{}': {}", target.display(), e),
    })?;

    copy_times(source, &target).map_err(|e| PatchError::CopyFailed {
        file,
        reason: format!("failed to set file times on '{}': {}", target.display(), e),
    })?;

    Ok(target)
}

fn copy_times(source: &Path, target: &Path) -> io::Result<()> {
    let meta = fs::metadata(source)?;
    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }

    // A read-only copy can't be opened for writing on unix; owners may still
    // set times through a read handle there.
    #[cfg(unix)]
    let handle = File::open(target)?;
    #[cfg(not(unix))]
    let handle = fs::OpenOptions::new().write(true).open(target)?;

    handle.set_times(times)
}

// Hard links share an inode under different paths, so compare device and inode.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
