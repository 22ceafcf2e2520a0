use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::common::errors::CleanupError;

/// How to treat failures inside a recursive delete.
///
/// The eraser uses `BestEffort` for whole artifact directories, where a
/// stray locked cache shard must not block the rest of the profile, and
/// surfaces top-level per-item failures through `remove_file` or `Strict`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Suppress per-entry failures; remove whatever can be removed
    BestEffort,
    /// Propagate the first failure
    Strict,
}

/// Remove a directory tree under the given policy. A path that does not
/// exist is treated as already removed.
pub fn remove_tree(path: &Path, policy: DeletePolicy) -> Result<(), CleanupError> {
    if !path.exists() {
        return Ok(());
    }
    match policy {
        DeletePolicy::Strict => fs::remove_dir_all(path).map_err(|e| fs_error(path, e)),
        DeletePolicy::BestEffort => {
            best_effort_remove(path);
            Ok(())
        }
    }
}

fn best_effort_remove(path: &Path) {
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let child = entry.path();
            let descend = entry
                .file_type()
                .map(|t| t.is_dir() && !t.is_symlink())
                .unwrap_or(false);
            if descend {
                best_effort_remove(&child);
            } else {
                let _ = fs::remove_file(&child);
            }
        }
    }
    let _ = fs::remove_dir(path);
}

/// Remove a single regular file. A missing file counts as removed; any
/// other failure is surfaced.
pub fn remove_file(path: &Path) -> Result<(), CleanupError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(fs_error(path, e)),
    }
}

fn fs_error(path: &Path, source: std::io::Error) -> CleanupError {
    CleanupError::FilesystemAccess {
        path: path.to_path_buf(),
        source,
    }
}

/// Total logical size of a file or directory tree
pub fn dir_size(path: &Path) -> u64 {
    if path.is_file() {
        return fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    }
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.metadata().map(|m| m.len()).unwrap_or(0))
        .sum()
}
