use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

use crate::error::AssetError;

pub fn prepare_output_dir(output_dir: &Path) -> Result<(), AssetError> {
    // Never cleaned: earlier results stay next to new ones
    if !output_dir.is_dir() {
        println!("Creating output directory: {}", output_dir.display());
    }
    fs::create_dir_all(output_dir).map_err(|e| AssetError::io(output_dir, e))
}

pub fn copy_asset(path: &Path, output_path: &Path) -> Result<(), AssetError> {
    println!("Copying {} -> {}", path.display(), output_path.display());
    fs::copy(path, output_path).map_err(|source| AssetError::Copy {
        from: path.to_path_buf(),
        to: output_path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Absolute form of `path` with `.` and `..` folded away lexically.
///
/// Symlinks are left as they are, so `a/link/..` becomes `a`.
pub fn absolute_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Every directory under `root`, root included, parents before children.
///
/// Unreadable entries are logged and left out of the walk.
pub fn walk_folders(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.into_path())
}

/// Files directly inside `dir` whose extension matches `extension`, ignoring case.
pub fn list_files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, AssetError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| AssetError::io(dir, e.into()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
