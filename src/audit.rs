//! Read-only report of folders missing a required sprite.

use std::path::{Path, PathBuf};

use crate::fs::{absolute_path, walk_folders};

pub const DEFAULT_REQUIRED_FILE: &str = "inhand-left.png";

/// Absolute paths of every folder under `root` (root included) that has no
/// regular file named `filename` directly inside it.
///
/// A directory carrying that name does not count. An invalid root is
/// reported and yields an empty list.
pub fn find_folders_missing_file(root: &Path, filename: &str) -> Vec<PathBuf> {
    let root = absolute_path(root);
    if !root.is_dir() {
        println!("Error: Folder not found - {}", root.display());
        return Vec::new();
    }

    walk_folders(&root)
        .filter(|folder| !folder.join(filename).is_file())
        .collect()
}

pub fn print_audit(root: &Path, filename: &str) -> Vec<PathBuf> {
    let root = absolute_path(root);
    println!("\nSearching for folders missing '{filename}'");
    println!("Starting in: '{}'\n", root.display());

    let missing = find_folders_missing_file(&root, filename);
    let rule = "-".repeat(40);
    if missing.is_empty() {
        println!(
            "All folders checked within '{}' contain the file '{filename}'.",
            root.display()
        );
    } else {
        println!("{rule}");
        println!("Folders missing the file:");
        println!("{rule}");
        for folder in &missing {
            println!("{}", folder.display());
        }
        println!("{rule}");
    }
    println!("\nSearch complete.");
    missing
}
