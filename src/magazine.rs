//! Fills in a placeholder magazine sprite in folders that lack one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::domain::{Action, BatchReport, Outcome, SkipReason};
use crate::fs::{absolute_path, copy_asset, walk_folders};

pub const MAGAZINE_SPRITE: &str = "mag-0.png";

/// Walks `root` and copies `filename` into every folder missing it from the
/// folder's immediate parent.
///
/// Only sprites that existed before the walk count as sources: a parent that
/// received its copy earlier in the same run does not pass it further down,
/// so propagation reaches one level per run.
pub fn propagate(root: &Path, filename: &str) -> BatchReport {
    let mut report = BatchReport::default();
    let mut copied_this_run: HashSet<PathBuf> = HashSet::new();
    // The root's parent must be its real parent, not a lexical prefix of `root`
    let root = absolute_path(root);

    for folder in walk_folders(&root) {
        let target = folder.join(filename);
        if target.is_file() {
            debug!(folder = %folder.display(), "already present");
            report.record(&folder, Outcome::Skipped(SkipReason::AlreadyPresent));
            continue;
        }

        let source = folder
            .parent()
            .filter(|parent| !copied_this_run.contains(*parent))
            .map(|parent| parent.join(filename))
            .filter(|source| source.is_file());

        let outcome = match source {
            Some(source) => {
                let outcome = Outcome::from(copy_asset(&source, &target).map(|()| Action::Copied));
                if outcome.is_done() {
                    copied_this_run.insert(folder.clone());
                }
                outcome
            }
            None => {
                println!("No {filename} found to copy for: {}", folder.display());
                Outcome::Skipped(SkipReason::NoSource)
            }
        };
        if let Outcome::Failed(err) = &outcome {
            println!("Error ({}) copying into {}: {err}", err.kind(), folder.display());
        }
        report.record(&folder, outcome);
    }

    println!(
        "Copied: {}, already present: {}, no source: {}, errors: {}",
        report.done(),
        report.skipped_for(SkipReason::AlreadyPresent),
        report.skipped_for(SkipReason::NoSource),
        report.failed()
    );
    report
}
