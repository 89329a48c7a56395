use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// What a batch step did to a file or folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Multi-channel audio was down-mixed and written to the output directory.
    Converted { channels: u8 },
    /// A missing sprite was copied in from the parent folder.
    Copied,
    /// Wielded sprites were written; `metadata` tells what happened to `meta.json`.
    Wielded { metadata: MetadataUpdate },
    /// The image was cropped to its opaque content.
    Trimmed { from: (u32, u32), to: (u32, u32) },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataUpdate {
    Appended(usize),
    Unchanged,
    NoSidecar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyMono,
    AlreadyPresent,
    NoSource,
    MissingInhand,
    NothingToTrim,
    FullyTransparent,
}

#[derive(Debug)]
pub enum Outcome {
    Done(Action),
    Skipped(SkipReason),
    Failed(AssetError),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }
}

impl From<Result<Action, AssetError>> for Outcome {
    fn from(result: Result<Action, AssetError>) -> Self {
        match result {
            Ok(action) => Outcome::Done(action),
            Err(err) => Outcome::Failed(err),
        }
    }
}

/// Classified outcomes of one pass, in the order the paths were visited.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub entries: Vec<(PathBuf, Outcome)>,
}

impl BatchReport {
    pub fn record(&mut self, path: &Path, outcome: Outcome) {
        self.entries.push((path.to_path_buf(), outcome));
    }

    pub fn processed(&self) -> usize {
        self.entries.len()
    }

    pub fn done(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_done()).count()
    }

    pub fn skipped(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_skipped()).count()
    }

    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.entries
            .iter()
            .filter(|(_, o)| matches!(o, Outcome::Skipped(r) if *r == reason))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|(_, o)| o.is_failed()).count()
    }

    pub fn outcome(&self, path: &Path) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, o)| o)
    }
}

/// A state entry appended to a `meta.json` sidecar.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub name: String,
    pub directions: u32,
}
