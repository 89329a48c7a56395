//! Generates "wielded" in-hand sprites from the regular in-hand pair.

use std::path::Path;
use tracing::debug;

use crate::domain::{Action, BatchReport, MetadataUpdate, Outcome, SkipReason};
use crate::error::AssetError;
use crate::fs::{copy_asset, walk_folders};
use crate::meta::{META_FILE, ensure_states};

/// (source sprite, wielded copy, state name of the copy)
pub const WIELDED_PAIRS: [(&str, &str, &str); 2] = [
    ("inhand-left.png", "wielded-inhand-left.png", "wielded-inhand-left"),
    ("inhand-right.png", "wielded-inhand-right.png", "wielded-inhand-right"),
];

pub fn generate(root: &Path) -> BatchReport {
    let mut report = BatchReport::default();
    for folder in walk_folders(root) {
        let outcome = process_folder(&folder);
        match &outcome {
            Outcome::Skipped(_) => {
                println!("Missing inhand-left or inhand-right in {}, skipping.", folder.display());
            }
            Outcome::Failed(err) => {
                println!("Error ({}) in {}: {err}", err.kind(), folder.display());
            }
            Outcome::Done(_) => {}
        }
        report.record(&folder, outcome);
    }

    let metadata_updates = report
        .entries
        .iter()
        .filter(|(_, o)| {
            matches!(
                o,
                Outcome::Done(Action::Wielded {
                    metadata: MetadataUpdate::Appended(_)
                })
            )
        })
        .count();
    println!(
        "Folders processed: {}, skipped: {}, meta.json updated: {}, errors: {}",
        report.done(),
        report.skipped(),
        metadata_updates,
        report.failed()
    );
    report
}

/// Copies the in-hand pair and registers the new states in `meta.json`.
///
/// A folder without both sources is not touched at all.
pub fn process_folder(folder: &Path) -> Outcome {
    if !WIELDED_PAIRS
        .iter()
        .all(|(source, _, _)| folder.join(source).is_file())
    {
        debug!(folder = %folder.display(), "no in-hand pair");
        return Outcome::Skipped(SkipReason::MissingInhand);
    }
    Outcome::from(wield(folder))
}

fn wield(folder: &Path) -> Result<Action, AssetError> {
    for (source, copy, _) in WIELDED_PAIRS {
        copy_asset(&folder.join(source), &folder.join(copy))?;
    }
    println!("Copied to wielded-inhand-* in {}", folder.display());

    let meta_path = folder.join(META_FILE);
    if !meta_path.is_file() {
        println!("{META_FILE} not found in {}, skipping JSON update.", folder.display());
        return Ok(Action::Wielded {
            metadata: MetadataUpdate::NoSidecar,
        });
    }

    let names = WIELDED_PAIRS.map(|(_, _, state)| state);
    let appended = ensure_states(&meta_path, &names)?;
    let metadata = if appended > 0 {
        println!("Updated {META_FILE} in {}", folder.display());
        MetadataUpdate::Appended(appended)
    } else {
        MetadataUpdate::Unchanged
    };
    Ok(Action::Wielded { metadata })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::fs;

    fn sprite_folder(root: &Path, name: &str, meta: Option<&str>) -> std::path::PathBuf {
        let folder = root.join(name);
        fs::create_dir_all(&folder).expect("mkdir");
        fs::write(folder.join("inhand-left.png"), b"left").expect("write");
        fs::write(folder.join("inhand-right.png"), b"right").expect("write");
        if let Some(meta) = meta {
            fs::write(folder.join(META_FILE), meta).expect("write");
        }
        folder
    }

    fn state_names(folder: &Path) -> Vec<String> {
        let meta: Value =
            serde_json::from_str(&fs::read_to_string(folder.join(META_FILE)).expect("read"))
                .expect("json");
        meta["states"]
            .as_array()
            .expect("states")
            .iter()
            .filter_map(|s| s["name"].as_str().map(str::to_owned))
            .collect()
    }

    #[test]
    fn copies_sprites_and_updates_metadata() {
        let temp = tempfile::tempdir().expect("tempdir");
        let meta = r#"{"states": [{"name": "base"}]}"#;
        let folder = sprite_folder(temp.path(), "ak.rsi", Some(meta));

        let outcome = process_folder(&folder);

        assert!(matches!(
            outcome,
            Outcome::Done(Action::Wielded {
                metadata: MetadataUpdate::Appended(2)
            })
        ));
        assert_eq!(fs::read(folder.join("wielded-inhand-left.png")).expect("read"), b"left");
        assert_eq!(fs::read(folder.join("wielded-inhand-right.png")).expect("read"), b"right");
        assert_eq!(
            state_names(&folder),
            vec!["base", "wielded-inhand-left", "wielded-inhand-right"]
        );
    }

    #[test]
    fn running_twice_does_not_duplicate_states() {
        let temp = tempfile::tempdir().expect("tempdir");
        let folder = sprite_folder(temp.path(), "svd.rsi", Some(r#"{"states": []}"#));

        generate(temp.path());
        let second = generate(temp.path());

        assert_eq!(state_names(&folder).len(), 2);
        assert_eq!(second.failed(), 0);
        assert!(matches!(
            second.outcome(&folder),
            Some(Outcome::Done(Action::Wielded {
                metadata: MetadataUpdate::Unchanged
            }))
        ));
    }

    #[test]
    fn folder_missing_a_source_is_untouched() {
        let temp = tempfile::tempdir().expect("tempdir");
        let folder = temp.path().join("pistol.rsi");
        fs::create_dir(&folder).expect("mkdir");
        fs::write(folder.join("inhand-left.png"), b"left").expect("write");
        let meta = r#"{"states": []}"#;
        fs::write(folder.join(META_FILE), meta).expect("write");

        let report = generate(temp.path());

        assert!(matches!(
            report.outcome(&folder),
            Some(Outcome::Skipped(SkipReason::MissingInhand))
        ));
        assert!(!folder.join("wielded-inhand-left.png").exists());
        assert_eq!(fs::read_to_string(folder.join(META_FILE)).expect("read"), meta);
    }

    #[test]
    fn missing_sidecar_still_copies_sprites() {
        let temp = tempfile::tempdir().expect("tempdir");
        let folder = sprite_folder(temp.path(), "mosin.rsi", None);

        let outcome = process_folder(&folder);

        assert!(matches!(
            outcome,
            Outcome::Done(Action::Wielded {
                metadata: MetadataUpdate::NoSidecar
            })
        ));
        assert!(folder.join("wielded-inhand-right.png").is_file());
        assert!(!folder.join(META_FILE).exists());
    }

    #[test]
    fn broken_sidecar_fails_only_that_folder() {
        let temp = tempfile::tempdir().expect("tempdir");
        let broken = sprite_folder(temp.path(), "a.rsi", Some("{ nope"));
        let fine = sprite_folder(temp.path(), "b.rsi", Some(r#"{"states": []}"#));

        let report = generate(temp.path());

        assert!(matches!(
            report.outcome(&broken),
            Some(Outcome::Failed(AssetError::Metadata { .. }))
        ));
        assert_eq!(state_names(&fine).len(), 2);
    }
}
