//! Reading and patching `meta.json` sprite sidecars.
//!
//! The document is kept as an ordered JSON map so keys this tool does not
//! know about survive a rewrite unchanged.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::domain::StateEntry;
use crate::error::AssetError;

pub const META_FILE: &str = "meta.json";

/// Appends a single-direction state for each name not already listed.
///
/// Returns how many entries were appended; the file is only rewritten when
/// that is non-zero.
pub fn ensure_states(meta_path: &Path, names: &[&str]) -> Result<usize, AssetError> {
    let raw = fs::read_to_string(meta_path).map_err(|e| AssetError::io(meta_path, e))?;
    let mut meta: Map<String, Value> = serde_json::from_str(&raw)
        .map_err(|e| AssetError::metadata(meta_path, format!("invalid JSON object: {e}")))?;

    let states = meta
        .entry("states")
        .or_insert_with(|| Value::Array(Vec::new()));
    let Value::Array(states) = states else {
        return Err(AssetError::metadata(meta_path, "`states` is not an array"));
    };

    let existing = states
        .iter()
        .map(|state| {
            state
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_owned)
                .ok_or_else(|| AssetError::metadata(meta_path, "state without a string `name`"))
        })
        .collect::<Result<Vec<String>, AssetError>>()?;

    let mut appended = 0;
    for name in names {
        if existing.iter().any(|existing| existing == name) {
            continue;
        }
        let entry = StateEntry {
            name: (*name).to_string(),
            directions: 1,
        };
        let value = serde_json::to_value(&entry)
            .map_err(|e| AssetError::metadata(meta_path, e.to_string()))?;
        states.push(value);
        appended += 1;
    }

    if appended > 0 {
        write_meta(meta_path, &meta)?;
    }
    Ok(appended)
}

/// Serialize with 4-space indentation.
fn write_meta(path: &Path, meta: &Map<String, Value>) -> Result<(), AssetError> {
    let mut payload = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut payload, PrettyFormatter::with_indent(b"    "));
    meta.serialize(&mut serializer)
        .map_err(|e| AssetError::metadata(path, e.to_string()))?;
    fs::write(path, payload).map_err(|e| AssetError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 2] = ["wielded-inhand-left", "wielded-inhand-right"];

    fn read(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("json")
    }

    #[test]
    fn appends_missing_states_and_keeps_other_keys() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(META_FILE);
        fs::write(
            &path,
            r#"{"version": 1, "size": {"x": 32, "y": 32}, "states": [{"name": "icon"}]}"#,
        )
        .expect("write");

        assert_eq!(ensure_states(&path, &NAMES).expect("update"), 2);

        let meta = read(&path);
        assert_eq!(meta["version"], 1);
        assert_eq!(meta["size"]["x"], 32);
        let states = meta["states"].as_array().expect("states");
        assert_eq!(states.len(), 3);
        assert_eq!(states[1]["name"], "wielded-inhand-left");
        assert_eq!(states[1]["directions"], 1);
        assert_eq!(states[2]["name"], "wielded-inhand-right");

        let raw = fs::read_to_string(&path).expect("read");
        assert!(raw.starts_with("{\n    \"version\""));
    }

    #[test]
    fn missing_states_key_starts_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(META_FILE);
        fs::write(&path, r#"{"version": 1}"#).expect("write");

        assert_eq!(ensure_states(&path, &NAMES).expect("update"), 2);
        assert_eq!(read(&path)["states"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn present_names_leave_file_untouched() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(META_FILE);
        let original = concat!(
            r#"{"states":[{"name":"wielded-inhand-left","directions":4},"#,
            r#"{"name":"wielded-inhand-right","directions":4}]}"#
        );
        fs::write(&path, original).expect("write");

        assert_eq!(ensure_states(&path, &NAMES).expect("update"), 0);
        assert_eq!(fs::read_to_string(&path).expect("read"), original);
    }

    #[test]
    fn malformed_sidecars_are_metadata_errors() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join(META_FILE);

        let bodies = [
            "not json",
            "[1, 2]",
            r#"{"states": 3}"#,
            r#"{"states": [{"directions": 1}]}"#,
        ];
        for body in bodies {
            fs::write(&path, body).expect("write");
            let err = ensure_states(&path, &NAMES).unwrap_err();
            assert_eq!(err.kind(), "metadata", "body: {body}");
        }
    }
}
