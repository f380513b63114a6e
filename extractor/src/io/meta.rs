//! Run metadata stored in `<run dir>/meta.json`.
//!
//! Pipeline stages each record their results under a top-level key; this
//! module merges one key at a time and leaves the others untouched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

pub const META_FILE: &str = "meta.json";

/// Set `key` in `<dir>/meta.json` to `entry`, creating the file if needed.
///
/// A file that is unreadable as a JSON object is replaced.
pub fn update_meta<T: Serialize>(dir: &Path, key: &str, entry: &T) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
    let meta_path = dir.join(META_FILE);

    let mut data = match fs::read_to_string(&meta_path) {
        Ok(contents) => match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => map,
            _ => {
                warn!(path = %meta_path.display(), "meta file is not a JSON object; replacing");
                Map::new()
            }
        },
        Err(_) => Map::new(),
    };

    let value = serde_json::to_value(entry).with_context(|| format!("serialize meta {key}"))?;
    data.insert(key.to_string(), value);

    let mut buf = serde_json::to_string_pretty(&Value::Object(data)).context("serialize meta")?;
    buf.push('\n');
    let tmp_path = meta_path.with_extension("json.tmp");
    fs::write(&tmp_path, buf).with_context(|| format!("write {}", tmp_path.display()))?;
    fs::rename(&tmp_path, &meta_path)
        .with_context(|| format!("replace {}", meta_path.display()))?;
    Ok(meta_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn read_meta(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("json")
    }

    #[test]
    fn merges_keys_into_existing_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        update_meta(temp.path(), "overall", &json!({"elapsed_time": "0:00:01"})).expect("first");
        let path =
            update_meta(temp.path(), "optimal_path", &json!({"num_steps": 3})).expect("second");

        let meta = read_meta(&path);
        assert_eq!(meta["overall"]["elapsed_time"], "0:00:01");
        assert_eq!(meta["optimal_path"]["num_steps"], 3);
    }

    #[test]
    fn replaces_non_object_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join(META_FILE), "[1, 2]").expect("write");
        let path = update_meta(temp.path(), "k", &json!(true)).expect("update");
        assert_eq!(read_meta(&path), json!({"k": true}));
    }

    #[test]
    fn creates_missing_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("runs").join("r1");
        let path = update_meta(&dir, "k", &json!(1)).expect("update");
        assert!(path.is_file());
    }
}
