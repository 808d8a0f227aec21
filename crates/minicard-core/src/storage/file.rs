use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::KeyValueStore;
use crate::error::{Error, Result};

const SLOT_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "json.tmp";

/// Key-value store keeping one file per key inside a data directory.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written snapshot.
///
/// The directory may be shared with unrelated files. `clear` only removes
/// the slots of keys this store owns: keys declared with [`Self::with_keys`]
/// and keys written through it.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
    keys: BTreeSet<String>,
}

impl FileStorage {
    /// Open (and create if needed) a store rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            keys: BTreeSet::new(),
        })
    }

    /// Declare keys owned by this store even before they are written
    pub fn with_keys<'a>(mut self, keys: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        for key in keys {
            validate_key(key)?;
            self.keys.insert(key.to_string());
        }
        Ok(self)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that backs `key`
    pub fn slot_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.{SLOT_EXTENSION}")))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.{TEMP_EXTENSION}"))
    }
}

fn remove_if_present(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(error.into()),
    }
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if valid {
        Ok(())
    } else {
        Err(Error::Storage(format!("invalid storage key '{key}'")))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;
        let temp = self.temp_path(key);
        fs::write(&temp, value)?;
        fs::rename(&temp, &path).map_err(|error| {
            Error::Storage(format!(
                "failed to move snapshot into {}: {error}",
                path.display()
            ))
        })?;
        self.keys.insert(key.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        for key in &self.keys {
            remove_if_present(&self.slot_path(key)?)?;
            remove_if_present(&self.temp_path(key))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.get("appState").unwrap(), None);
    }

    #[test]
    fn set_replaces_previous_value_without_leaving_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        storage.set("appState", "first").unwrap();
        storage.set("appState", "second").unwrap();

        assert_eq!(storage.get("appState").unwrap().as_deref(), Some("second"));
        assert!(!dir.path().join("appState.json.tmp").exists());
    }

    #[test]
    fn clear_removes_slots_but_keeps_foreign_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        storage.set("appState", "{}").unwrap();
        fs::write(dir.path().join("package.json"), "{}").unwrap();
        fs::write(dir.path().join("config.json"), "{}").unwrap();

        storage.clear().unwrap();

        assert_eq!(storage.get("appState").unwrap(), None);
        assert!(dir.path().join("package.json").exists());
        assert!(dir.path().join("config.json").exists());
    }

    #[test]
    fn clear_removes_declared_slots_written_by_an_earlier_run() {
        let dir = tempfile::tempdir().unwrap();
        FileStorage::open(dir.path())
            .unwrap()
            .set("appState", "{}")
            .unwrap();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();

        let mut reopened = FileStorage::open(dir.path())
            .unwrap()
            .with_keys(["appState"])
            .unwrap();
        reopened.clear().unwrap();

        assert_eq!(reopened.get("appState").unwrap(), None);
        assert!(dir.path().join("tsconfig.json").exists());
    }

    #[test]
    fn with_keys_rejects_invalid_keys() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileStorage::open(dir.path()).unwrap().with_keys(["../x"]);
        assert!(matches!(result, Err(Error::Storage(_))));
    }

    #[test]
    fn rejects_keys_that_escape_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(storage.get("../x"), Err(Error::Storage(_))));
    }
}
