//! Filesystem-backed key/value storage.
//!
//! Each key is stored as a file of the same name inside the data directory:
//!
//! ```text
//! ~/.local/share/victory-planner/
//! ├── victory_planner_user_id
//! ├── victory_planner_tasks
//! └── ...
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use super::{KeyValueStorage, StorageError};

/// Key/value storage that persists each value to its own file.
#[derive(Clone, Debug)]
pub struct FileStorage {
    data_dir: PathBuf,
}

impl FileStorage {
    /// Creates a new storage instance rooted at `data_dir`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the full path for a key, rejecting keys that are not plain file names.
    pub fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        Ok(self.data_dir.join(key))
    }

    /// Scratch file a value is written to before it replaces the key's file.
    ///
    /// Keys never start with '.', so this can't collide with a stored key.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!(".{}.tmp", key))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;

        fs::create_dir_all(&self.data_dir).map_err(|e| StorageError::Io {
            path: self.data_dir.clone(),
            source: e,
        })?;

        // Write atomically using temp file + rename
        let temp_path = self.temp_path(key);
        let io_err = |source: io::Error| StorageError::Io {
            path: temp_path.clone(),
            source,
        };

        let mut file = File::create(&temp_path).map_err(io_err)?;
        file.write_all(value.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        fs::rename(&temp_path, &path).map_err(|e| StorageError::Io { path, source: e })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().to_path_buf());
        (storage, temp_dir)
    }

    #[test]
    fn test_get_missing_returns_none() {
        let (storage, _temp) = test_storage();
        assert!(storage.get("victory_planner_tasks").unwrap().is_none());
    }

    #[test]
    fn test_set_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested_dir = temp_dir.path().join("nested").join("data");
        let storage = FileStorage::new(nested_dir.clone());

        storage.set("victory_planner_user_id", "user_1").unwrap();

        assert!(nested_dir.exists());
        assert!(nested_dir.join("victory_planner_user_id").is_file());
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let (storage, _temp) = test_storage();

        storage.set("victory_planner_notes", "[]").unwrap();
        assert_eq!(
            storage.get("victory_planner_notes").unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_set_overwrites() {
        let (storage, _temp) = test_storage();

        storage.set("key", "first").unwrap();
        storage.set("key", "second").unwrap();

        assert_eq!(storage.get("key").unwrap(), Some("second".to_string()));
    }

    #[test]
    fn test_values_survive_reopen() {
        let (storage, temp) = test_storage();
        storage.set("victory_planner_goals", "[{\"id\":\"a\"}]").unwrap();

        let reopened = FileStorage::new(temp.path().to_path_buf());
        assert_eq!(
            reopened.get("victory_planner_goals").unwrap(),
            Some("[{\"id\":\"a\"}]".to_string())
        );
    }

    #[test]
    fn test_set_leaves_no_temp_file() {
        let (storage, temp) = test_storage();
        storage.set("victory_planner_tasks", "[]").unwrap();

        let names: Vec<_> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["victory_planner_tasks"]);
    }

    #[test]
    fn test_interrupted_write_keeps_previous_value() {
        let (storage, temp) = test_storage();
        storage.set("victory_planner_tasks", "[{\"id\":\"a\"}]").unwrap();

        // A write that died before the rename leaves only the scratch file.
        fs::write(temp.path().join(".victory_planner_tasks.tmp"), "[{\"id\":").unwrap();

        assert_eq!(
            storage.get("victory_planner_tasks").unwrap(),
            Some("[{\"id\":\"a\"}]".to_string())
        );

        storage.set("victory_planner_tasks", "[]").unwrap();
        assert_eq!(
            storage.get("victory_planner_tasks").unwrap(),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let (storage, _temp) = test_storage();

        for key in ["", "../escape", "a/b", ".hidden"] {
            assert!(matches!(
                storage.set(key, "x"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
