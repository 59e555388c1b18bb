//! Durable key-value storage for appearance preferences.
//!
//! The persisted layout is two flat string entries: [`MODE_KEY`] holding
//! `light`/`dark` and [`SCHEME_KEY`] holding the scheme name. Backends only
//! see strings; validation happens in the store when values are read back.
//!
//! - [`FileStorage`]: a flat YAML map on disk, by default in the user's config
//!   directory.
//! - [`MemoryStorage`]: an in-process map whose clones share contents, so a
//!   test can "reload" by opening a second store over a clone. It can also be
//!   made [`unavailable`](MemoryStorage::unavailable) to exercise the degraded
//!   path.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde_yaml::{Mapping, Value};

use crate::error::StorageError;

/// Storage key for the light/dark mode.
pub const MODE_KEY: &str = "theme";

/// Storage key for the accent scheme.
pub const SCHEME_KEY: &str = "colorScheme";

/// Directory under the user config dir holding the preferences file.
pub const CONFIG_DIR_NAME: &str = "folio";

/// File name of the preferences file.
pub const FILE_NAME: &str = "appearance.yaml";

/// A string-valued key-value store that survives process restart.
pub trait PreferenceStorage: Send {
    /// Returns the stored value, or `None` if the key was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Stores several entries as one update.
    ///
    /// Backends that can commit atomically override this so a failure never
    /// leaves some entries new and others old. The default writes them one
    /// at a time and stops at the first error.
    fn write_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.write(key, value)?;
        }
        Ok(())
    }
}

/// Preferences kept as a flat YAML map in a single file.
///
/// ```yaml
/// theme: dark
/// colorScheme: purple
/// ```
///
/// A missing file reads as empty. Other keys in the file are left alone, and
/// a key whose value is not a string is reported as a format error for that
/// key only. Writes go to a sibling temporary file that is then renamed over
/// the original, so a crash mid-write leaves the previous contents intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage at `<config dir>/folio/appearance.yaml`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the platform has no config
    /// directory.
    pub fn in_config_dir() -> Result<Self, StorageError> {
        Self::default_path().map(Self::new)
    }

    /// The default preferences path for this platform, if any.
    pub fn default_path() -> Result<PathBuf, StorageError> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(FILE_NAME))
            .ok_or_else(|| StorageError::Unavailable("no user config directory".to_string()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Mapping, StorageError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Mapping::new()),
            Err(err) => return Err(StorageError::io(&self.path, err)),
        };

        if content.trim().is_empty() {
            return Ok(Mapping::new());
        }

        serde_yaml::from_str::<Option<Mapping>>(&content)
            .map(Option::unwrap_or_default)
            .map_err(|err| StorageError::format(&self.path, err))
    }

    fn save(&self, entries: &Mapping) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|err| StorageError::io(parent, err))?;
            }
        }

        let content =
            serde_yaml::to_string(entries).map_err(|err| StorageError::format(&self.path, err))?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, content).map_err(|err| StorageError::io(&tmp, err))?;
        fs::rename(&tmp, &self.path).map_err(|err| StorageError::io(&self.path, err))
    }
}

impl PreferenceStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.load()?.remove(key) {
            None => Ok(None),
            Some(Value::String(value)) => Ok(Some(value)),
            Some(_) => Err(StorageError::format(
                &self.path,
                format!("value of '{}' is not a string", key),
            )),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_all(&[(key, value)])
    }

    fn write_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        // A file that is not a mapping is replaced rather than blocking every
        // future write.
        let mut mapping = match self.load() {
            Ok(mapping) => mapping,
            Err(StorageError::Format { .. }) => Mapping::new(),
            Err(err) => return Err(err),
        };
        for (key, value) in entries {
            mapping.insert(
                Value::String(key.to_string()),
                Value::String(value.to_string()),
            );
        }
        self.save(&mapping)
    }
}

/// In-memory storage. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with `entries`.
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: Arc::new(Mutex::new(map)),
            unavailable: false,
        }
    }

    /// Storage on which every read and write fails.
    pub fn unavailable() -> Self {
        Self {
            entries: Arc::default(),
            unavailable: true,
        }
    }

    /// Direct read of the shared map, bypassing availability.
    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        // The map holds plain strings; a poisoned guard is still consistent.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable {
            Err(StorageError::Unavailable("memory storage disabled".to_string()))
        } else {
            Ok(())
        }
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_all(&[(key, value)])
    }

    fn write_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        self.check()?;
        let mut map = self.lock();
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_storage_roundtrip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.read(MODE_KEY).unwrap(), None);

        storage.write(MODE_KEY, "dark").unwrap();
        assert_eq!(storage.read(MODE_KEY).unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_memory_storage_clones_share_entries() {
        let mut storage = MemoryStorage::new();
        let view = storage.clone();
        storage.write(SCHEME_KEY, "green").unwrap();
        assert_eq!(view.get(SCHEME_KEY), Some("green".to_string()));
    }

    #[test]
    fn test_memory_storage_unavailable() {
        let mut storage = MemoryStorage::unavailable();
        assert!(matches!(
            storage.read(MODE_KEY),
            Err(StorageError::Unavailable(_))
        ));
        assert!(storage.write(MODE_KEY, "dark").is_err());
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_missing_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("appearance.yaml"));
        assert_eq!(storage.read(MODE_KEY).unwrap(), None);
    }

    #[test]
    fn test_file_storage_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("folio").join(FILE_NAME);
        let mut storage = FileStorage::new(&path);

        storage.write(MODE_KEY, "dark").unwrap();
        storage.write(SCHEME_KEY, "orange").unwrap();

        assert!(path.exists());
        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.read(MODE_KEY).unwrap(), Some("dark".to_string()));
        assert_eq!(reopened.read(SCHEME_KEY).unwrap(), Some("orange".to_string()));
    }

    #[test]
    fn test_file_storage_writes_flat_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(FILE_NAME);
        let mut storage = FileStorage::new(&path);
        storage.write(MODE_KEY, "light").unwrap();
        storage.write(SCHEME_KEY, "sky").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: BTreeMap<String, String> = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["theme"], "light");
        assert_eq!(parsed["colorScheme"], "sky");
        assert!(!temp_dir.path().join("appearance.yaml.tmp").exists());
    }

    #[test]
    fn test_file_storage_reads_hand_written_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(FILE_NAME);
        fs::write(&path, "theme: dark\ncolorScheme: purple\n").unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.read(MODE_KEY).unwrap(), Some("dark".to_string()));
        assert_eq!(storage.read(SCHEME_KEY).unwrap(), Some("purple".to_string()));
    }

    #[test]
    fn test_file_storage_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(FILE_NAME);
        fs::write(&path, "- just\n- a list\n").unwrap();

        let mut storage = FileStorage::new(&path);
        assert!(matches!(
            storage.read(MODE_KEY),
            Err(StorageError::Format { .. })
        ));

        // Writing replaces the corrupt contents.
        storage.write(MODE_KEY, "dark").unwrap();
        assert_eq!(storage.read(MODE_KEY).unwrap(), Some("dark".to_string()));
    }

    #[test]
    fn test_file_storage_keeps_unrelated_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(FILE_NAME);
        fs::write(&path, "theme: dark\ncolorScheme: purple\nwindow: [1, 2]\n").unwrap();

        let mut storage = FileStorage::new(&path);
        assert_eq!(storage.read(MODE_KEY).unwrap(), Some("dark".to_string()));
        assert_eq!(storage.read(SCHEME_KEY).unwrap(), Some("purple".to_string()));

        storage.write(SCHEME_KEY, "green").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Mapping = serde_yaml::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed["theme"], Value::from("dark"));
        assert_eq!(parsed["colorScheme"], Value::from("green"));
        assert_eq!(parsed["window"], serde_yaml::from_str::<Value>("[1, 2]").unwrap());
    }

    #[test]
    fn test_file_storage_non_string_value_fails_only_that_key() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(FILE_NAME);
        fs::write(&path, "theme: [dark]\ncolorScheme: orange\n").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(
            storage.read(MODE_KEY),
            Err(StorageError::Format { .. })
        ));
        assert_eq!(storage.read(SCHEME_KEY).unwrap(), Some("orange".to_string()));
    }

    #[test]
    fn test_file_storage_write_all_commits_together() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(FILE_NAME);
        let mut storage = FileStorage::new(&path);

        storage
            .write_all(&[(MODE_KEY, "dark"), (SCHEME_KEY, "green")])
            .unwrap();

        let parsed: BTreeMap<String, String> =
            serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["theme"], "dark");
        assert_eq!(parsed["colorScheme"], "green");
        assert!(!temp_dir.path().join("appearance.yaml.tmp").exists());
    }

    #[test]
    fn test_memory_storage_write_all() {
        let mut storage = MemoryStorage::new();
        storage
            .write_all(&[(MODE_KEY, "light"), (SCHEME_KEY, "purple")])
            .unwrap();
        assert_eq!(storage.get(MODE_KEY).as_deref(), Some("light"));
        assert_eq!(storage.get(SCHEME_KEY).as_deref(), Some("purple"));

        let mut disabled = MemoryStorage::unavailable();
        assert!(disabled.write_all(&[(MODE_KEY, "dark")]).is_err());
        assert!(disabled.is_empty());
    }

    #[test]
    fn test_file_storage_empty_file_reads_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(FILE_NAME);
        fs::write(&path, "\n").unwrap();
        assert_eq!(FileStorage::new(&path).read(SCHEME_KEY).unwrap(), None);
    }

    #[test]
    fn test_default_path_ends_with_file_name() {
        if let Ok(path) = FileStorage::default_path() {
            assert!(path.ends_with(Path::new(CONFIG_DIR_NAME).join(FILE_NAME)));
        }
    }
}
