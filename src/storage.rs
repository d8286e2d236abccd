use crate::errors::Result;
use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

/// Durable string key-value persistence, in the shape of browser local storage.
pub trait KeyValueStore: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from("data")
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}

/// In-process store. Writes can be switched off to simulate a full or read-only disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    items: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(crate::errors::StoreError::Persistence(format!(
                "write to {key} refused"
            )));
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get_item("activities").unwrap(), None);
        store.set_item("activities", "[]").unwrap();
        store.set_item("activities", "[1]").unwrap();
        assert_eq!(store.get_item("activities").unwrap().as_deref(), Some("[1]"));
        assert!(store.dir().join("activities.json").exists());
        assert!(!store.dir().join(".activities.json.tmp").exists());
    }

    #[test]
    fn memory_store_can_refuse_writes() {
        let mut store = MemoryKeyValueStore::new().with_item("theme", "\"dark\"");
        store.set_fail_writes(true);
        assert!(store.set_item("theme", "\"light\"").is_err());
        assert_eq!(store.get_item("theme").unwrap().as_deref(), Some("\"dark\""));
    }
}
