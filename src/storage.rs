use crate::errors::AppError;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::{collections::BTreeMap, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

/// Flat key-value store persisted as one JSON object.
///
/// Entries are kept as raw JSON values and only decoded into typed records
/// when read, so one malformed entry never poisons the rest of the file.
#[derive(Debug, Default)]
pub struct Storage {
    path: Option<PathBuf>,
    entries: BTreeMap<String, Value>,
}

impl Storage {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub async fn open(path: &Path) -> Self {
        let entries = match fs::read(path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse data file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read data file: {err}");
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path.to_path_buf()),
            entries,
        }
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Decodes the entry under `key`. Absent and malformed entries both come
    /// back as `None`; the latter is logged.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.entries.get(key)?;
        match T::deserialize(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!(key, "ignoring malformed stored entry: {err}");
                None
            }
        }
    }

    pub fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), AppError> {
        let value = serde_json::to_value(value).map_err(AppError::internal)?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Applies `apply` and writes the result to disk. If either step fails
    /// the in-memory entries go back to what they were before the call.
    pub async fn update<T>(
        &mut self,
        apply: impl FnOnce(&mut Self) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let previous = self.entries.clone();
        let result = match apply(self) {
            Ok(value) => self.persist().await.map(|()| value),
            Err(err) => Err(err),
        };
        if result.is_err() {
            self.entries = previous;
        }
        result
    }

    /// Writes every entry back to the data file. In-memory stores skip this.
    pub async fn persist(&self) -> Result<(), AppError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        let payload = serde_json::to_vec_pretty(&self.entries).map_err(AppError::internal)?;
        fs::write(path, payload).await.map_err(AppError::internal)?;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unique_path(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("daily_log_{name}_{}_{nanos}.json", std::process::id()))
    }

    #[test]
    fn malformed_entry_reads_as_absent() {
        let mut storage = Storage::in_memory();
        storage.insert_raw("count", json!("not a number"));
        assert_eq!(storage.get::<u32>("count"), None);
        assert!(storage.contains("count"));
    }

    #[tokio::test]
    async fn persist_then_open_restores_entries() {
        let path = unique_path("roundtrip");
        let mut storage = Storage::open(&path).await;
        storage.set("answer", &42u32).unwrap();
        storage.persist().await.unwrap();

        let reopened = Storage::open(&path).await;
        assert_eq!(reopened.get::<u32>("answer"), Some(42));
        let _ = std::fs::remove_file(path);
    }

    #[tokio::test]
    async fn failed_write_rolls_back_update() {
        let dir = unique_path("as_dir");
        std::fs::create_dir(&dir).unwrap();
        let mut storage = Storage::open(&dir).await;

        let result = storage.update(|storage| storage.set("answer", &42u32)).await;
        assert!(result.is_err());
        assert_eq!(storage.get::<u32>("answer"), None);
        assert!(!storage.contains("answer"));
        let _ = std::fs::remove_dir(dir);
    }

    #[tokio::test]
    async fn failed_apply_rolls_back_update() {
        let mut storage = Storage::in_memory();
        storage.set("kept", &1u32).unwrap();

        let result: Result<(), AppError> = storage
            .update(|storage| {
                storage.set("kept", &2u32)?;
                Err(AppError::bad_request("nope"))
            })
            .await;
        assert!(result.is_err());
        assert_eq!(storage.get::<u32>("kept"), Some(1));

        storage.update(|storage| storage.set("kept", &3u32)).await.unwrap();
        assert_eq!(storage.get::<u32>("kept"), Some(3));
    }

    #[tokio::test]
    async fn corrupt_file_opens_empty() {
        let path = unique_path("corrupt");
        std::fs::write(&path, b"{ not json").unwrap();
        let storage = Storage::open(&path).await;
        assert!(!storage.contains("anything"));
        assert_eq!(storage.path(), Some(path.as_path()));
        let _ = std::fs::remove_file(path);
    }
}
