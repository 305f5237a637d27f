// Local key-value store
// A single JSON object file: each top-level field is one key

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON in store: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store file must hold a JSON object")]
    NotAnObject,
}

/// JSON-backed key-value store
pub struct JsonStore {
    /// `None` keeps everything in memory
    path: Option<PathBuf>,
    entries: RwLock<Map<String, Value>>,
}

impl JsonStore {
    /// Open (or create on first write) the store file at `path`
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let entries = match fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => Map::new(),
            Ok(content) => match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => map,
                _ => return Err(StoreError::NotAnObject),
            },
            Err(e) if e.kind() == ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        info!("Opened store {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path: Some(path),
            entries: RwLock::new(entries),
        })
    }

    /// Store that never touches the disk
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: RwLock::new(Map::new()),
        }
    }

    /// Raw JSON value under `key`
    pub async fn get_raw(&self, key: &str) -> Option<Value> {
        self.entries.read().await.get(key).cloned()
    }

    /// Typed value under `key`; `Ok(None)` when absent
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key).await {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Replace the value under `key` and persist
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let value = serde_json::to_value(value)?;
        let mut entries = self.entries.write().await;
        let previous = entries.insert(key.to_string(), value);

        if let Err(e) = self.persist(&entries).await {
            // Keep memory and disk in agreement
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }

        debug!("Stored key {}", key);
        Ok(())
    }

    /// Read-modify-write of `key` under a single write lock.
    /// An absent key starts from `T::default()`; nothing is written when `f` fails.
    pub async fn update<T, R, E, F>(&self, key: &str, f: F) -> Result<R, E>
    where
        T: DeserializeOwned + Serialize + Default,
        E: From<StoreError>,
        F: FnOnce(&mut T) -> Result<R, E>,
    {
        let mut entries = self.entries.write().await;

        let mut current: T = match entries.get(key) {
            Some(value) => serde_json::from_value(value.clone()).map_err(StoreError::from)?,
            None => T::default(),
        };
        let output = f(&mut current)?;

        let value = serde_json::to_value(&current).map_err(StoreError::from)?;
        let previous = entries.insert(key.to_string(), value);

        if let Err(e) = self.persist(&entries).await {
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e.into());
        }

        debug!("Updated key {}", key);
        Ok(output)
    }

    /// Remove `key`; returns whether it existed
    pub async fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        let Some(previous) = entries.remove(key) else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&entries).await {
            entries.insert(key.to_string(), previous);
            return Err(e);
        }

        debug!("Removed key {}", key);
        Ok(true)
    }

    /// Write the whole map: temp file first, then rename over the old one
    async fn persist(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_store_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("sfc-tracker-test-{}-{}", name, uuid::Uuid::new_v4()))
            .join("store.json")
    }

    #[tokio::test]
    async fn test_in_memory_get_set_remove() {
        let store = JsonStore::in_memory();
        assert_eq!(store.get::<String>("target_type").await.unwrap(), None);

        store.set("target_type", "diamond_std").await.unwrap();
        assert_eq!(
            store.get::<String>("target_type").await.unwrap().as_deref(),
            Some("diamond_std")
        );

        assert!(store.remove("target_type").await.unwrap());
        assert!(!store.remove("target_type").await.unwrap());
        assert_eq!(store.get_raw("target_type").await, None);
    }

    #[tokio::test]
    async fn test_file_store_persists() {
        let path = temp_store_path("persist");
        {
            let store = JsonStore::open(&path).await.unwrap();
            store.set("flight_logs", &json!([{"pp": 1}])).await.unwrap();
            store.set("target_type", "bronze_ls").await.unwrap();
            store.remove("target_type").await.unwrap();
        }

        let reopened = JsonStore::open(&path).await.unwrap();
        assert_eq!(reopened.get_raw("flight_logs").await, Some(json!([{"pp": 1}])));
        assert_eq!(reopened.get_raw("target_type").await, None);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_rejects_non_object_file() {
        let path = temp_store_path("array");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let result = JsonStore::open(&path).await;
        assert!(matches!(result, Err(StoreError::NotAnObject)));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_update_starts_from_default_and_skips_failed_changes() {
        let store = JsonStore::in_memory();
        let len = store
            .update("flight_logs", |list: &mut Vec<u32>| {
                list.push(7);
                Ok::<_, StoreError>(list.len())
            })
            .await
            .unwrap();
        assert_eq!(len, 1);

        let result = store
            .update("flight_logs", |list: &mut Vec<u32>| {
                list.clear();
                Err::<(), _>(StoreError::NotAnObject)
            })
            .await;
        assert!(matches!(result, Err(StoreError::NotAnObject)));
        assert_eq!(store.get_raw("flight_logs").await, Some(json!([7])));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_are_not_lost() {
        let path = temp_store_path("concurrent");
        let store = std::sync::Arc::new(JsonStore::open(&path).await.unwrap());

        let handles: Vec<_> = (0..40u32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .update("flight_logs", |list: &mut Vec<u32>| {
                            list.push(i);
                            Ok::<_, StoreError>(())
                        })
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored: Vec<u32> = store.get("flight_logs").await.unwrap().unwrap();
        assert_eq!(stored.len(), 40);

        let reopened = JsonStore::open(&path).await.unwrap();
        let persisted: Vec<u32> = reopened.get("flight_logs").await.unwrap().unwrap();
        assert_eq!(persisted.len(), 40);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[tokio::test]
    async fn test_wrong_type_is_an_error() {
        let store = JsonStore::in_memory();
        store.set("target_type", &42).await.unwrap();
        assert!(matches!(
            store.get::<String>("target_type").await,
            Err(StoreError::Json(_))
        ));
    }
}
