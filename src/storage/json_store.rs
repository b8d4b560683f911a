//! Generic JSON map persistence.
//!
//! A [`JsonStore`] keeps a `HashMap<String, V>` in memory and rewrites the
//! backing file after every change. If loading fails (file missing or
//! corrupted) it starts empty rather than panicking.

use std::{collections::HashMap, sync::Arc};

use log::{error, info, warn};
use serde::{Serialize, de::DeserializeOwned};
use tokio::{fs, sync::Mutex};

/// String-keyed map persisted as a JSON object.
pub struct JsonStore<V> {
    /// Path to the JSON file
    path: String,
    /// In-memory copy of the file
    entries: Arc<Mutex<HashMap<String, V>>>,
}

impl<V> JsonStore<V>
where
    V: Serialize + DeserializeOwned + Clone,
{
    /// Opens the store, loading any previously persisted entries.
    pub async fn open(path: String) -> Self {
        let entries = Self::load(&path).await;
        JsonStore {
            path,
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    async fn load(path: &str) -> HashMap<String, V> {
        let Ok(serialized) = fs::read_to_string(path).await else {
            warn!("no persisted data at {}, starting empty", path);
            return HashMap::new();
        };

        let Ok(entries) = serde_json::from_str::<HashMap<String, V>>(&serialized) else {
            error!("failed to deserialize {}, starting empty", path);
            return HashMap::new();
        };

        info!("loaded {} entries from {}", entries.len(), path);

        entries
    }

    pub async fn get(&self, key: &str) -> Option<V> {
        self.entries.lock().await.get(key).cloned()
    }

    /// Inserts or replaces an entry, then persists the map.
    pub async fn insert(&self, key: &str, value: V) {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_owned(), value);
        self.persist(&entries).await;
    }

    /// Removes an entry, then persists the map. Returns the removed value.
    pub async fn remove(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let removed = entries.remove(key);
        if removed.is_some() {
            self.persist(&entries).await;
        }
        removed
    }

    async fn persist(&self, entries: &HashMap<String, V>) {
        let serialized = match serde_json::to_string(entries) {
            Ok(serialized) => serialized,
            Err(e) => {
                error!("failed to serialize {}: {}", self.path, e);
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, &serialized).await {
            error!("failed to persist {}: {}", self.path, e);
            return;
        }

        info!("persisted {}", self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_open_nonexistent_file_is_empty() {
        let store: JsonStore<String> = JsonStore::open("nonexistent_store.json".to_string()).await;
        assert!(store.get("anything").await.is_none());
    }

    #[tokio::test]
    async fn test_insert_persists_across_reopen() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let store: JsonStore<String> = JsonStore::open(path.clone()).await;
        store.insert("@alice:example.com", "alice_pubg".to_string()).await;

        let reopened: JsonStore<String> = JsonStore::open(path).await;
        assert_eq!(
            reopened.get("@alice:example.com").await,
            Some("alice_pubg".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove_persists() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let store: JsonStore<String> = JsonStore::open(path.clone()).await;
        store.insert("a", "1".to_string()).await;
        store.insert("b", "2".to_string()).await;
        assert_eq!(store.remove("a").await, Some("1".to_string()));
        assert_eq!(store.remove("a").await, None);

        let reopened: JsonStore<String> = JsonStore::open(path).await;
        assert!(reopened.get("a").await.is_none());
        assert_eq!(reopened.get("b").await, Some("2".to_string()));
    }

    #[tokio::test]
    async fn test_open_corrupted_json_is_empty() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        fs::write(&path, "{ this is not valid json ").await.unwrap();

        let store: JsonStore<String> = JsonStore::open(path).await;
        assert!(store.get("a").await.is_none());
    }
}
