//! Per-room default comparison parameters.

use serde::{Deserialize, Serialize};

use crate::storage::JsonStore;

/// Defaults a group room applies when `season=`, `region=` or `mode=` are omitted.
///
/// Values are stored normalized (`2018-03`, `PC_EU`, `SQUAD_FPP`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomDefaults {
    pub season: String,
    pub region: String,
    pub mode: String,
}

pub struct RoomDefaultsStore {
    store: JsonStore<RoomDefaults>,
}

impl RoomDefaultsStore {
    pub async fn open(path: String) -> Self {
        RoomDefaultsStore {
            store: JsonStore::open(path).await,
        }
    }

    pub async fn get_defaults(&self, room_id: &str) -> Option<RoomDefaults> {
        self.store.get(room_id).await
    }

    pub async fn set_defaults(&self, room_id: &str, defaults: RoomDefaults) {
        self.store.insert(room_id, defaults).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_and_get_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("rooms").to_str().unwrap().to_string();
        let store = RoomDefaultsStore::open(path.clone()).await;

        assert!(store.get_defaults("!room:example.com").await.is_none());

        let defaults = RoomDefaults {
            season: "2018-03".to_string(),
            region: "PC_EU".to_string(),
            mode: "SQUAD_FPP".to_string(),
        };
        store
            .set_defaults("!room:example.com", defaults.clone())
            .await;

        let reopened = RoomDefaultsStore::open(path).await;
        assert_eq!(
            reopened.get_defaults("!room:example.com").await,
            Some(defaults)
        );
    }
}
