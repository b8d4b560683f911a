//! On-disk Matrix login and sync position.
//!
//! The session directory contains:
//! - `session`: JSON with the login tokens and the last sync token
//! - `sqlite`: the Matrix SDK state store

use std::sync::Arc;

use log::{debug, trace, warn};
use matrix_sdk::authentication::matrix;
use serde::{Deserialize, Serialize};
use tokio::{fs, sync::Mutex};

use crate::utils::get_path;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedSession {
    login: matrix::MatrixSession,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sync_token: Option<String>,
}

/// Persists the bot's Matrix login so restarts reuse the same device.
#[derive(Clone)]
pub struct SessionStore {
    dir_path: String,
    persisted: Arc<Mutex<Option<PersistedSession>>>,
}

impl SessionStore {
    /// Opens the session directory, creating it if needed.
    ///
    /// A missing or unreadable `session` file means the bot has to log in again.
    pub async fn open(dir_path: &str) -> anyhow::Result<Self> {
        fs::create_dir_all(dir_path).await?;

        let session_path = get_path(dir_path, "session");
        let persisted = match fs::read_to_string(&session_path).await {
            Ok(data) => match serde_json::from_str::<PersistedSession>(&data) {
                Ok(session) => Some(session),
                Err(e) => {
                    warn!("ignoring unreadable session {}: {}", session_path, e);
                    None
                }
            },
            Err(_) => None,
        };
        debug!(
            "session store at {}, logged in: {}",
            dir_path,
            persisted.is_some()
        );

        Ok(SessionStore {
            dir_path: dir_path.to_owned(),
            persisted: Arc::new(Mutex::new(persisted)),
        })
    }

    pub fn sqlite_path(&self) -> String {
        get_path(&self.dir_path, "sqlite")
    }

    fn session_path(&self) -> String {
        get_path(&self.dir_path, "session")
    }

    pub async fn login(&self) -> Option<matrix::MatrixSession> {
        self.persisted.lock().await.as_ref().map(|s| s.login.clone())
    }

    pub async fn sync_token(&self) -> Option<String> {
        self.persisted
            .lock()
            .await
            .as_ref()
            .and_then(|s| s.sync_token.clone())
    }

    /// Saves a fresh login. The previous sync token is dropped.
    pub async fn save_login(&self, login: &matrix::MatrixSession) -> anyhow::Result<()> {
        let mut persisted = self.persisted.lock().await;
        let session = PersistedSession {
            login: login.clone(),
            sync_token: None,
        };
        self.write(&session).await?;
        *persisted = Some(session);

        trace!("login persisted");
        Ok(())
    }

    /// Saves the position to resume syncing from.
    ///
    /// # Errors
    ///
    /// Fails if there is no saved login or the file can't be written.
    pub async fn save_sync_token(&self, sync_token: String) -> anyhow::Result<()> {
        let mut persisted = self.persisted.lock().await;
        let Some(session) = persisted.as_mut() else {
            anyhow::bail!("no login to attach the sync token to");
        };

        session.sync_token = Some(sync_token);
        self.write(session).await?;

        trace!("sync token persisted");
        Ok(())
    }

    async fn write(&self, session: &PersistedSession) -> anyhow::Result<()> {
        let serialized = serde_json::to_string(session)?;
        fs::write(self.session_path(), serialized).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matrix_sdk::{SessionMeta, SessionTokens};
    use tempfile::TempDir;

    fn login() -> matrix::MatrixSession {
        matrix::MatrixSession {
            meta: SessionMeta {
                user_id: "@pubg:example.com".try_into().unwrap(),
                device_id: "PUBGDEVICE".into(),
            },
            tokens: SessionTokens {
                access_token: "access_token".to_string(),
                refresh_token: None,
            },
        }
    }

    fn dir_path(temp_dir: &TempDir) -> String {
        temp_dir.path().to_string_lossy().to_string()
    }

    #[tokio::test]
    async fn test_open_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(&dir_path(&temp_dir)).await.unwrap();

        assert!(store.login().await.is_none());
        assert!(store.sync_token().await.is_none());
        assert_eq!(
            store.sqlite_path(),
            format!("{}/sqlite", dir_path(&temp_dir))
        );
    }

    #[tokio::test]
    async fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = format!("{}/data/session", dir_path(&temp_dir));

        SessionStore::open(&nested).await.unwrap();

        assert!(fs::metadata(&nested).await.unwrap().is_dir());
    }

    #[tokio::test]
    async fn test_login_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(&dir_path(&temp_dir)).await.unwrap();
        store.save_login(&login()).await.unwrap();
        store.save_sync_token("s72594_4483_1934".to_string()).await.unwrap();

        let reopened = SessionStore::open(&dir_path(&temp_dir)).await.unwrap();
        assert_eq!(
            reopened.login().await.unwrap().meta.user_id.to_string(),
            "@pubg:example.com"
        );
        assert_eq!(
            reopened.sync_token().await,
            Some("s72594_4483_1934".to_string())
        );
    }

    #[tokio::test]
    async fn test_new_login_drops_sync_token() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(&dir_path(&temp_dir)).await.unwrap();
        store.save_login(&login()).await.unwrap();
        store.save_sync_token("old".to_string()).await.unwrap();

        store.save_login(&login()).await.unwrap();

        assert!(store.sync_token().await.is_none());
        let content = fs::read_to_string(store.session_path()).await.unwrap();
        assert!(!content.contains("sync_token"));
    }

    #[tokio::test]
    async fn test_sync_token_requires_login() {
        let temp_dir = TempDir::new().unwrap();
        let store = SessionStore::open(&dir_path(&temp_dir)).await.unwrap();

        assert!(store.save_sync_token("token".to_string()).await.is_err());
        assert!(fs::metadata(store.session_path()).await.is_err());
    }

    #[tokio::test]
    async fn test_unreadable_session_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(format!("{}/session", dir_path(&temp_dir)), "invalid json")
            .await
            .unwrap();

        let store = SessionStore::open(&dir_path(&temp_dir)).await.unwrap();

        assert!(store.login().await.is_none());
    }
}
