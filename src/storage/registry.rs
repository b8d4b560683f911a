//! Chat user → PUBG handle registrations.

use log::info;

use crate::storage::JsonStore;

/// A change of a user's registration requested by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryChange {
    Register(String),
    Unregister,
}

/// Remembers which PUBG handle a chat user plays as, so `compare` can be
/// called with a single handle.
pub struct UserRegistry {
    store: JsonStore<String>,
}

impl UserRegistry {
    pub async fn open(path: String) -> Self {
        UserRegistry {
            store: JsonStore::open(path).await,
        }
    }

    pub async fn get_registered_handle(&self, user_id: &str) -> Option<String> {
        self.store.get(user_id).await
    }

    pub async fn register(&self, user_id: &str, handle: &str) {
        self.store.insert(user_id, handle.to_owned()).await;
    }

    /// Returns the handle that was registered, if any.
    pub async fn unregister(&self, user_id: &str) -> Option<String> {
        self.store.remove(user_id).await
    }

    pub async fn apply(&self, user_id: &str, change: RegistryChange) {
        match change {
            RegistryChange::Register(handle) => {
                info!("register {} as {}", user_id, handle);
                self.register(user_id, &handle).await;
            }
            RegistryChange::Unregister => {
                info!("unregister {}", user_id);
                self.unregister(user_id).await;
            }
        }
    }
}
