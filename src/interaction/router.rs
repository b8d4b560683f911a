//! Routes reactions on posted comparisons to their sessions.

use std::collections::HashMap;

use log::debug;
use tokio::sync::{Mutex, mpsc};

use crate::{interaction::family_for_key, pubg::ModeFamily};

/// A shortcut clicked by the requester on one of their comparison messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Event id of the message the reaction targets
    pub message_id: String,
    pub family: ModeFamily,
}

struct Route {
    requester: String,
    sender: mpsc::Sender<Selection>,
}

/// Message id → session routing table.
///
/// Reactions from anyone but the requester are dropped here and never reach
/// the session. A session holds at most one pending selection.
#[derive(Default)]
pub struct SelectionRouter {
    routes: Mutex<HashMap<String, Route>>,
}

impl SelectionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn register(
        &self,
        message_id: &str,
        requester: &str,
        sender: mpsc::Sender<Selection>,
    ) {
        debug!("route reactions on {} from {}", message_id, requester);
        self.routes.lock().await.insert(
            message_id.to_owned(),
            Route {
                requester: requester.to_owned(),
                sender,
            },
        );
    }

    pub async fn remove(&self, message_id: &str) {
        self.routes.lock().await.remove(message_id);
    }

    /// Forwards a reaction to the session owning `message_id`.
    ///
    /// Returns `true` if a selection was queued.
    pub async fn dispatch(&self, message_id: &str, sender_id: &str, key: &str) -> bool {
        let routes = self.routes.lock().await;
        let Some(route) = routes.get(message_id) else {
            return false;
        };

        if route.requester != sender_id {
            debug!("ignore reaction of {} on {}", sender_id, message_id);
            return false;
        }

        let Some(family) = family_for_key(key) else {
            return false;
        };

        let selection = Selection {
            message_id: message_id.to_owned(),
            family,
        };

        // A full channel means a selection is already pending
        route.sender.try_send(selection).is_ok()
    }
}
