//! Matrix client synchronization and event handling.
//!
//! [`MatrixSync::sync`]:
//! 1. Catches up with an initial sync, so commands sent while the bot was
//!    offline are not replayed
//! 2. Registers handlers for invites, text messages and reactions
//! 3. Syncs forever, persisting the sync token after each response

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error, info, warn};
use matrix_sdk::{
    Client, LoopCtrl, Room, RoomState,
    config::SyncSettings,
    ruma::{
        UserId,
        api::client::filter::FilterDefinition,
        events::{
            reaction::OriginalSyncReactionEvent,
            room::{
                member::StrippedRoomMemberEvent,
                message::{MessageType, OriginalSyncRoomMessageEvent},
            },
        },
    },
};
use tokio::time::{Duration, sleep};

use crate::matrix::session::SessionStore;

/// A text message received in a joined room.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub body: String,
    pub room_id: String,
    pub sender_id: String,
    pub event_id: String,
    /// Whether the room is a direct chat
    pub is_direct: bool,
}

/// A reaction received in a joined room.
#[derive(Debug, Clone)]
pub struct IncomingReaction {
    pub room_id: String,
    pub sender_id: String,
    /// Event the reaction annotates
    pub target_event_id: String,
    pub key: String,
}

/// Drives the sync loop of a logged-in client.
pub struct MatrixSync {
    client: Client,
    store: SessionStore,
}

impl MatrixSync {
    pub fn new(client: &Client, store: &SessionStore) -> Self {
        MatrixSync {
            client: client.to_owned(),
            store: store.to_owned(),
        }
    }

    /// Starts syncing. Only returns if the sync loop fails.
    ///
    /// # Arguments
    ///
    /// * `on_message` - Called for each new text message in a joined room
    /// * `on_reaction` - Called for each new reaction in a joined room
    ///
    /// Events sent by the bot itself are not forwarded.
    pub async fn sync<M, R>(&self, on_message: M, on_reaction: R) -> Result<()>
    where
        M: Fn(IncomingMessage) + Send + Sync + 'static,
        R: Fn(IncomingReaction) + Send + Sync + 'static,
    {
        info!("start syncing");

        self.client.add_event_handler(auto_join_rooms);

        // See <https://spec.matrix.org/v1.6/client-server-api/#lazy-loading-room-members>.
        let filter = FilterDefinition::with_lazy_loading();
        let mut sync_settings = SyncSettings::default().filter(filter.into());

        if let Some(sync_token) = self.store.sync_token().await {
            sync_settings = sync_settings.token(sync_token);
        }

        let mut delay = 2;
        let response = loop {
            match self.client.sync_once(sync_settings.clone()).await {
                Ok(response) => break response,
                Err(e) => {
                    error!("initial sync failed ({e}), retrying in {delay}s");
                    sleep(Duration::from_secs(delay)).await;
                    delay = (delay * 2).min(300);
                }
            }
        };
        if let Err(e) = self.store.save_sync_token(response.next_batch.clone()).await {
            error!("failed to persist sync token: {:?}", e);
        }

        let on_message = Arc::new(on_message);
        self.client.add_event_handler(
            move |event: OriginalSyncRoomMessageEvent, room: Room, client: Client| {
                let on_message = Arc::clone(&on_message);
                async move { on_room_message(event, room, client, &on_message).await }
            },
        );

        let on_reaction = Arc::new(on_reaction);
        self.client.add_event_handler(
            move |event: OriginalSyncReactionEvent, room: Room, client: Client| {
                let on_reaction = Arc::clone(&on_reaction);
                async move { on_room_reaction(event, room, client, &on_reaction) }
            },
        );

        sync_settings = sync_settings.token(response.next_batch);

        self.client
            .sync_with_result_callback(sync_settings, |sync_result| async move {
                let response = sync_result?;

                if let Err(e) = self.store.save_sync_token(response.next_batch).await {
                    error!("failed to persist sync token: {:?}", e);
                }

                Ok(LoopCtrl::Continue)
            })
            .await?;

        Ok(())
    }
}

/// Joins rooms the bot is invited to.
///
/// Joining is retried with a growing delay, see
/// <https://github.com/matrix-org/synapse/issues/4345>.
async fn auto_join_rooms(room_member: StrippedRoomMemberEvent, client: Client, room: Room) {
    let Some(user_id) = client.user_id() else {
        warn!("could not get user id from client");
        return;
    };

    if room_member.state_key != user_id {
        return;
    }

    tokio::spawn(async move {
        info!("auto joining room {}", room.room_id());
        let mut delay = 2;

        while let Err(e) = room.join().await {
            error!(
                "failed to join room {} ({e:?}), retrying in {delay}s",
                room.room_id()
            );

            sleep(Duration::from_secs(delay)).await;
            delay *= 2;

            if delay > 3600 {
                error!("can't join room {} ({e:?})", room.room_id());
                return;
            }
        }
        info!("joined room {}", room.room_id());
    });
}

fn is_own_event(client: &Client, sender: &UserId) -> bool {
    client.user_id() == Some(sender)
}

async fn on_room_message<F>(
    event: OriginalSyncRoomMessageEvent,
    room: Room,
    client: Client,
    on_message: &Arc<F>,
) where
    F: Fn(IncomingMessage) + Send + Sync + 'static,
{
    if room.state() != RoomState::Joined || is_own_event(&client, &event.sender) {
        return;
    }

    let MessageType::Text(text_content) = event.content.msgtype else {
        return;
    };

    let is_direct = match room.is_direct().await {
        Ok(is_direct) => is_direct,
        Err(e) => {
            warn!("failed to know if {} is direct: {:?}", room.room_id(), e);
            false
        }
    };

    on_message(IncomingMessage {
        body: text_content.body,
        room_id: room.room_id().to_string(),
        sender_id: event.sender.to_string(),
        event_id: event.event_id.to_string(),
        is_direct,
    });
}

fn on_room_reaction<F>(
    event: OriginalSyncReactionEvent,
    room: Room,
    client: Client,
    on_reaction: &Arc<F>,
) where
    F: Fn(IncomingReaction) + Send + Sync + 'static,
{
    if room.state() != RoomState::Joined || is_own_event(&client, &event.sender) {
        return;
    }

    let annotation = event.content.relates_to;
    debug!(
        "reaction {} from {} on {}",
        annotation.key, event.sender, annotation.event_id
    );

    on_reaction(IncomingReaction {
        room_id: room.room_id().to_string(),
        sender_id: event.sender.to_string(),
        target_event_id: annotation.event_id.to_string(),
        key: annotation.key,
    });
}
