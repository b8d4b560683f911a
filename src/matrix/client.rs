//! Matrix client wrapper for bot messaging and synchronization.
//!
//! [`MatrixClient`] wraps the Matrix SDK client. It replies to commands and,
//! as a [`Presenter`], posts comparison images, reacts to them and redacts
//! them for mode-switch sessions.

use log::{error, info, warn};
use matrix_sdk::{
    Client, Room,
    attachment::AttachmentConfig,
    ruma::{
        EventId, RoomId, UserId,
        events::{
            reaction::ReactionEventContent,
            relation::Annotation,
            room::message::{AddMentions, ForwardThread, ReplyMetadata, RoomMessageEventContent},
        },
    },
};

use crate::{
    interaction::Presenter,
    matrix::{
        IncomingMessage, IncomingReaction, UserCredentials, login::connect, session::SessionStore,
        sync::MatrixSync,
    },
};

const DISPLAY_NAME: &str = "PUBG Bot";
const IMAGE_NAME: &str = "comparison.png";

/// High-level Matrix client for bot messaging operations.
pub struct MatrixClient {
    matrix_sync: MatrixSync,
    client: Client,
}

impl MatrixClient {
    /// Logs in (or restores the saved session) and prepares syncing.
    ///
    /// # Arguments
    ///
    /// * `user_credentials` - Account of the bot
    /// * `session_path` - Directory for the saved session and SDK state store
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory is unusable or the login fails.
    pub async fn new(
        user_credentials: &UserCredentials,
        session_path: &str,
    ) -> Result<Self, anyhow::Error> {
        let store = SessionStore::open(session_path).await?;
        let client = connect(user_credentials, &store).await?;

        if let Err(e) = client.account().set_display_name(Some(DISPLAY_NAME)).await {
            warn!("failed to set display name: {:?}", e);
        }

        let matrix_sync = MatrixSync::new(&client, &store);

        Ok(MatrixClient {
            matrix_sync,
            client,
        })
    }

    /// Runs the sync loop, see [`MatrixSync::sync`].
    pub async fn sync<M, R>(&self, on_message: M, on_reaction: R) -> Result<(), anyhow::Error>
    where
        M: Fn(IncomingMessage) + Send + Sync + 'static,
        R: Fn(IncomingReaction) + Send + Sync + 'static,
    {
        match self.matrix_sync.sync(on_message, on_reaction).await {
            Ok(_) => info!("matrix sync ended successfully"),
            Err(e) => error!("matrix sync ended with error: {:?}", e),
        }

        Ok(())
    }

    /// Number of rooms the bot has joined.
    pub fn joined_room_count(&self) -> usize {
        self.client.joined_rooms().len()
    }

    /// Replies to a message with a Markdown body. Failures are logged.
    ///
    /// # Arguments
    ///
    /// * `room_id` - Room of the original message
    /// * `sender_id` - Sender of the original message
    /// * `event_id` - Event id of the original message
    /// * `body` - Markdown reply
    pub async fn send_reply(&self, room_id: &str, sender_id: &str, event_id: &str, body: &str) {
        if let Err(e) = self.try_send_reply(room_id, sender_id, event_id, body).await {
            error!("failed to reply in {}: {:?}", room_id, e);
        }
    }

    async fn try_send_reply(
        &self,
        room_id: &str,
        sender_id: &str,
        event_id: &str,
        body: &str,
    ) -> anyhow::Result<()> {
        let sender = UserId::parse(sender_id)?;
        let event = EventId::parse(event_id)?;

        let content = RoomMessageEventContent::text_markdown(body).make_reply_to(
            ReplyMetadata::new(&event, &sender, None),
            ForwardThread::No,
            AddMentions::No,
        );

        self.room(room_id)?.send(content).await?;
        Ok(())
    }

    fn room(&self, room_id: &str) -> anyhow::Result<Room> {
        let room_id = RoomId::parse(room_id)?;
        self.client
            .get_room(&room_id)
            .ok_or_else(|| anyhow::anyhow!("unknown room {}", room_id))
    }
}

impl Presenter for MatrixClient {
    async fn send_image(&self, room_id: &str, png: Vec<u8>) -> anyhow::Result<String> {
        let room = self.room(room_id)?;
        let result = room
            .send_attachment(IMAGE_NAME, &mime::IMAGE_PNG, png, AttachmentConfig::new())
            .await?;

        Ok(result.event_id.to_string())
    }

    async fn react(&self, room_id: &str, event_id: &str, key: &str) -> anyhow::Result<String> {
        let room = self.room(room_id)?;
        let event_id = EventId::parse(event_id)?;
        let content = ReactionEventContent::new(Annotation::new(event_id, key.to_owned()));

        let result = room.send(content).await?;
        Ok(result.event_id.to_string())
    }

    async fn redact(&self, room_id: &str, event_id: &str) -> anyhow::Result<()> {
        let room = self.room(room_id)?;
        let event_id = EventId::parse(event_id)?;

        room.redact(&event_id, None, None).await?;
        Ok(())
    }
}
