//! Reaction-driven mode switching on a posted comparison.
//!
//! After a comparison image is posted, the bot reacts with three keycap
//! shortcuts. When the original requester clicks one, the image is rendered
//! again for that mode family from the cached statistics, the previous
//! message is deleted and the new one gets fresh shortcuts. Fifteen idle
//! seconds end the session and clear the shortcuts.
//!
//! - [`SelectionRouter`] forwards reactions of requesters to their session
//! - [`ModeSwitchSession`] is the Displayed/Switching/Terminated state machine
//! - [`Presenter`] is the chat side of the session, implemented by the Matrix client

mod router;
mod selection;
mod session;

use mockall::automock;

pub use crate::interaction::router::{Selection, SelectionRouter};
pub use crate::interaction::selection::{SHORTCUTS, click_number, family_for_key};
pub use crate::interaction::session::{
    CachedComparison, FamilyRenderer, IDLE_TIMEOUT, ModeSwitchSession, SessionOrigin, SessionState,
};

/// Chat operations a mode-switch session needs.
#[automock]
pub trait Presenter {
    /// Posts a PNG image in a room. Returns the event id of the new message.
    async fn send_image(&self, room_id: &str, png: Vec<u8>) -> anyhow::Result<String>;
    /// Reacts to a message. Returns the event id of the reaction.
    async fn react(&self, room_id: &str, event_id: &str, key: &str) -> anyhow::Result<String>;
    /// Deletes a message or a reaction.
    async fn redact(&self, room_id: &str, event_id: &str) -> anyhow::Result<()>;
}
