//! Chat command parsing and execution.
//!
//! This module turns a `!pubg ...` message into a [`CommandResult`]. Parsing is
//! done by the [`Commander`], which delegates each command to its handler in
//! the `actions` submodule.
//!
//! # Command Flow
//!
//! ```text
//! Message body → Commander::parse → Command
//!                                      │
//!              CommandContext ─────────┤
//!                                      ▼
//!                      Commander::parse_command → CommandResult → Bot
//! ```
//!
//! Handlers never write to the stores themselves. A registration or a new set
//! of room defaults is returned in the [`CommandResult`] and applied by the bot.
//!
//! # Supported Commands
//!
//! - `compare <player_a> [player_b] [season=] [region=] [mode=]`
//! - `register <handle>`
//! - `unregister`
//! - `defaults [season=] [region=] [mode=]`
//! - `info`
//! - `help`

mod actions;
mod command;
mod commander;
mod markdown_response;

use std::time::Instant;

pub use crate::commands::command::Command;
pub use crate::commands::commander::Commander;
use crate::{
    analytics::Analytics,
    compare::{ComparisonRequest, FallbackDefaults},
    pubg::{SeasonStats, StatsApi},
    storage::{RegistryChange, RoomDefaults, RoomDefaultsStore, UserRegistry},
};

/// Everything a handler may read while executing a command.
pub struct CommandContext<'a, A: StatsApi> {
    /// Room where the command was sent
    pub room_id: String,
    /// Matrix user id of the sender
    pub user_id: String,
    /// Whether the room is a direct chat with the bot
    pub is_direct: bool,
    pub api: &'a A,
    pub registry: &'a UserRegistry,
    pub room_defaults: &'a RoomDefaultsStore,
    pub analytics: &'a dyn Analytics,
    pub fallback: &'a FallbackDefaults,
    pub status: BotStatus,
}

/// Runtime figures reported by `info`.
#[derive(Debug, Clone, Copy)]
pub struct BotStatus {
    pub started_at: Instant,
    /// Rooms the bot has joined when the command arrives
    pub joined_rooms: usize,
}

impl<A: StatsApi> CommandContext<'_, A> {
    /// Room id used for room defaults, `None` in direct chats.
    pub fn group_id(&self) -> Option<&str> {
        (!self.is_direct).then_some(self.room_id.as_str())
    }
}

/// Comparison whose statistics are fetched and ready to render.
#[derive(Debug)]
pub struct ComparisonReady {
    pub request: ComparisonRequest,
    pub stats_a: SeasonStats,
    pub stats_b: SeasonStats,
}

/// Outcome of a command.
#[derive(Debug, Default)]
pub struct CommandResult {
    /// Markdown reply to the sender
    pub response: Option<String>,
    /// Change of the sender's registered handle
    pub registration: Option<RegistryChange>,
    /// New defaults of the room
    pub defaults_to_set: Option<RoomDefaults>,
    /// Comparison to post as an image
    pub comparison: Option<ComparisonReady>,
}

impl CommandResult {
    /// A result that only replies.
    pub fn reply(response: String) -> Self {
        CommandResult {
            response: Some(response),
            ..Default::default()
        }
    }
}

/// Reasons a message yields no [`Command`].
#[derive(Debug)]
pub enum CommandParseError {
    /// Not a `!pubg` command, stay silent
    NotForBot,
    /// A `!pubg` command that can't be executed, reply with the message
    InvalidCommand(String),
}
