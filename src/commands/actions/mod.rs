//! Command action handlers.
//!
//! Individual handler functions for each bot command. Each handler receives a
//! [`CommandContext`](crate::commands::CommandContext) when it needs runtime
//! state and returns a [`CommandResult`](crate::commands::CommandResult).
//!
//! # State Changes
//!
//! Handlers don't modify state directly. Registrations and room defaults are
//! returned in the result, and a fetched comparison is handed over for posting.

mod compare;
mod defaults;
mod help;
mod info;
mod register;
mod unregister;

pub use crate::commands::actions::{
    compare::handle_compare, defaults::handle_defaults, help::handle_help, info::handle_info,
    register::handle_register, unregister::handle_unregister,
};

#[cfg(test)]
pub(crate) mod testing {
    use std::time::Instant;

    use tempfile::TempDir;

    use crate::{
        analytics::testing::RecordingAnalytics,
        commands::{BotStatus, CommandContext},
        compare::FallbackDefaults,
        pubg::{MockStatsApi, SeasonAttributes, SeasonData},
        storage::{RoomDefaultsStore, UserRegistry},
    };

    pub const ROOM_ID: &str = "!room:example.com";
    pub const USER_ID: &str = "@alice:example.com";

    /// Stores in a temporary directory, and the context handlers read them through.
    pub struct ContextFixture {
        _dir: TempDir,
        pub registry: UserRegistry,
        pub room_defaults: RoomDefaultsStore,
        pub analytics: RecordingAnalytics,
        pub fallback: FallbackDefaults,
    }

    impl ContextFixture {
        pub async fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let path = |name: &str| dir.path().join(name).to_str().unwrap().to_string();
            let registry = UserRegistry::open(path("registry")).await;
            let room_defaults = RoomDefaultsStore::open(path("room_defaults")).await;

            ContextFixture {
                _dir: dir,
                registry,
                room_defaults,
                analytics: RecordingAnalytics::default(),
                fallback: FallbackDefaults::default(),
            }
        }

        pub fn context<'a>(
            &'a self,
            api: &'a MockStatsApi,
            is_direct: bool,
        ) -> CommandContext<'a, MockStatsApi> {
            CommandContext {
                room_id: ROOM_ID.to_string(),
                user_id: USER_ID.to_string(),
                is_direct,
                api,
                registry: &self.registry,
                room_defaults: &self.room_defaults,
                analytics: &self.analytics,
                fallback: &self.fallback,
                status: BotStatus {
                    started_at: Instant::now(),
                    joined_rooms: 1,
                },
            }
        }
    }

    pub fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    /// Seasons `2018-01` to `2018-03`, `current` flagged as the current one.
    pub fn seasons(current: &str) -> Vec<SeasonData> {
        ["2018-01", "2018-02", "2018-03"]
            .iter()
            .map(|s| SeasonData {
                id: format!("division.bro.official.{}", s),
                attributes: SeasonAttributes {
                    is_current_season: *s == current,
                    is_offseason: false,
                },
            })
            .collect()
    }
}
