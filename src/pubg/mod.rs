//! PUBG stats API integration.
//!
//! This module wraps the public PUBG developer API: player lookup by handle,
//! the season catalog of a shard, and per-player season statistics.
//!
//! # Modules
//!
//! - `requester` - HTTP client for the PUBG API, behind the [`StatsApi`] trait
//! - `response_structs` - JSON:API envelopes returned by the endpoints
//! - `structs` - Regions, game modes and the season statistics themselves
//! - `catalog` - Valid seasons, current season and season labels
//!
//! # Examples
//!
//! ```no_run
//! use pubgbot::pubg::{PubgRequester, StatsApi};
//!
//! # async fn example() {
//! let requester = PubgRequester::new("https://api.pubg.com", "api-key");
//! let seasons = requester.get_seasons("pc-na").await.unwrap();
//! # }
//! ```

mod catalog;
mod requester;
mod response_structs;
mod structs;

pub use crate::pubg::catalog::{SeasonCatalog, full_season_id, season_display_name};
#[cfg(test)]
pub use crate::pubg::requester::MockStatsApi;
pub use crate::pubg::requester::{PubgRequester, StatsApi};
pub use crate::pubg::response_structs::{PlayerAttributes, PlayerData, SeasonAttributes, SeasonData};
pub use crate::pubg::structs::{
    GameMode, GameModeStats, ModeFamily, Perspective, PlayerIdentity, Region, SeasonStats,
};

/// Errors returned by the PUBG API client.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Transport failure, non-success status or undecodable body.
    #[error("pubg api request failed: {0}")]
    Http(#[from] reqwest::Error),
}
