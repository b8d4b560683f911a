//! The `compare` pipeline: resolve the request, fetch both players, report failures.
//!
//! ```text
//! raw arguments ─► ParameterResolver ─► ComparisonRequest
//!                                            │
//!                     fetch_comparison_stats ◄┘ (one lookup, two concurrent stat fetches)
//!                                            │
//!                                            ▼
//!                                 (SeasonStats, SeasonStats) ─► render
//! ```

mod fetch;
mod request;
mod resolver;

use thiserror::Error;

pub use crate::compare::fetch::fetch_comparison_stats;
pub use crate::compare::request::ComparisonRequest;
pub use crate::compare::resolver::{FallbackDefaults, ParameterResolver, validate_parameters};
use crate::pubg::{Region, StatsError};

/// Everything that stops a comparison before an image is rendered.
#[derive(Debug, Error)]
pub enum CompareError {
    /// Fewer than two distinct handles could be determined
    #[error("two different players are required")]
    MissingPlayers,
    /// Season, region or mode is not part of the catalog
    #[error("invalid parameter: {0}")]
    InvalidParameters(String),
    /// The lookup didn't return the handle
    #[error("player {handle} not found on {region}")]
    PlayerNotFound { handle: String, region: Region },
    /// Season statistics could not be fetched for these handles
    #[error("no {season} stats for {handles:?}")]
    StatsUnavailable { handles: Vec<String>, season: String },
    #[error(transparent)]
    Api(#[from] StatsError),
}
