//! Turns `compare` arguments into a validated [`ComparisonRequest`].
//!
//! Players come from the bare arguments, optionally completed by the caller's
//! registered handle. `season=`, `region=` and `mode=` fall back to the room's
//! stored defaults in group rooms, and to [`FallbackDefaults`] (plus the
//! current season) everywhere else.

use log::{debug, info};
use serde_json::json;

use crate::{
    analytics::Analytics,
    compare::{CompareError, ComparisonRequest},
    pubg::{GameMode, Region, SeasonCatalog, StatsApi},
    storage::{RoomDefaultsStore, UserRegistry},
    utils::{get_param_value, normalize_catalog_token, positional_arguments},
};

/// Region and mode used when no room defaults apply.
#[derive(Debug, Clone)]
pub struct FallbackDefaults {
    pub region: String,
    pub mode: String,
}

impl Default for FallbackDefaults {
    fn default() -> Self {
        FallbackDefaults {
            region: "pc_na".to_owned(),
            mode: "solo_fpp".to_owned(),
        }
    }
}

/// Resolves and validates comparison parameters.
pub struct ParameterResolver<'a, A: StatsApi> {
    api: &'a A,
    registry: &'a UserRegistry,
    room_defaults: &'a RoomDefaultsStore,
    analytics: &'a dyn Analytics,
    fallback: &'a FallbackDefaults,
}

impl<'a, A: StatsApi> ParameterResolver<'a, A> {
    pub fn new(
        api: &'a A,
        registry: &'a UserRegistry,
        room_defaults: &'a RoomDefaultsStore,
        analytics: &'a dyn Analytics,
        fallback: &'a FallbackDefaults,
    ) -> Self {
        ParameterResolver {
            api,
            registry,
            room_defaults,
            analytics,
            fallback,
        }
    }

    /// Resolves the arguments of one `compare` invocation.
    ///
    /// # Arguments
    ///
    /// * `arguments` - Everything after `compare`, e.g. `["john", "jane", "season=2018-03"]`
    /// * `caller_id` - Matrix user id of the requester
    /// * `group_id` - Room id when invoked from a group room, `None` in direct chats
    ///
    /// # Returns
    ///
    /// * `Ok(ComparisonRequest)` - Validated request, an analytics event has been tracked
    /// * `Err(CompareError::MissingPlayers)` - Fewer than two distinct handles
    /// * `Err(CompareError::InvalidParameters)` - Season, region or mode not in the catalog
    /// * `Err(CompareError::Api)` - The catalog could not be read
    pub async fn resolve(
        &self,
        arguments: &[String],
        caller_id: &str,
        group_id: Option<&str>,
    ) -> Result<ComparisonRequest, CompareError> {
        let (player_a, player_b) = self.resolve_players(arguments, caller_id).await?;

        let room_defaults = match group_id {
            Some(room_id) => self.room_defaults.get_defaults(room_id).await,
            None => None,
        };

        let region = get_param_value("region", arguments)
            .or_else(|| room_defaults.as_ref().map(|d| d.region.clone()))
            .unwrap_or_else(|| self.fallback.region.clone());
        let mode = get_param_value("mode", arguments)
            .or_else(|| room_defaults.as_ref().map(|d| d.mode.clone()))
            .unwrap_or_else(|| self.fallback.mode.clone());
        let season = get_param_value("season", arguments)
            .or_else(|| room_defaults.as_ref().map(|d| d.season.clone()));

        let (season, region, mode) =
            validate_parameters(self.api, season.as_deref(), &region, &mode).await?;

        let request = ComparisonRequest {
            player_a,
            player_b,
            season,
            region,
            mode,
        };

        info!("resolved comparison {:?}", request);

        let mut properties = request.analytics_properties();
        properties.insert("distinct_id".to_owned(), json!(caller_id));
        properties.insert("number_parameters".to_owned(), json!(arguments.len()));
        self.analytics.track("compare", properties);

        Ok(request)
    }

    async fn resolve_players(
        &self,
        arguments: &[String],
        caller_id: &str,
    ) -> Result<(String, String), CompareError> {
        let positional = positional_arguments(arguments);

        let (player_a, player_b) = match positional.as_slice() {
            [first, second, ..] => (Some(first.to_string()), second.to_string()),
            [only] => (
                self.registry.get_registered_handle(caller_id).await,
                only.to_string(),
            ),
            [] => return Err(CompareError::MissingPlayers),
        };

        debug!("players a={:?} b={}", player_a, player_b);

        match player_a {
            Some(player_a) if !player_a.is_empty() && player_a != player_b => {
                Ok((player_a, player_b))
            }
            _ => Err(CompareError::MissingPlayers),
        }
    }
}

/// Checks a `(season, region, mode)` triple against the catalog.
///
/// Region and mode are normalized first (`pc-eu` → `PC_EU`). A missing season
/// is replaced by the current season of the region. Used by `compare` and when
/// storing room defaults.
///
/// # Returns
///
/// The season, region and mode to use, or `CompareError::InvalidParameters`
/// naming the first value missing from the catalog.
pub async fn validate_parameters<A: StatsApi>(
    api: &A,
    season: Option<&str>,
    region: &str,
    mode: &str,
) -> Result<(String, Region, GameMode), CompareError> {
    let region = parse_region(region)?;
    let mode = parse_mode(mode)?;

    let catalog = SeasonCatalog::fetch(api, region).await?;
    let season = match season {
        Some(season) => season.to_owned(),
        None => catalog.current.clone().ok_or_else(|| {
            CompareError::InvalidParameters(format!("no current season on {}", region))
        })?,
    };

    if !catalog.contains(&season) {
        return Err(CompareError::InvalidParameters(format!(
            "unknown season `{}` on {}",
            season, region
        )));
    }

    Ok((season, region, mode))
}

fn parse_region(value: &str) -> Result<Region, CompareError> {
    let normalized = normalize_catalog_token(value);
    Region::from_catalog(&normalized)
        .ok_or_else(|| CompareError::InvalidParameters(format!("unknown region `{}`", normalized)))
}

fn parse_mode(value: &str) -> Result<GameMode, CompareError> {
    let normalized = normalize_catalog_token(value);
    GameMode::from_catalog(&normalized)
        .ok_or_else(|| CompareError::InvalidParameters(format!("unknown mode `{}`", normalized)))
}
