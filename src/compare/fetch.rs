use futures::join;
use log::{info, warn};

use crate::{
    compare::{CompareError, ComparisonRequest},
    pubg::{PlayerIdentity, SeasonStats, StatsApi, full_season_id},
};

/// Fetches the season statistics of both players of a request.
///
/// Both handles are looked up with a single call. Stats are then fetched
/// concurrently and both fetches are always awaited, so a failure names every
/// handle whose stats are missing.
///
/// # Returns
///
/// * `Ok((stats_a, stats_b))` - Season statistics in request order
/// * `Err(CompareError::PlayerNotFound)` - A handle is unknown on the region, player A reported first
/// * `Err(CompareError::StatsUnavailable)` - One or both stat fetches failed
/// * `Err(CompareError::Api)` - The player lookup itself failed
pub async fn fetch_comparison_stats<A: StatsApi>(
    api: &A,
    request: &ComparisonRequest,
) -> Result<(SeasonStats, SeasonStats), CompareError> {
    let shard = request.region.shard();
    let (player_a, player_b) = lookup_players(api, request, &shard).await?;

    let season_id = full_season_id(&request.season);
    let (stats_a, stats_b) = join!(
        api.get_season_stats(&shard, &player_a.id, &season_id),
        api.get_season_stats(&shard, &player_b.id, &season_id)
    );

    match (stats_a, stats_b) {
        (Ok(stats_a), Ok(stats_b)) => {
            info!(
                "fetched {} stats of {} and {}",
                request.season, player_a.handle, player_b.handle
            );
            Ok((stats_a, stats_b))
        }
        (stats_a, stats_b) => {
            let mut handles = Vec::new();
            for (player, result) in [(&player_a, stats_a), (&player_b, stats_b)] {
                if let Err(e) = result {
                    warn!("no {} stats for {}: {}", request.season, player.handle, e);
                    handles.push(player.handle.clone());
                }
            }
            Err(CompareError::StatsUnavailable {
                handles,
                season: request.season.clone(),
            })
        }
    }
}

async fn lookup_players<A: StatsApi>(
    api: &A,
    request: &ComparisonRequest,
    shard: &str,
) -> Result<(PlayerIdentity, PlayerIdentity), CompareError> {
    let names = [request.player_a.clone(), request.player_b.clone()];
    let players = api.get_players(shard, &names).await?;

    let find = |handle: &str| {
        players
            .iter()
            .find(|player| player.attributes.name == handle)
            .map(|player| PlayerIdentity {
                handle: handle.to_owned(),
                id: player.id.clone(),
            })
            .ok_or_else(|| CompareError::PlayerNotFound {
                handle: handle.to_owned(),
                region: request.region,
            })
    };

    let player_a = find(&request.player_a)?;
    let player_b = find(&request.player_b)?;

    Ok((player_a, player_b))
}
