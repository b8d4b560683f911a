//! HTTP client for the PUBG developer API.
//!
//! This module provides the [`PubgRequester`] struct and the [`StatsApi`]
//! trait it implements. Every request carries the API key as a bearer token
//! and asks for the JSON:API media type.

use log::{debug, info};
use mockall::automock;
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::pubg::{
    StatsError,
    response_structs::{Document, PlayerData, PlayerSeasonData, SeasonData},
    structs::SeasonStats,
};

const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// HTTP client for requesting data from the PUBG API.
///
/// # Examples
///
/// ```no_run
/// let requester = PubgRequester::new("https://api.pubg.com", "api-key");
/// let players = requester.get_players("pc-na", &["shroud".to_string()]).await.unwrap();
/// ```
pub struct PubgRequester {
    /// Base url, `https://api.pubg.com` in production
    url: String,
    /// Developer API key
    api_key: String,
    /// HTTP client
    client: Client,
}

/// Trait for reading the PUBG stats catalog.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait StatsApi {
    /// Lists every season known to a shard.
    async fn get_seasons(&self, shard: &str) -> Result<Vec<SeasonData>, StatsError>;
    /// Looks up players by handle. Handles that don't exist are absent from the result.
    async fn get_players(&self, shard: &str, names: &[String])
    -> Result<Vec<PlayerData>, StatsError>;
    /// Fetches the season statistics of one player.
    async fn get_season_stats(
        &self,
        shard: &str,
        player_id: &str,
        season_id: &str,
    ) -> Result<SeasonStats, StatsError>;
}

impl PubgRequester {
    /// Create a new [PubgRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the PUBG API.
    /// * `api_key` - The developer API key.
    pub fn new(url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::new();
        PubgRequester {
            url: url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(format!("{}{}", &self.url, path))
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, JSON_API_MEDIA_TYPE)
    }
}

impl StatsApi for PubgRequester {
    /// Request `/shards/{shard}/seasons`.
    ///
    /// ```json
    /// { "data": [ { "id": "division.bro.official.2018-03",
    ///               "attributes": { "isCurrentSeason": true, "isOffseason": false } } ] }
    /// ```
    async fn get_seasons(&self, shard: &str) -> Result<Vec<SeasonData>, StatsError> {
        let path = format!("/shards/{}/seasons", shard);
        info!("request seasons of {}", shard);

        let document: Document<Vec<SeasonData>> = self
            .get(&path)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {} seasons", &path, document.data.len());

        Ok(document.data)
    }

    /// Request `/shards/{shard}/players?filter[playerNames]=a,b`.
    ///
    /// The API answers 404 when none of the handles exist, which is reported
    /// here as an empty list.
    async fn get_players(
        &self,
        shard: &str,
        names: &[String],
    ) -> Result<Vec<PlayerData>, StatsError> {
        let path = format!("/shards/{}/players", shard);
        info!("request players {:?} on {}", names, shard);

        let response = self
            .get(&path)
            .query(&[("filter[playerNames]", names.join(","))])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("no player found for {:?}", names);
            return Ok(Vec::new());
        }

        let document: Document<Vec<PlayerData>> = response.error_for_status()?.json().await?;

        debug!("response from {} -> {:?}", &path, &document.data);

        Ok(document.data)
    }

    /// Request `/shards/{shard}/players/{player_id}/seasons/{season_id}` and
    /// unwraps its `gameModeStats` member.
    async fn get_season_stats(
        &self,
        shard: &str,
        player_id: &str,
        season_id: &str,
    ) -> Result<SeasonStats, StatsError> {
        let path = format!("/shards/{}/players/{}/seasons/{}", shard, player_id, season_id);
        info!("request {} stats of player {}", season_id, player_id);

        let document: Document<PlayerSeasonData> = self
            .get(&path)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("response from {} -> {:?}", &path, &document.data);

        Ok(document.data.attributes.game_mode_stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode_stats_json(wins: u32, rounds: u32) -> String {
        format!(
            r#"{{"assists": 1, "dBNOs": 2, "damageDealt": 300.0, "headshotKills": 1,
                "killPoints": 1000.0, "kills": 4, "longestKill": 120.5, "losses": {},
                "roundsPlayed": {}, "top10s": 3, "winPoints": 1200.0, "wins": {}}}"#,
            rounds - wins,
            rounds,
            wins
        )
    }

    #[tokio::test]
    async fn test_get_seasons() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = r#"{"data": [
            {"type": "season", "id": "division.bro.official.2018-01", "attributes": {"isCurrentSeason": false, "isOffseason": false}},
            {"type": "season", "id": "division.bro.official.2018-02", "attributes": {"isCurrentSeason": true, "isOffseason": false}}
        ]}"#;

        server
            .mock("GET", "/shards/pc-na/seasons")
            .match_header("authorization", "Bearer secret")
            .match_header("accept", JSON_API_MEDIA_TYPE)
            .with_status(200)
            .with_header("content-type", JSON_API_MEDIA_TYPE)
            .with_body(body)
            .create_async()
            .await;

        let requester = PubgRequester::new(&url, "secret");
        let seasons = requester.get_seasons("pc-na").await.unwrap();
        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].id, "division.bro.official.2018-01");
        assert!(seasons[1].attributes.is_current_season);
    }

    #[tokio::test]
    async fn test_get_players() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = r#"{"data": [
            {"type": "player", "id": "account.a", "attributes": {"name": "john", "shardId": "pc-eu"}},
            {"type": "player", "id": "account.b", "attributes": {"name": "jane", "shardId": "pc-eu"}}
        ]}"#;

        server
            .mock("GET", "/shards/pc-eu/players")
            .match_query(mockito::Matcher::UrlEncoded(
                "filter[playerNames]".to_owned(),
                "john,jane".to_owned(),
            ))
            .with_status(200)
            .with_header("content-type", JSON_API_MEDIA_TYPE)
            .with_body(body)
            .create_async()
            .await;

        let requester = PubgRequester::new(&url, "secret");
        let players = requester
            .get_players("pc-eu", &["john".to_string(), "jane".to_string()])
            .await
            .unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].id, "account.a");
        assert_eq!(players[1].attributes.name, "jane");
    }

    #[tokio::test]
    async fn test_get_players_not_found_is_empty() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/shards/pc-na/players")
            .match_query(mockito::Matcher::Any)
            .with_status(404)
            .with_body(r#"{"errors": [{"title": "Not Found"}]}"#)
            .create_async()
            .await;

        let requester = PubgRequester::new(&url, "secret");
        let players = requester
            .get_players("pc-na", &["nobody".to_string()])
            .await
            .unwrap();
        assert!(players.is_empty());
    }

    #[tokio::test]
    async fn test_get_season_stats() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = format!(
            r#"{{"data": {{"type": "playerSeason", "attributes": {{"gameModeStats": {{
                "solo": {}, "solo-fpp": {}, "duo": {}, "duo-fpp": {}, "squad": {}, "squad-fpp": {}
            }}}}}}}}"#,
            mode_stats_json(1, 10),
            mode_stats_json(2, 20),
            mode_stats_json(3, 30),
            mode_stats_json(4, 40),
            mode_stats_json(5, 50),
            mode_stats_json(6, 60),
        );

        server
            .mock(
                "GET",
                "/shards/pc-na/players/account.a/seasons/division.bro.official.2018-03",
            )
            .with_status(200)
            .with_header("content-type", JSON_API_MEDIA_TYPE)
            .with_body(body)
            .create_async()
            .await;

        let requester = PubgRequester::new(&url, "secret");
        let stats = requester
            .get_season_stats("pc-na", "account.a", "division.bro.official.2018-03")
            .await
            .unwrap();
        assert_eq!(stats.solo.wins, 1);
        assert_eq!(stats.duo_fpp.rounds_played, 40);
        assert_eq!(stats.squad_fpp.wins, 6);
        assert_eq!(stats.squad.longest_kill, 120.5);
    }

    #[tokio::test]
    async fn test_get_season_stats_server_error() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/shards/pc-na/players/account.a/seasons/s1")
            .with_status(500)
            .create_async()
            .await;

        let requester = PubgRequester::new(&url, "secret");
        let result = requester.get_season_stats("pc-na", "account.a", "s1").await;
        assert!(matches!(result, Err(StatsError::Http(_))));
    }
}
