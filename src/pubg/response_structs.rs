//! Response structures for PUBG API endpoints.
//!
//! The API speaks JSON:API, so every payload is wrapped in a `data` member.
//! These structures only keep the members the bot reads.

use serde::Deserialize;
use std::fmt;

use crate::pubg::structs::SeasonStats;

/// Top level JSON:API document.
#[derive(Deserialize, Debug)]
pub struct Document<T> {
    pub data: T,
}

/// Player resource from `/shards/{shard}/players`.
#[derive(Deserialize, Debug, Clone)]
pub struct PlayerData {
    /// Account id, e.g. `account.0123abcd`
    pub id: String,
    pub attributes: PlayerAttributes,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PlayerAttributes {
    /// Player handle
    pub name: String,
}

impl fmt::Display for PlayerData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "id={}, name={}", self.id, self.attributes.name)
    }
}

/// Season resource from `/shards/{shard}/seasons`.
#[derive(Deserialize, Debug, Clone)]
pub struct SeasonData {
    /// Full season id, e.g. `division.bro.official.2018-03`
    pub id: String,
    pub attributes: SeasonAttributes,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SeasonAttributes {
    pub is_current_season: bool,
    pub is_offseason: bool,
}

impl fmt::Display for SeasonData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, current={}",
            self.id, self.attributes.is_current_season
        )
    }
}

/// Player season resource from `/shards/{shard}/players/{id}/seasons/{season}`.
#[derive(Deserialize, Debug)]
pub struct PlayerSeasonData {
    pub attributes: PlayerSeasonAttributes,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSeasonAttributes {
    pub game_mode_stats: SeasonStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_data_display() {
        let player = PlayerData {
            id: "account.abc".to_string(),
            attributes: PlayerAttributes {
                name: "shroud".to_string(),
            },
        };

        assert_eq!(format!("{}", player), "id=account.abc, name=shroud");
    }

    #[test]
    fn test_deserialize_seasons_document() {
        let json = r#"{
            "data": [
                {"type": "season", "id": "division.bro.official.2018-01",
                 "attributes": {"isCurrentSeason": false, "isOffseason": false}},
                {"type": "season", "id": "division.bro.official.2018-02",
                 "attributes": {"isCurrentSeason": true, "isOffseason": false}}
            ],
            "links": {"self": "https://api.pubg.com/shards/pc-na/seasons"},
            "meta": {}
        }"#;

        let document: Document<Vec<SeasonData>> = serde_json::from_str(json).unwrap();
        assert_eq!(document.data.len(), 2);
        assert!(document.data[1].attributes.is_current_season);
        assert_eq!(
            format!("{}", document.data[1]),
            "id=division.bro.official.2018-02, current=true"
        );
    }
}
