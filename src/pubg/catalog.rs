//! Remote season catalog.
//!
//! Regions and modes are fixed enums (see [`Region::ALL`] and
//! [`GameMode::ALL`](crate::pubg::GameMode::ALL)); seasons change over time
//! and are listed by the API per shard. Users type the short season form
//! (`2018-03`) which maps to the full id `division.bro.official.2018-03`.

use log::debug;

use crate::pubg::{StatsApi, StatsError, structs::Region};

const SEASON_ID_PREFIX: &str = "division.bro.official.";

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Converts a short season id to the id used by the API.
pub fn full_season_id(season: &str) -> String {
    format!("{}{}", SEASON_ID_PREFIX, season)
}

fn short_season_id(season_id: &str) -> &str {
    season_id.strip_prefix(SEASON_ID_PREFIX).unwrap_or(season_id)
}

/// Seasons listed on one shard, fetched once per lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonCatalog {
    /// Short ids of every listed season
    pub seasons: Vec<String>,
    /// Short id of the season flagged as current, if any
    pub current: Option<String>,
}

impl SeasonCatalog {
    /// Reads the seasons of the region's shard with a single request.
    pub async fn fetch<A: StatsApi>(api: &A, region: Region) -> Result<Self, StatsError> {
        let seasons = api.get_seasons(&region.shard()).await?;

        let current = seasons
            .iter()
            .find(|season| season.attributes.is_current_season)
            .map(|season| short_season_id(&season.id).to_owned());
        let seasons: Vec<String> = seasons
            .iter()
            .map(|season| short_season_id(&season.id).to_owned())
            .collect();

        debug!("seasons on {}: {:?}, current {:?}", region, seasons, current);

        Ok(SeasonCatalog { seasons, current })
    }

    pub fn contains(&self, season: &str) -> bool {
        self.seasons.iter().any(|s| s == season)
    }
}

/// Human readable label of a short season id, printed in the image header.
///
/// - `2018-03` → `Mar 2018`
/// - `pc-2018-05` → `Season 5`
/// - `console-02` → `Season 2`
///
/// Unknown shapes are returned unchanged.
pub fn season_display_name(season: &str) -> String {
    if let Some(number) = season
        .strip_prefix("pc-2018-")
        .or_else(|| season.strip_prefix("console-"))
        && let Ok(number) = number.parse::<u32>()
    {
        return format!("Season {}", number);
    }

    if let Some((year, month)) = season.split_once('-')
        && year.len() == 4
        && year.chars().all(|c| c.is_ascii_digit())
        && let Ok(month) = month.parse::<usize>()
        && (1..=12).contains(&month)
    {
        return format!("{} {}", MONTHS[month - 1], year);
    }

    season.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubg::{MockStatsApi, SeasonAttributes, SeasonData};

    fn season(id: &str, current: bool) -> SeasonData {
        SeasonData {
            id: id.to_owned(),
            attributes: SeasonAttributes {
                is_current_season: current,
                is_offseason: false,
            },
        }
    }

    #[test]
    fn test_full_season_id() {
        assert_eq!(full_season_id("2018-03"), "division.bro.official.2018-03");
    }

    #[test]
    fn test_season_display_name() {
        assert_eq!(season_display_name("2018-03"), "Mar 2018");
        assert_eq!(season_display_name("2017-12"), "Dec 2017");
        assert_eq!(season_display_name("pc-2018-05"), "Season 5");
        assert_eq!(season_display_name("console-02"), "Season 2");
        assert_eq!(season_display_name("2018-13"), "2018-13");
        assert_eq!(season_display_name("beta"), "beta");
    }

    #[tokio::test]
    async fn test_fetch_catalog_strips_prefix() {
        let mut mock_api = MockStatsApi::new();
        mock_api
            .expect_get_seasons()
            .with(mockall::predicate::eq("pc-eu"))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    season("division.bro.official.2018-01", false),
                    season("division.bro.official.2018-02", true),
                    season("division.bro.official.2018-03", false),
                ])
            });

        let catalog = SeasonCatalog::fetch(&mock_api, Region::PcEu).await.unwrap();
        assert_eq!(
            catalog.seasons,
            vec!["2018-01".to_string(), "2018-02".to_string(), "2018-03".to_string()]
        );
        assert_eq!(catalog.current, Some("2018-02".to_string()));
        assert!(catalog.contains("2018-03"));
        assert!(!catalog.contains("2017-12"));
    }

    #[tokio::test]
    async fn test_fetch_catalog_none_flagged() {
        let mut mock_api = MockStatsApi::new();
        mock_api
            .expect_get_seasons()
            .times(1)
            .returning(|_| Ok(vec![season("division.bro.official.2018-01", false)]));

        let catalog = SeasonCatalog::fetch(&mock_api, Region::PcNa).await.unwrap();
        assert_eq!(catalog.current, None);
    }
}
