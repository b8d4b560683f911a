use serde_json::{Map, Value, json};

use crate::pubg::{GameMode, Region};

/// A validated comparison between two players.
///
/// Only built by [`ParameterResolver`](crate::compare::ParameterResolver), so
/// both handles are non-empty and distinct and every catalog field is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub player_a: String,
    pub player_b: String,
    /// Short season id, e.g. `2018-03`
    pub season: String,
    pub region: Region,
    pub mode: GameMode,
}

impl ComparisonRequest {
    /// Property bag attached to every analytics event of this comparison.
    pub fn analytics_properties(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        properties.insert("pubg_name_a".to_owned(), json!(self.player_a));
        properties.insert("pubg_name_b".to_owned(), json!(self.player_b));
        properties.insert("season".to_owned(), json!(self.season));
        properties.insert("region".to_owned(), json!(self.region.as_str()));
        properties.insert("mode".to_owned(), json!(self.mode.as_str()));
        properties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_properties() {
        let request = ComparisonRequest {
            player_a: "alice".to_string(),
            player_b: "bob".to_string(),
            season: "2018-03".to_string(),
            region: Region::PcEu,
            mode: GameMode::SquadFpp,
        };

        let properties = request.analytics_properties();
        assert_eq!(properties["pubg_name_a"], "alice");
        assert_eq!(properties["pubg_name_b"], "bob");
        assert_eq!(properties["region"], "PC_EU");
        assert_eq!(properties["mode"], "SQUAD_FPP");
        assert_eq!(properties.len(), 5);
    }
}
