//! Domain types for PUBG regions, game modes and season statistics.
//!
//! Regions and game modes use the catalog encoding of the API enums
//! (`PC_NA`, `SQUAD_FPP`): upper case with `_` separators.

use std::fmt;

use serde::Deserialize;

/// Platform region a player account lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    PcNa,
    PcEu,
    PcAs,
    PcOc,
    PcKakao,
    PcSea,
    PcSa,
    PcKrjp,
    PcJp,
    XboxAs,
    XboxEu,
    XboxNa,
    XboxOc,
    XboxSa,
}

impl Region {
    /// Every region the catalog recognizes.
    pub const ALL: [Region; 14] = [
        Region::PcNa,
        Region::PcEu,
        Region::PcAs,
        Region::PcOc,
        Region::PcKakao,
        Region::PcSea,
        Region::PcSa,
        Region::PcKrjp,
        Region::PcJp,
        Region::XboxAs,
        Region::XboxEu,
        Region::XboxNa,
        Region::XboxOc,
        Region::XboxSa,
    ];

    /// Catalog encoding, e.g. `PC_NA`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::PcNa => "PC_NA",
            Region::PcEu => "PC_EU",
            Region::PcAs => "PC_AS",
            Region::PcOc => "PC_OC",
            Region::PcKakao => "PC_KAKAO",
            Region::PcSea => "PC_SEA",
            Region::PcSa => "PC_SA",
            Region::PcKrjp => "PC_KRJP",
            Region::PcJp => "PC_JP",
            Region::XboxAs => "XBOX_AS",
            Region::XboxEu => "XBOX_EU",
            Region::XboxNa => "XBOX_NA",
            Region::XboxOc => "XBOX_OC",
            Region::XboxSa => "XBOX_SA",
        }
    }

    /// Looks up a region from its normalized catalog encoding.
    pub fn from_catalog(value: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|r| r.as_str() == value)
    }

    /// API path segment for this region, e.g. `pc-na`.
    pub fn shard(&self) -> String {
        self.as_str().to_lowercase().replace('_', "-")
    }

    /// Label printed in the image header, e.g. `PC-NA`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', "-")
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the three squad sizes, each played in first and third person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeFamily {
    Solo,
    Duo,
    Squad,
}

impl ModeFamily {
    /// Human readable name used in block subheadings.
    pub fn label(&self) -> &'static str {
        match self {
            ModeFamily::Solo => "Solo",
            ModeFamily::Duo => "Duo",
            ModeFamily::Squad => "Squad",
        }
    }
}

/// Camera perspective variant of a mode family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Perspective {
    FirstPerson,
    ThirdPerson,
}

/// Game mode as encoded by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Solo,
    SoloFpp,
    Duo,
    DuoFpp,
    Squad,
    SquadFpp,
}

impl GameMode {
    /// Every mode the catalog recognizes.
    pub const ALL: [GameMode; 6] = [
        GameMode::Solo,
        GameMode::SoloFpp,
        GameMode::Duo,
        GameMode::DuoFpp,
        GameMode::Squad,
        GameMode::SquadFpp,
    ];

    /// Catalog encoding, e.g. `SQUAD_FPP`.
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Solo => "SOLO",
            GameMode::SoloFpp => "SOLO_FPP",
            GameMode::Duo => "DUO",
            GameMode::DuoFpp => "DUO_FPP",
            GameMode::Squad => "SQUAD",
            GameMode::SquadFpp => "SQUAD_FPP",
        }
    }

    /// Looks up a mode from its normalized catalog encoding.
    pub fn from_catalog(value: &str) -> Option<GameMode> {
        GameMode::ALL.into_iter().find(|m| m.as_str() == value)
    }

    pub fn family(&self) -> ModeFamily {
        match self {
            GameMode::Solo | GameMode::SoloFpp => ModeFamily::Solo,
            GameMode::Duo | GameMode::DuoFpp => ModeFamily::Duo,
            GameMode::Squad | GameMode::SquadFpp => ModeFamily::Squad,
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A player account resolved from its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    /// Display name, as typed by users
    pub handle: String,
    /// Opaque account id, e.g. `account.0123abcd`
    pub id: String,
}

/// Aggregated statistics of one player in one game mode for a season.
///
/// Field names follow the `gameModeStats` object of the API.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameModeStats {
    pub wins: u32,
    pub top10s: u32,
    pub rounds_played: u32,
    pub losses: u32,
    pub kills: u32,
    pub assists: u32,
    /// Knocked down but not out
    #[serde(rename = "dBNOs")]
    pub dbnos: u32,
    pub headshot_kills: u32,
    /// Longest kill distance in meters
    pub longest_kill: f64,
    pub damage_dealt: f64,
    pub win_points: f64,
    pub kill_points: f64,
}

/// Season statistics of one player, one record per mode variant.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SeasonStats {
    pub solo: GameModeStats,
    #[serde(rename = "solo-fpp")]
    pub solo_fpp: GameModeStats,
    pub duo: GameModeStats,
    #[serde(rename = "duo-fpp")]
    pub duo_fpp: GameModeStats,
    pub squad: GameModeStats,
    #[serde(rename = "squad-fpp")]
    pub squad_fpp: GameModeStats,
}

impl SeasonStats {
    /// Returns the record of a family played in the given perspective.
    pub fn variant(&self, family: ModeFamily, perspective: Perspective) -> &GameModeStats {
        match (family, perspective) {
            (ModeFamily::Solo, Perspective::FirstPerson) => &self.solo_fpp,
            (ModeFamily::Solo, Perspective::ThirdPerson) => &self.solo,
            (ModeFamily::Duo, Perspective::FirstPerson) => &self.duo_fpp,
            (ModeFamily::Duo, Perspective::ThirdPerson) => &self.duo,
            (ModeFamily::Squad, Perspective::FirstPerson) => &self.squad_fpp,
            (ModeFamily::Squad, Perspective::ThirdPerson) => &self.squad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_encodings() {
        assert_eq!(Region::PcNa.as_str(), "PC_NA");
        assert_eq!(Region::PcNa.shard(), "pc-na");
        assert_eq!(Region::XboxEu.label(), "XBOX-EU");
        assert_eq!(Region::from_catalog("PC_KAKAO"), Some(Region::PcKakao));
        assert_eq!(Region::from_catalog("pc_na"), None);
    }

    #[test]
    fn test_every_region_round_trips_through_catalog() {
        for region in Region::ALL {
            assert_eq!(Region::from_catalog(region.as_str()), Some(region));
        }
    }

    #[test]
    fn test_game_mode_family() {
        assert_eq!(GameMode::SoloFpp.family(), ModeFamily::Solo);
        assert_eq!(GameMode::Duo.family(), ModeFamily::Duo);
        assert_eq!(GameMode::SquadFpp.family(), ModeFamily::Squad);
        assert_eq!(GameMode::from_catalog("SQUAD_FPP"), Some(GameMode::SquadFpp));
        assert_eq!(GameMode::from_catalog("TPP"), None);
    }

    #[test]
    fn test_season_stats_variant_lookup() {
        let mut stats = SeasonStats::default();
        stats.duo_fpp.wins = 3;
        stats.duo.wins = 7;

        assert_eq!(
            stats
                .variant(ModeFamily::Duo, Perspective::FirstPerson)
                .wins,
            3
        );
        assert_eq!(
            stats
                .variant(ModeFamily::Duo, Perspective::ThirdPerson)
                .wins,
            7
        );
        assert_eq!(
            stats
                .variant(ModeFamily::Squad, Perspective::ThirdPerson)
                .wins,
            0
        );
    }

    #[test]
    fn test_deserialize_game_mode_stats() {
        let json = r#"{
            "assists": 4, "boosts": 12, "dBNOs": 9, "damageDealt": 1234.5,
            "headshotKills": 3, "heals": 20, "killPoints": 1100.0, "kills": 11,
            "longestKill": 250.75, "losses": 18, "roundsPlayed": 20, "top10s": 6,
            "winPoints": 1500.0, "wins": 2
        }"#;

        let stats: GameModeStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.dbnos, 9);
        assert_eq!(stats.rounds_played, 20);
        assert_eq!(stats.longest_kill, 250.75);
        assert_eq!(stats.kill_points, 1100.0);
    }
}
