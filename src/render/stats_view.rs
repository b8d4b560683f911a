//! Display values derived from one [`GameModeStats`] record.

use crate::pubg::GameModeStats;

const KILL_POINTS_WEIGHT: f64 = 0.2;

/// Every value printed in a stat block, already formatted.
///
/// Zero denominators never produce an error: ratios and average damage show
/// `0`, percentages show `0%` and a zero rating shows `NA`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedStatsView {
    pub rating: String,
    pub wins: String,
    pub top10s: String,
    pub rounds_played: String,
    pub kd: String,
    pub kda: String,
    pub win_percent: String,
    pub top_ten_percent: String,
    pub average_damage: String,
    pub kills: String,
    pub assists: String,
    pub dbnos: String,
    pub longest_kill: String,
    pub headshot_kills: String,
}

impl DerivedStatsView {
    /// # Panics
    ///
    /// Panics if a floating point field of `stats` is not finite.
    pub fn from_stats(stats: &GameModeStats) -> Self {
        assert!(
            stats.longest_kill.is_finite()
                && stats.damage_dealt.is_finite()
                && stats.win_points.is_finite()
                && stats.kill_points.is_finite(),
            "malformed game mode stats: {:?}",
            stats
        );

        let rounds = f64::from(stats.rounds_played);
        let losses = f64::from(stats.losses);

        DerivedStatsView {
            rating: rating(stats.win_points, stats.kill_points),
            wins: stats.wins.to_string(),
            top10s: stats.top10s.to_string(),
            rounds_played: stats.rounds_played.to_string(),
            kd: rounded_ratio(f64::from(stats.kills), losses),
            kda: rounded_ratio(f64::from(stats.kills) + f64::from(stats.assists), losses),
            win_percent: percent(f64::from(stats.wins), rounds),
            top_ten_percent: percent(f64::from(stats.top10s), rounds),
            average_damage: rounded_ratio(stats.damage_dealt, rounds),
            kills: stats.kills.to_string(),
            assists: stats.assists.to_string(),
            dbnos: stats.dbnos.to_string(),
            longest_kill: format!("{:.2}m", stats.longest_kill),
            headshot_kills: stats.headshot_kills.to_string(),
        }
    }
}

/// Formats a value of player A next to the value of player B: `A (B)`.
pub fn pair(a: &str, b: &str) -> String {
    format!("{} ({})", a, b)
}

fn rating(win_points: f64, kill_points: f64) -> String {
    let rating = (win_points + kill_points * KILL_POINTS_WEIGHT).round();
    if rating == 0.0 {
        "NA".to_owned()
    } else {
        format!("{}", rating as i64)
    }
}

fn rounded_ratio(numerator: f64, denominator: f64) -> String {
    if denominator == 0.0 {
        return "0".to_owned();
    }
    format!("{}", (numerator / denominator).round() as i64)
}

fn percent(numerator: f64, denominator: f64) -> String {
    if denominator == 0.0 {
        return "0%".to_owned();
    }
    format!("{}%", (numerator / denominator * 100.0).round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> GameModeStats {
        GameModeStats {
            wins: 10,
            top10s: 33,
            rounds_played: 100,
            losses: 90,
            kills: 50,
            assists: 25,
            dbnos: 40,
            headshot_kills: 12,
            longest_kill: 312.5,
            damage_dealt: 15_049.0,
            win_points: 1500.0,
            kill_points: 1100.0,
        }
    }

    #[test]
    fn test_derived_values() {
        let view = DerivedStatsView::from_stats(&stats());
        assert_eq!(view.rating, "1720");
        assert_eq!(view.kd, "1");
        assert_eq!(view.kda, "1");
        assert_eq!(view.win_percent, "10%");
        assert_eq!(view.top_ten_percent, "33%");
        assert_eq!(view.average_damage, "150");
        assert_eq!(view.longest_kill, "312.50m");
        assert_eq!(view.dbnos, "40");
    }

    #[test]
    fn test_ratios_round_half_away_from_zero() {
        let mut stats = stats();
        stats.kills = 15;
        stats.assists = 0;
        stats.losses = 10;
        let view = DerivedStatsView::from_stats(&stats);
        assert_eq!(view.kd, "2");
        assert_eq!(view.kda, "2");
    }

    #[test]
    fn test_zero_losses_fallback() {
        let mut stats = stats();
        stats.losses = 0;
        let view = DerivedStatsView::from_stats(&stats);
        assert_eq!(view.kd, "0");
        assert_eq!(view.kda, "0");
    }

    #[test]
    fn test_zero_rounds_fallback() {
        let view = DerivedStatsView::from_stats(&GameModeStats::default());
        assert_eq!(view.rating, "NA");
        assert_eq!(view.kd, "0");
        assert_eq!(view.win_percent, "0%");
        assert_eq!(view.top_ten_percent, "0%");
        assert_eq!(view.average_damage, "0");
        assert_eq!(view.longest_kill, "0.00m");
    }

    #[test]
    #[should_panic(expected = "malformed game mode stats")]
    fn test_non_finite_input_panics() {
        let mut stats = stats();
        stats.damage_dealt = f64::NAN;
        DerivedStatsView::from_stats(&stats);
    }

    #[test]
    fn test_kda_with_maximal_counters() {
        let mut stats = stats();
        stats.kills = u32::MAX;
        stats.assists = u32::MAX;
        stats.losses = u32::MAX;
        let view = DerivedStatsView::from_stats(&stats);
        assert_eq!(view.kd, "1");
        assert_eq!(view.kda, "2");
    }

    #[test]
    fn test_pair() {
        assert_eq!(pair("10%", "10%"), "10% (10%)");
    }
}
