//! Markdown response formatters for bot commands.
//!
//! Every text the bot replies with is built here, so wording stays consistent
//! across handlers.

use std::time::Duration;

use crate::{compare::CompareError, pubg::season_display_name, storage::RoomDefaults};

pub fn format_help() -> String {
    let body = "Commands:\n\
        - `compare <player_a> [player_b] [season=] [region=] [mode=]`: compare the season stats of two players\n\
        - `register <handle>`: remember your PUBG handle, `compare` then only needs the other player\n\
        - `unregister`: forget your PUBG handle\n\
        - `defaults [season=] [region=] [mode=]`: set the defaults of this room\n\
        - `info`: show details about the bot\n\
        - `help`: show this help message\n\n\
        Regions look like `pc-na` or `xbox-eu`, modes like `squad-fpp`, seasons like `2018-03`.\n\
        React with 1️⃣, 2️⃣ or 4️⃣ on a comparison within 15 seconds to switch to solo, duo or squad.";

    body.to_owned()
}

pub fn format_unknown_command() -> String {
    "Unknown command. Type `!pubg help` for more information.".to_owned()
}

pub fn format_invalid_compare() -> String {
    "Invalid compare command. Usage: `!pubg compare <player_a> [player_b] [season=] [region=] [mode=]`"
        .to_owned()
}

pub fn format_invalid_register() -> String {
    "Invalid register command. Usage: `!pubg register <handle>`".to_owned()
}

pub fn format_compare_error(error: &CompareError) -> String {
    match error {
        CompareError::MissingPlayers => "Two different players are required. \
            Use `!pubg compare <player_a> <player_b>`, or `!pubg register <handle>` \
            once and then `!pubg compare <player>`."
            .to_owned(),
        CompareError::InvalidParameters(detail) => format!(
            "Invalid parameters: {}. Type `!pubg help` for the accepted values.",
            detail
        ),
        CompareError::PlayerNotFound { handle, region } => format!(
            "Could not find `{}` on `{}`. Double check the username and region.",
            handle, region
        ),
        CompareError::StatsUnavailable { handles, season } => {
            let handles = handles
                .iter()
                .map(|handle| format!("`{}`", handle))
                .collect::<Vec<String>>()
                .join(" and ");
            format!("Could not find the `{}` stats of {}.", season, handles)
        }
        CompareError::Api(_) => "The PUBG API is unavailable, try again later.".to_owned(),
    }
}

pub fn format_successful_register(handle: &str) -> String {
    format!("You are now registered as `{}`.", handle)
}

pub fn format_successful_unregister(handle: &str) -> String {
    format!("`{}` is no longer registered to you.", handle)
}

pub fn format_not_registered() -> String {
    "You have no registered handle.".to_owned()
}

pub fn format_defaults_in_direct_chat() -> String {
    "Defaults can only be set in a group room.".to_owned()
}

pub fn format_defaults_set(defaults: &RoomDefaults) -> String {
    format!(
        "Room defaults set: season `{}` ({}), region `{}`, mode `{}`.",
        defaults.season,
        season_display_name(&defaults.season),
        defaults.region,
        defaults.mode
    )
}

pub fn format_info(uptime: Duration, memory_kb: Option<u64>, joined_rooms: usize) -> String {
    let total_seconds = uptime.as_secs();
    let memory = match memory_kb {
        Some(kb) => format!("{:.2} MB", kb as f64 / 1024.0),
        None => "unknown".to_owned(),
    };

    format!(
        "**pubgbot** {}\n\n\
        - Uptime: {} hours, {} minutes, and {} seconds\n\
        - Memory usage: {}\n\
        - Rooms: {}",
        env!("CARGO_PKG_VERSION"),
        total_seconds / 3600,
        total_seconds % 3600 / 60,
        total_seconds % 60,
        memory,
        joined_rooms
    )
}

pub fn format_post_failed() -> String {
    "The comparison image could not be posted.".to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pubg::Region;

    #[test]
    fn test_format_help() {
        let help = format_help();
        assert!(help.contains("Commands:"));
        assert!(help.contains("compare"));
        assert!(help.contains("register"));
        assert!(help.contains("unregister"));
        assert!(help.contains("defaults"));
        assert!(help.contains("info"));
        assert!(help.contains("help"));
    }

    #[test]
    fn test_format_unknown_command() {
        assert_eq!(
            format_unknown_command(),
            "Unknown command. Type `!pubg help` for more information.",
        );
    }

    #[test]
    fn test_format_player_not_found() {
        let error = CompareError::PlayerNotFound {
            handle: "jane".to_owned(),
            region: Region::PcEu,
        };
        assert_eq!(
            format_compare_error(&error),
            "Could not find `jane` on `PC_EU`. Double check the username and region."
        );
    }

    #[test]
    fn test_format_stats_unavailable_names_every_handle() {
        let error = CompareError::StatsUnavailable {
            handles: vec!["john".to_owned(), "jane".to_owned()],
            season: "2018-03".to_owned(),
        };
        assert_eq!(
            format_compare_error(&error),
            "Could not find the `2018-03` stats of `john` and `jane`."
        );
    }

    #[test]
    fn test_format_invalid_parameters() {
        let error = CompareError::InvalidParameters("unknown region `MARS`".to_owned());
        assert!(format_compare_error(&error).contains("unknown region `MARS`"));
    }

    #[test]
    fn test_format_defaults_set() {
        let defaults = RoomDefaults {
            season: "2018-03".to_owned(),
            region: "PC_EU".to_owned(),
            mode: "SQUAD_FPP".to_owned(),
        };
        assert_eq!(
            format_defaults_set(&defaults),
            "Room defaults set: season `2018-03` (Mar 2018), region `PC_EU`, mode `SQUAD_FPP`."
        );
    }

    #[test]
    fn test_format_info() {
        let info = format_info(Duration::from_secs(2 * 3600 + 5 * 60 + 9), Some(51200), 3);
        assert!(info.contains("Uptime: 2 hours, 5 minutes, and 9 seconds"));
        assert!(info.contains("Memory usage: 50.00 MB"));
        assert!(info.contains("Rooms: 3"));
    }

    #[test]
    fn test_format_info_unknown_memory() {
        let info = format_info(Duration::from_secs(59), None, 0);
        assert!(info.contains("0 hours, 0 minutes, and 59 seconds"));
        assert!(info.contains("Memory usage: unknown"));
    }
}
