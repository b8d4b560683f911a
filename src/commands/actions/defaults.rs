//! Room defaults command handler.
//!
//! `defaults` stores the season, region and mode `compare` falls back to in a
//! group room. Omitted values keep their stored value, then the bot-wide
//! fallback; a missing season becomes the current one. The result is
//! validated against the catalog before it is stored.

use log::{debug, info};

use crate::{
    commands::{
        CommandContext, CommandResult,
        markdown_response::{
            format_compare_error, format_defaults_in_direct_chat, format_defaults_set,
        },
    },
    compare::validate_parameters,
    pubg::StatsApi,
    storage::RoomDefaults,
    utils::get_param_value,
};

pub async fn handle_defaults<A: StatsApi>(
    context: &CommandContext<'_, A>,
    arguments: &[String],
) -> CommandResult {
    debug!("handling defaults command: {:?}", arguments);

    let Some(room_id) = context.group_id() else {
        return CommandResult::reply(format_defaults_in_direct_chat());
    };

    let stored = context.room_defaults.get_defaults(room_id).await;

    let season = get_param_value("season", arguments)
        .or_else(|| stored.as_ref().map(|d| d.season.clone()));
    let region = get_param_value("region", arguments)
        .or_else(|| stored.as_ref().map(|d| d.region.clone()))
        .unwrap_or_else(|| context.fallback.region.clone());
    let mode = get_param_value("mode", arguments)
        .or_else(|| stored.as_ref().map(|d| d.mode.clone()))
        .unwrap_or_else(|| context.fallback.mode.clone());

    match validate_parameters(context.api, season.as_deref(), &region, &mode).await {
        Ok((season, region, mode)) => {
            let defaults = RoomDefaults {
                season,
                region: region.as_str().to_owned(),
                mode: mode.as_str().to_owned(),
            };
            info!("room {} defaults: {:?}", room_id, defaults);

            CommandResult {
                response: Some(format_defaults_set(&defaults)),
                defaults_to_set: Some(defaults),
                ..Default::default()
            }
        }
        Err(e) => CommandResult::reply(format_compare_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::{
        commands::actions::testing::{ContextFixture, ROOM_ID, args, seasons},
        pubg::MockStatsApi,
    };

    #[tokio::test]
    async fn test_handle_defaults_normalizes_and_stores() {
        let fixture = ContextFixture::new().await;
        let mut api = MockStatsApi::new();
        api.expect_get_seasons()
            .with(eq("pc-eu"))
            .times(1)
            .returning(|_| Ok(seasons("2018-03")));

        let result = handle_defaults(
            &fixture.context(&api, false),
            &args(&["season=2018-02", "region=pc-eu", "mode=squad-fpp"]),
        )
        .await;

        assert_eq!(
            result.defaults_to_set,
            Some(RoomDefaults {
                season: "2018-02".to_string(),
                region: "PC_EU".to_string(),
                mode: "SQUAD_FPP".to_string(),
            })
        );
        assert!(result.response.unwrap().contains("Feb 2018"));
    }

    #[tokio::test]
    async fn test_handle_defaults_keeps_stored_values() {
        let fixture = ContextFixture::new().await;
        fixture
            .room_defaults
            .set_defaults(
                ROOM_ID,
                RoomDefaults {
                    season: "2018-01".to_string(),
                    region: "XBOX_EU".to_string(),
                    mode: "DUO".to_string(),
                },
            )
            .await;
        let mut api = MockStatsApi::new();
        api.expect_get_seasons()
            .with(eq("xbox-eu"))
            .times(1)
            .returning(|_| Ok(seasons("2018-03")));

        let result =
            handle_defaults(&fixture.context(&api, false), &args(&["mode=squad"])).await;

        assert_eq!(
            result.defaults_to_set,
            Some(RoomDefaults {
                season: "2018-01".to_string(),
                region: "XBOX_EU".to_string(),
                mode: "SQUAD".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_handle_defaults_uses_current_season() {
        let fixture = ContextFixture::new().await;
        let mut api = MockStatsApi::new();
        api.expect_get_seasons()
            .with(eq("pc-na"))
            .times(1)
            .returning(|_| Ok(seasons("2018-03")));

        let result = handle_defaults(&fixture.context(&api, false), &args(&[])).await;

        let defaults = result.defaults_to_set.unwrap();
        assert_eq!(defaults.season, "2018-03");
        assert_eq!(defaults.region, "PC_NA");
        assert_eq!(defaults.mode, "SOLO_FPP");
    }

    #[tokio::test]
    async fn test_handle_defaults_rejects_invalid_region() {
        let fixture = ContextFixture::new().await;
        let mut api = MockStatsApi::new();
        api.expect_get_seasons().never();

        let result = handle_defaults(&fixture.context(&api, false), &args(&["region=mars"])).await;

        assert!(result.defaults_to_set.is_none());
        assert!(result.response.unwrap().contains("unknown region `MARS`"));
    }

    #[tokio::test]
    async fn test_handle_defaults_direct_chat() {
        let fixture = ContextFixture::new().await;
        let api = MockStatsApi::new();

        let result = handle_defaults(&fixture.context(&api, true), &args(&["region=pc-eu"])).await;

        assert!(result.defaults_to_set.is_none());
        assert_eq!(
            result.response.unwrap(),
            "Defaults can only be set in a group room."
        );
    }
}
