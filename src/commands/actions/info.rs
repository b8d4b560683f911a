//! Info command handler.

use log::debug;
use serde_json::{Map, json};

use crate::{
    commands::{CommandContext, CommandResult, markdown_response::format_info},
    pubg::StatsApi,
    utils::resident_memory_kb,
};

pub async fn handle_info<A: StatsApi>(context: &CommandContext<'_, A>) -> CommandResult {
    debug!("handling info command for {}", context.user_id);

    let mut properties = Map::new();
    properties.insert("distinct_id".to_owned(), json!(context.user_id));
    context.analytics.track("info", properties);

    let memory_kb = resident_memory_kb().await;

    CommandResult::reply(format_info(
        context.status.started_at.elapsed(),
        memory_kb,
        context.status.joined_rooms,
    ))
}
