//! Handle unregistration command handler.

use log::debug;

use crate::{
    commands::{
        CommandContext, CommandResult,
        markdown_response::{format_not_registered, format_successful_unregister},
    },
    pubg::StatsApi,
    storage::RegistryChange,
};

pub async fn handle_unregister<A: StatsApi>(context: &CommandContext<'_, A>) -> CommandResult {
    debug!("handling unregister command for {}", context.user_id);

    match context.registry.get_registered_handle(&context.user_id).await {
        Some(handle) => CommandResult {
            response: Some(format_successful_unregister(&handle)),
            registration: Some(RegistryChange::Unregister),
            ..Default::default()
        },
        None => CommandResult::reply(format_not_registered()),
    }
}
