//! Compare command handler.
//!
//! Resolves the parameters, then fetches both players' season statistics. On
//! success nothing is replied: the comparison is returned for the bot to post
//! as an image. Every [`CompareError`](crate::compare::CompareError) becomes a
//! reply to the requester.

use log::{debug, info};

use crate::{
    commands::{
        CommandContext, CommandResult, ComparisonReady, markdown_response::format_compare_error,
    },
    compare::{ParameterResolver, fetch_comparison_stats},
    pubg::StatsApi,
};

pub async fn handle_compare<A: StatsApi>(
    context: &CommandContext<'_, A>,
    arguments: &[String],
) -> CommandResult {
    debug!("handling compare command: {:?}", arguments);

    let resolver = ParameterResolver::new(
        context.api,
        context.registry,
        context.room_defaults,
        context.analytics,
        context.fallback,
    );

    let request = match resolver
        .resolve(arguments, &context.user_id, context.group_id())
        .await
    {
        Ok(request) => request,
        Err(e) => {
            info!("compare rejected: {}", e);
            return CommandResult::reply(format_compare_error(&e));
        }
    };

    match fetch_comparison_stats(context.api, &request).await {
        Ok((stats_a, stats_b)) => CommandResult {
            comparison: Some(ComparisonReady {
                request,
                stats_a,
                stats_b,
            }),
            ..Default::default()
        },
        Err(e) => {
            info!("compare failed: {}", e);
            CommandResult::reply(format_compare_error(&e))
        }
    }
}
