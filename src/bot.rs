//! Bot module wiring Matrix, the PUBG API and the comparison pipeline.
//!
//! # Architecture
//!
//! The bot runs the Matrix sync loop and spawns one task per event:
//!
//! 1. **Message task**: parses a `!pubg` command, executes it, applies the
//!    returned state changes (registration, room defaults) and replies. A
//!    successful `compare` then runs its mode-switch session in the same task
//!    until the session terminates.
//! 2. **Reaction task**: forwards a reaction to the [`SelectionRouter`], which
//!    delivers it to the session owning the reacted message.
//!
//! # Command Processing Flow
//!
//! ```text
//! Matrix Message → Parse Command → Execute → Apply Changes → Reply
//!                                                    └─► Post Image → Session
//! ```

use std::{sync::Arc, time::Instant};

use log::{error, info};

use crate::{
    analytics::{self, Analytics},
    commands::{BotStatus, CommandContext, CommandParseError, Commander, ComparisonReady},
    compare::FallbackDefaults,
    config::Config,
    interaction::{CachedComparison, ModeSwitchSession, SelectionRouter, SessionOrigin},
    matrix::{IncomingMessage, IncomingReaction, MatrixClient, UserCredentials},
    pubg::PubgRequester,
    render::{ComparisonRenderer, FontBook},
    storage::{RoomDefaultsStore, UserRegistry},
    utils::get_path,
};

/// Main bot structure.
pub struct Bot {
    matrix_client: Arc<MatrixClient>,
    requester: PubgRequester,
    registry: UserRegistry,
    room_defaults: RoomDefaultsStore,
    analytics: Arc<dyn Analytics>,
    fallback: FallbackDefaults,
    renderer: ComparisonRenderer,
    router: Arc<SelectionRouter>,
    commander: Commander,
    started_at: Instant,
}

impl Bot {
    /// Creates the bot: loads fonts and stores, then logs in to Matrix.
    ///
    /// # Arguments
    ///
    /// * `config` - Loaded configuration
    /// * `data_path` - Directory holding the Matrix session, `registry` and `room_defaults`
    ///
    /// # Errors
    ///
    /// Returns an error if a font can't be loaded or the Matrix login fails.
    pub async fn new(config: Config, data_path: &str) -> Result<Self, anyhow::Error> {
        let fonts = FontBook::load(&config.fonts.regular, &config.fonts.bold)?;
        let renderer = ComparisonRenderer::new(fonts);

        let requester = PubgRequester::new(&config.pubg.url, &config.pubg.api_key);

        let matrix_client = Arc::new(
            MatrixClient::new(
                &UserCredentials {
                    user_id: config.matrix.user_id,
                    password: config.matrix.password,
                },
                &get_path(data_path, "session"),
            )
            .await?,
        );

        let registry = UserRegistry::open(get_path(data_path, "registry")).await;
        let room_defaults = RoomDefaultsStore::open(get_path(data_path, "room_defaults")).await;
        let analytics: Arc<dyn Analytics> = Arc::from(analytics::from_token(
            config.analytics.mixpanel_token.as_deref(),
        ));

        Ok(Bot {
            matrix_client,
            requester,
            registry,
            room_defaults,
            analytics,
            fallback: FallbackDefaults {
                region: config.pubg.default_region,
                mode: config.pubg.default_mode,
            },
            renderer,
            router: Arc::new(SelectionRouter::new()),
            commander: Commander::new(),
            started_at: Instant::now(),
        })
    }

    /// Runs the Matrix sync loop. Only returns if syncing stops.
    pub async fn start(self) {
        let bot = Arc::new(self);

        let on_message = {
            let bot = Arc::clone(&bot);
            move |message: IncomingMessage| Self::handle_matrix_message(Arc::clone(&bot), message)
        };

        let on_reaction = {
            let router = Arc::clone(&bot.router);
            move |reaction: IncomingReaction| {
                let router = Arc::clone(&router);
                tokio::spawn(async move {
                    router
                        .dispatch(
                            &reaction.target_event_id,
                            &reaction.sender_id,
                            &reaction.key,
                        )
                        .await;
                });
            }
        };

        if let Err(e) = bot.matrix_client.sync(on_message, on_reaction).await {
            error!("matrix sync failed: {:?}", e);
        }
    }

    fn handle_matrix_message(bot: Arc<Bot>, message: IncomingMessage) {
        tokio::spawn(async move {
            let command = match bot.commander.parse(&message.body) {
                Ok(command) => command,
                Err(e) => match e {
                    CommandParseError::NotForBot => return,
                    CommandParseError::InvalidCommand(response) => {
                        bot.reply(&message, &response).await;
                        return;
                    }
                },
            };

            let context = CommandContext {
                room_id: message.room_id.clone(),
                user_id: message.sender_id.clone(),
                is_direct: message.is_direct,
                api: &bot.requester,
                registry: &bot.registry,
                room_defaults: &bot.room_defaults,
                analytics: bot.analytics.as_ref(),
                fallback: &bot.fallback,
                status: BotStatus {
                    started_at: bot.started_at,
                    joined_rooms: bot.matrix_client.joined_room_count(),
                },
            };

            let result = bot.commander.parse_command(&command, &context).await;

            if let Some(change) = result.registration {
                bot.registry.apply(&message.sender_id, change).await;
            }
            if let Some(defaults) = result.defaults_to_set {
                bot.room_defaults
                    .set_defaults(&message.room_id, defaults)
                    .await;
            }
            if let Some(response) = result.response {
                bot.reply(&message, &response).await;
            }
            if let Some(comparison) = result.comparison {
                bot.run_session(&message, comparison).await;
            }
        });
    }

    /// Posts a comparison and serves its shortcuts until the session ends.
    async fn run_session(&self, message: &IncomingMessage, comparison: ComparisonReady) {
        let ComparisonReady {
            request,
            stats_a,
            stats_b,
        } = comparison;

        let family = request.mode.family();
        let origin = SessionOrigin {
            room_id: message.room_id.clone(),
            requester: message.sender_id.clone(),
            analytics_properties: request.analytics_properties(),
        };
        let images = CachedComparison::new(self.renderer.clone(), request, stats_a, stats_b);

        match ModeSwitchSession::start(
            Arc::clone(&self.matrix_client),
            images,
            Arc::clone(&self.router),
            Arc::clone(&self.analytics),
            origin,
            family,
        )
        .await
        {
            Ok((mut session, receiver)) => {
                info!("comparison posted as {}", session.message_id());
                session.run(receiver).await;
            }
            Err(e) => {
                error!("failed to post comparison: {:?}", e);
                self.reply(message, &Commander::get_post_failed_message())
                    .await;
            }
        }
    }

    async fn reply(&self, message: &IncomingMessage, body: &str) {
        self.matrix_client
            .send_reply(&message.room_id, &message.sender_id, &message.event_id, body)
            .await;
    }
}
