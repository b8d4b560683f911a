//! Mode-switch session state machine.
//!
//! ```text
//!              selection from requester
//!  Displayed ───────────────────────────► Switching
//!      ▲   │                                 │ render, delete previous,
//!      │   │ 15s idle                        │ post, react 1 2 4
//!      │   ▼                                 │
//!      │ Terminated ◄──── post failed ───────┤
//!      └─────────────────────────────────────┘
//! ```

use std::sync::Arc;

use log::{debug, error, info, warn};
use mockall::automock;
use serde_json::{Map, Value};
use tokio::{
    sync::mpsc,
    time::{Duration, Instant, timeout_at},
};

use crate::{
    analytics::Analytics,
    compare::ComparisonRequest,
    interaction::{Presenter, SHORTCUTS, Selection, SelectionRouter, click_number},
    pubg::{ModeFamily, SeasonStats},
    render::ComparisonRenderer,
};

/// Time without selection after which a session ends.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(15);

/// Produces the comparison image of a mode family.
#[automock]
pub trait FamilyRenderer {
    fn render_family(&self, family: ModeFamily) -> anyhow::Result<Vec<u8>>;
}

/// A comparison whose statistics were fetched once and are rendered on demand.
pub struct CachedComparison {
    renderer: ComparisonRenderer,
    request: ComparisonRequest,
    stats_a: Arc<SeasonStats>,
    stats_b: Arc<SeasonStats>,
}

impl CachedComparison {
    pub fn new(
        renderer: ComparisonRenderer,
        request: ComparisonRequest,
        stats_a: SeasonStats,
        stats_b: SeasonStats,
    ) -> Self {
        CachedComparison {
            renderer,
            request,
            stats_a: Arc::new(stats_a),
            stats_b: Arc::new(stats_b),
        }
    }
}

impl FamilyRenderer for CachedComparison {
    fn render_family(&self, family: ModeFamily) -> anyhow::Result<Vec<u8>> {
        let rendered = self
            .renderer
            .render(&self.request, &self.stats_a, &self.stats_b, family)?;
        Ok(rendered.png)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Displayed,
    Switching,
    Terminated,
}

/// Where a session was requested, and by whom.
#[derive(Debug, Clone)]
pub struct SessionOrigin {
    pub room_id: String,
    pub requester: String,
    /// Attached to every click analytics event
    pub analytics_properties: Map<String, Value>,
}

/// One comparison message and its shortcuts, for as long as the requester uses them.
pub struct ModeSwitchSession<P: Presenter, R: FamilyRenderer> {
    presenter: Arc<P>,
    images: R,
    router: Arc<SelectionRouter>,
    analytics: Arc<dyn Analytics>,
    origin: SessionOrigin,
    /// Event id of the comparison currently displayed
    message_id: String,
    /// Event ids of the bot's shortcut reactions on the current message
    reaction_ids: Vec<String>,
    state: SessionState,
    sender: mpsc::Sender<Selection>,
}

impl<P: Presenter, R: FamilyRenderer> ModeSwitchSession<P, R> {
    /// Posts the first comparison image and its shortcuts.
    ///
    /// # Returns
    ///
    /// The session in [`SessionState::Displayed`] and the receiver to pass to
    /// [`ModeSwitchSession::run`].
    ///
    /// # Errors
    ///
    /// Fails if the image can't be rendered or posted.
    pub async fn start(
        presenter: Arc<P>,
        images: R,
        router: Arc<SelectionRouter>,
        analytics: Arc<dyn Analytics>,
        origin: SessionOrigin,
        family: ModeFamily,
    ) -> anyhow::Result<(Self, mpsc::Receiver<Selection>)> {
        let (sender, receiver) = mpsc::channel(1);
        let png = images.render_family(family)?;

        let mut session = ModeSwitchSession {
            presenter,
            images,
            router,
            analytics,
            origin,
            message_id: String::new(),
            reaction_ids: Vec::new(),
            state: SessionState::Switching,
            sender,
        };
        session.publish(png).await?;
        session.state = SessionState::Displayed;

        Ok((session, receiver))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }

    /// Handles selections until the session terminates.
    ///
    /// The idle deadline restarts each time a new message is posted.
    pub async fn run(&mut self, mut receiver: mpsc::Receiver<Selection>) {
        let mut deadline = Instant::now() + IDLE_TIMEOUT;

        while self.state != SessionState::Terminated {
            match timeout_at(deadline, receiver.recv()).await {
                Ok(Some(selection)) => {
                    if self.handle(selection).await {
                        deadline = Instant::now() + IDLE_TIMEOUT;
                    }
                }
                Ok(None) | Err(_) => self.terminate().await,
            }
        }
    }

    /// Switches the displayed family.
    ///
    /// Selections are only accepted while displayed, and only for the current
    /// message, so a duplicated reaction never switches twice.
    ///
    /// Returns `true` if a switch happened.
    pub async fn handle(&mut self, selection: Selection) -> bool {
        if self.state != SessionState::Displayed || selection.message_id != self.message_id {
            debug!("ignore selection {:?} in state {:?}", selection, self.state);
            return false;
        }

        self.state = SessionState::Switching;
        info!(
            "switch comparison {} to {:?}",
            self.message_id, selection.family
        );

        self.analytics.track(
            &format!("compare - Click {}", click_number(selection.family)),
            self.origin.analytics_properties.clone(),
        );

        let png = match self.images.render_family(selection.family) {
            Ok(png) => png,
            Err(e) => {
                error!("failed to render comparison: {:?}", e);
                self.terminate().await;
                return false;
            }
        };

        self.router.remove(&self.message_id).await;
        if let Err(e) = self
            .presenter
            .redact(&self.origin.room_id, &self.message_id)
            .await
        {
            warn!("failed to delete comparison {}: {:?}", self.message_id, e);
        }
        self.reaction_ids.clear();

        match self.publish(png).await {
            Ok(()) => self.state = SessionState::Displayed,
            Err(e) => {
                error!("failed to post comparison: {:?}", e);
                self.state = SessionState::Terminated;
            }
        }

        true
    }

    /// Clears the shortcuts of the current message. Only the first call has an effect.
    pub async fn terminate(&mut self) {
        if self.state == SessionState::Terminated {
            return;
        }
        self.state = SessionState::Terminated;
        self.router.remove(&self.message_id).await;

        for reaction_id in self.reaction_ids.drain(..) {
            if let Err(e) = self
                .presenter
                .redact(&self.origin.room_id, &reaction_id)
                .await
            {
                debug!("failed to clear reaction {}: {:?}", reaction_id, e);
            }
        }

        info!("comparison session on {} ended", self.message_id);
    }

    async fn publish(&mut self, png: Vec<u8>) -> anyhow::Result<()> {
        self.message_id = self
            .presenter
            .send_image(&self.origin.room_id, png)
            .await?;

        for (key, _) in SHORTCUTS {
            match self
                .presenter
                .react(&self.origin.room_id, &self.message_id, key)
                .await
            {
                Ok(reaction_id) => self.reaction_ids.push(reaction_id),
                Err(e) => warn!("failed to react {} on {}: {:?}", key, self.message_id, e),
            }
        }

        self.router
            .register(&self.message_id, &self.origin.requester, self.sender.clone())
            .await;

        Ok(())
    }
}
