use std::sync::Arc;

use flume::Receiver;
use ratatui::Frame;
use tracing::{error, info, warn};

use crate::{
    auth::{KeyringStore, TokenStore},
    config::Config,
    db::Database,
    event::events::Event,
    http::ApiService,
};

use super::{
    context::AppContext,
    layout::AppLayout,
    router::Router,
    state::AppState,
    traits::View,
    tui::{self, TerminalEvent},
    util::handler::EventHandler,
    views::{Channels, Login},
};

pub struct App {
    pub event_rx: Receiver<Event>,
    pub ctx: AppContext,
    pub router: Router,
    pub state: AppState,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub async fn new(config: Config) -> color_eyre::Result<Self> {
        let api = ApiService::new(&config)?;
        let db = Database::open(&config.database_path())?;
        let tokens = Arc::new(KeyringStore::new(config.keyring_service.clone()));

        Ok(Self::with_services(api, db, tokens).await)
    }

    pub async fn with_services(api: ApiService, db: Database, tokens: Arc<dyn TokenStore>) -> Self {
        let (event_tx, event_rx) = flume::unbounded();
        let ctx = AppContext {
            api: Arc::new(api),
            db: Arc::new(db),
            tokens,
            event_tx,
        };

        let mut app = Self {
            event_rx,
            ctx,
            router: Router::new(Box::new(Login::default())),
            state: AppState::default(),
            has_focus: true,
            should_quit: false,
        };
        app.resume_session().await;
        app
    }

    /// Skips the login screen when a token survived from an earlier run.
    async fn resume_session(&mut self) {
        match self.ctx.tokens.load() {
            Ok(Some(token)) => {
                info!("Found stored auth token, opening channel list");
                self.open_channels(token).await;
            }
            Ok(None) => {}
            Err(e) => warn!("Could not read stored auth token: {}", e),
        }
    }

    pub async fn open_channels(&mut self, token: String) {
        let mut view = Channels::new(token);
        view.on_mount(&self.ctx).await;
        self.router.push(Box::new(view));
        self.sync_route();
    }

    /// Forgets the stored token and returns to the login screen. The channel
    /// cache is left as is.
    pub fn logout(&mut self) {
        match self.ctx.tokens.delete() {
            Ok(true) => info!("Logged out"),
            Ok(false) => info!("Logged out with no stored token"),
            Err(e) => error!("Failed to delete auth token: {}", e),
        }
        self.router.pop_to_root();
        self.sync_route();
        self.state.ui.status_message = Some("Logged out.".to_string());
    }

    pub fn sync_route(&mut self) {
        self.state.ui.current_route = self.router.active_route();
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = tui::Tui::new()?;
        tui.enter()?;

        let mut should_render =
            EventHandler::handle_event(self, TerminalEvent::Init, &mut tui).await?;
        while !self.should_quit {
            if should_render {
                tui.draw(|f| {
                    self.ui(f);
                })?;
            }

            should_render = EventHandler::handle_events(self, &mut tui).await?;
        }

        tui.exit()?;
        Ok(())
    }

    fn ui(&mut self, frame: &mut Frame) {
        if self.has_focus {
            let area = frame.area();
            AppLayout::new(self).render(frame, area);
        }
    }
}
