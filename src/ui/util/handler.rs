use crossterm::event::KeyCode;
use ratatui::crossterm::event::{KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, info};

use crate::{
    event::events::Event,
    ui::{
        app::App,
        traits::Action,
        tui::{TerminalEvent, Tui},
    },
};

pub struct EventHandler;

impl EventHandler {
    pub async fn handle_events(app: &mut App, tui: &mut Tui) -> color_eyre::Result<bool> {
        let mut should_render = false;
        if let Some(evt) = tui.next().await {
            if Self::handle_event(app, evt, tui).await? {
                should_render = true;
            }
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_action(app, evt).await;
            should_render = true;
        }

        Ok(should_render)
    }

    pub async fn handle_event(
        app: &mut App,
        evt: TerminalEvent,
        tui: &mut Tui,
    ) -> color_eyre::Result<bool> {
        match evt {
            TerminalEvent::Init => {}
            TerminalEvent::FocusGained => {
                app.has_focus = true;
                tui.clear()?;
            }
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key_event(app, key).await,
            TerminalEvent::Tick => {
                return Ok(app.has_focus);
            }
            TerminalEvent::Resize(..) => {}
        }

        Ok(true)
    }

    /// Applies a finished background request on the UI loop.
    pub async fn handle_action(app: &mut App, evt: Event) {
        debug!("Handling reply to request {}", evt.request());
        if let Some(action) = app.router.on_event(&evt, &app.ctx).await {
            Self::dispatch_action(app, action).await;
        }
    }

    pub async fn handle_key_event(app: &mut App, evt: KeyEvent) {
        if evt.kind != KeyEventKind::Press {
            return;
        }

        if evt.code == KeyCode::Char('c') && evt.modifiers == KeyModifiers::CONTROL {
            Self::dispatch_action(app, Action::Quit).await;
            return;
        }

        if let Some(action) = app.router.handle_input(evt, &app.state, &app.ctx).await {
            Self::dispatch_action(app, action).await;
        }
    }

    pub async fn dispatch_action(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,
            Action::OpenChannels(token) => {
                app.state.ui.status_message = None;
                app.open_channels(token).await;
            }
            Action::Back => {
                info!("Leaving channel list");
                app.router.pop();
                app.sync_route();
            }
            Action::Logout => app.logout(),
            Action::None => {}
        }
    }
}
