use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph},
};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::{
    channels::{self, ChannelGroups, ListRow},
    event::events::{Event, next_request_id},
    ui::{
        components::spinner::Spinner,
        context::AppContext,
        state::{AppState, Route},
        traits::{Action, View},
    },
    util::colors,
};

pub struct Channels {
    token: String,
    groups: ChannelGroups,
    list_state: ListState,
    selected: usize,
    is_loading: bool,
    message: Option<String>,
    pending: Option<u64>,
    fetch_handle: Option<JoinHandle<()>>,
}

impl Drop for Channels {
    fn drop(&mut self) {
        if let Some(handle) = self.fetch_handle.take() {
            handle.abort();
        }
    }
}

impl Channels {
    pub fn new(token: String) -> Self {
        Self {
            token,
            groups: ChannelGroups::default(),
            list_state: ListState::default(),
            selected: 0,
            is_loading: false,
            message: None,
            pending: None,
            fetch_handle: None,
        }
    }

    fn fetch(&mut self, ctx: &AppContext) {
        let request = next_request_id();
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();
        let token = self.token.clone();

        let handle = tokio::spawn(async move {
            let event = match api.fetch_channels(&token).await {
                Ok(channels) => Event::ChannelsFetched { request, channels },
                Err(e) => Event::ChannelsFailed {
                    request,
                    reason: e.to_string(),
                },
            };
            let _ = tx.send(event);
        });

        if let Some(previous) = self.fetch_handle.replace(handle) {
            previous.abort();
        }
        self.pending = Some(request);
        self.is_loading = true;
    }

    fn selectable_len(&self) -> usize {
        self.groups.channel_count()
    }

    /// Position of the `selected`-th channel in the flattened list, skipping headers.
    fn list_index(rows: &[ListRow<'_>], selected: usize) -> Option<usize> {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| matches!(row, ListRow::Channel(_)))
            .nth(selected)
            .map(|(index, _)| index)
    }
}

#[async_trait]
impl View for Channels {
    fn route(&self) -> Route {
        Route::Channels
    }

    async fn on_mount(&mut self, ctx: &AppContext) {
        self.fetch(ctx);
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        if let Some(message) = &self.message {
            f.render_widget(
                Paragraph::new(message.as_str()).style(Style::default().fg(colors::ERROR)),
                chunks[1],
            );
        }

        if self.groups.is_empty() {
            if self.is_loading {
                let spinner = Spinner::default()
                    .with_style(Style::default().fg(colors::PRIMARY))
                    .with_label("Loading channels...");
                f.render_widget(spinner, chunks[0]);
            } else {
                f.render_widget(
                    Paragraph::new("No channels").style(Style::default().fg(colors::NEUTRAL)),
                    chunks[0],
                );
            }
            return;
        }

        let rows = self.groups.rows();
        let items: Vec<ListItem> = rows
            .iter()
            .map(|row| match row {
                ListRow::Header(name) => ListItem::new(Line::from(Span::styled(
                    name.to_string(),
                    Style::default()
                        .fg(colors::SECONDARY)
                        .add_modifier(Modifier::BOLD),
                ))),
                ListRow::Channel(channel) => ListItem::new(format!("  # {}", channel.name)),
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        self.selected = self.selected.min(self.selectable_len().saturating_sub(1));
        self.list_state.select(Self::list_index(&rows, self.selected));

        f.render_stateful_widget(list, chunks[0], &mut self.list_state);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        let len = self.selectable_len();
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                if len > 0 && self.selected + 1 < len {
                    self.selected += 1;
                }
                Some(Action::None)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Some(Action::None)
            }
            KeyCode::Char('g') => {
                self.selected = 0;
                Some(Action::None)
            }
            KeyCode::Char('G') => {
                self.selected = len.saturating_sub(1);
                Some(Action::None)
            }
            KeyCode::Char('r') => {
                self.message = None;
                self.fetch(ctx);
                Some(Action::None)
            }
            KeyCode::Esc => Some(Action::Back),
            KeyCode::Char('L') => Some(Action::Logout),
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, ctx: &AppContext) -> Option<Action> {
        match event {
            Event::ChannelsFetched { request, channels: fetched } if self.pending == Some(*request) => {
                self.pending = None;
                self.fetch_handle = None;
                self.is_loading = false;
                match channels::store_and_group(&ctx.db, fetched.clone()) {
                    Ok(groups) => {
                        self.groups = groups;
                        self.message = None;
                    }
                    Err(e) => {
                        error!("Failed to save channels: {}", e);
                        self.message = Some("Could not save channels.".to_string());
                    }
                }
            }
            Event::ChannelsFailed { request, reason } if self.pending == Some(*request) => {
                self.pending = None;
                self.fetch_handle = None;
                self.is_loading = false;
                warn!("Failed to fetch channels: {}", reason);
                self.message = Some("Could not load channels.".to_string());
            }
            Event::ChannelsFetched { request, .. } | Event::ChannelsFailed { request, .. } => {
                info!("Ignoring reply to request {} this view no longer waits on", request);
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use super::*;
    use crate::{
        auth::token::memory::MemoryStore,
        config::Config,
        db::{ChannelRecord, Database},
        http::{ApiService, Channel},
    };
    use flume::Receiver;
    use ratatui::crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context(channels_url: String) -> (AppContext, Receiver<Event>) {
        let config = Config {
            channels_url,
            ..Config::default()
        };
        let (event_tx, event_rx) = flume::unbounded();
        let ctx = AppContext {
            api: Arc::new(ApiService::new(&config).unwrap()),
            db: Arc::new(Database::open_in_memory().unwrap()),
            tokens: Arc::new(MemoryStore::default()),
            event_tx,
        };
        (ctx, event_rx)
    }

    fn loaded_view() -> Channels {
        let mut view = Channels::new("t".to_string());
        view.groups = ChannelGroups::from_records(vec![record("C1", "General", Some("Team A"))]);
        view
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(view: &mut Channels) -> String {
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                view.render(f, area, &AppState::default());
            })
            .unwrap();
        screen_text(&terminal)
    }

    fn record(id: &str, name: &str, group: Option<&str>) -> ChannelRecord {
        ChannelRecord {
            id: id.to_string(),
            name: name.to_string(),
            group_folder_name: group.map(str::to_string),
        }
    }

    #[test]
    fn renders_headers_and_channel_names() {
        let mut view = Channels::new("t".to_string());
        view.groups = ChannelGroups::from_records(vec![
            record("C1", "General", Some("Team A")),
            record("C2", "Lobby", None),
        ]);

        let text = draw(&mut view);
        assert!(text.contains("Team A"));
        assert!(text.contains("# General"));
        assert!(text.contains("Unknown"));
        assert!(text.contains("# Lobby"));
        assert!(text.find("Team A") < text.find("Unknown"));
    }

    #[test]
    fn empty_cache_renders_placeholder() {
        let mut view = Channels::new("t".to_string());
        let text = draw(&mut view);
        assert!(text.contains("No channels"));
    }

    #[test]
    fn selection_skips_headers() {
        let groups = ChannelGroups::from_records(vec![
            record("1", "a", Some("A")),
            record("2", "b", Some("B")),
        ]);
        let rows = groups.rows();

        assert_eq!(Channels::list_index(&rows, 0), Some(1));
        assert_eq!(Channels::list_index(&rows, 1), Some(3));
        assert_eq!(Channels::list_index(&rows, 2), None);
    }

    #[test]
    fn selection_is_clamped_when_list_shrinks() {
        let mut view = Channels::new("t".to_string());
        view.groups = ChannelGroups::from_records(vec![record("1", "only", Some("A"))]);
        view.selected = 7;

        draw(&mut view);
        assert_eq!(view.selected, 0);
        assert_eq!(view.list_state.selected(), Some(1));
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_sections() {
        let (ctx, _rx) = context("http://127.0.0.1:9/teamchatapi/channels.list".to_string());
        let mut view = loaded_view();
        let before = view.groups.clone();

        ctx.db
            .with_conn(|conn| {
                conn.execute_batch("DROP TABLE channels")?;
                Ok(())
            })
            .unwrap();

        let request = next_request_id();
        view.pending = Some(request);
        view.is_loading = true;
        let fetched = Event::ChannelsFetched {
            request,
            channels: vec![Channel {
                id: "C2".to_string(),
                name: "Fresh".to_string(),
                group_folder_name: Some("Team B".to_string()),
            }],
        };
        view.on_event(&fetched, &ctx).await;

        assert_eq!(view.message.as_deref(), Some("Could not save channels."));
        assert_eq!(view.groups, before);
        assert!(!view.is_loading);

        let text = draw(&mut view);
        assert!(text.contains("Team A"));
        assert!(text.contains("# General"));
        assert!(!text.contains("Fresh"));
        assert!(text.contains("Could not save channels."));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_sections() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/teamchatapi/channels.list"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let (ctx, rx) = context(format!("{}/teamchatapi/channels.list", server.uri()));
        let mut view = loaded_view();
        let before = view.groups.clone();

        let action = view
            .handle_input(
                KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE),
                &AppState::default(),
                &ctx,
            )
            .await;
        assert_eq!(action, Some(Action::None));
        assert!(view.pending.is_some());

        let reply = tokio::time::timeout(Duration::from_secs(5), rx.recv_async())
            .await
            .expect("no reply within timeout")
            .expect("event channel closed");
        assert!(matches!(reply, Event::ChannelsFailed { .. }));
        view.on_event(&reply, &ctx).await;

        assert_eq!(view.message.as_deref(), Some("Could not load channels."));
        assert_eq!(view.groups, before);
        assert!(view.pending.is_none());

        let text = draw(&mut view);
        assert!(text.contains("Team A"));
        assert!(text.contains("# General"));
        assert!(text.contains("Could not load channels."));
    }
}
