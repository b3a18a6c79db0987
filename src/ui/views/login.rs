use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
};
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::{
    auth::validate_credentials,
    event::events::{Event, next_request_id},
    http::Credentials,
    ui::{
        components::{spinner::Spinner, text_field::TextField},
        context::AppContext,
        state::{AppState, Route},
        traits::{Action, View},
    },
    util::colors,
};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Field {
    #[default]
    Email,
    Password,
    Host,
}

impl Field {
    fn next(self) -> Self {
        match self {
            Field::Email => Field::Password,
            Field::Password => Field::Host,
            Field::Host => Field::Email,
        }
    }

    fn prev(self) -> Self {
        match self {
            Field::Email => Field::Host,
            Field::Password => Field::Email,
            Field::Host => Field::Password,
        }
    }
}

#[derive(Default)]
pub struct Login {
    email: String,
    password: String,
    host: String,
    focus: Field,
    message: Option<String>,
    pending: Option<u64>,
    login_handle: Option<JoinHandle<()>>,
}

impl Drop for Login {
    fn drop(&mut self) {
        if let Some(handle) = self.login_handle.take() {
            handle.abort();
        }
    }
}

impl Login {
    fn input_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::Host => &mut self.host,
        }
    }

    fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
            host: self.host.clone(),
        }
    }

    fn submit(&mut self, ctx: &AppContext) {
        if self.pending.is_some() {
            return;
        }

        let credentials = self.credentials();
        if let Err(e) = validate_credentials(&credentials) {
            self.message = Some(e.to_string());
            return;
        }

        let request = next_request_id();
        let api = ctx.api.clone();
        let tx = ctx.event_tx.clone();
        let handle = tokio::spawn(async move {
            let event = match api.login(&credentials).await {
                Ok(token) => Event::LoginSucceeded { request, token },
                Err(e) => {
                    warn!("Login failed: {}", e);
                    Event::LoginFailed {
                        request,
                        reason: e.to_string(),
                    }
                }
            };
            let _ = tx.send(event);
        });

        if let Some(previous) = self.login_handle.replace(handle) {
            previous.abort();
        }
        self.pending = Some(request);
        self.message = None;
    }
}

#[async_trait]
impl View for Login {
    fn route(&self) -> Route {
        Route::Login
    }

    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState) {
        let [form_area] = Layout::horizontal([Constraint::Max(60)])
            .flex(Flex::Center)
            .areas(area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Min(0),
            ])
            .split(form_area);

        f.render_widget(
            Paragraph::new(Line::from("Sign in to TeamChat").centered()).style(
                Style::default()
                    .fg(colors::PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            chunks[0],
        );

        f.render_widget(
            TextField::new("Email", &self.email).focused(self.focus == Field::Email),
            chunks[1],
        );
        f.render_widget(
            TextField::new("Password", &self.password)
                .secret(true)
                .focused(self.focus == Field::Password),
            chunks[2],
        );
        f.render_widget(
            TextField::new("Host", &self.host).focused(self.focus == Field::Host),
            chunks[3],
        );

        if self.pending.is_some() {
            let spinner = Spinner::default()
                .with_style(Style::default().fg(colors::PRIMARY))
                .with_label("Signing in...");
            f.render_widget(spinner, chunks[4]);
        } else if let Some(message) = &self.message {
            let alert = Paragraph::new(Line::from(message.as_str()).centered())
                .style(Style::default().fg(colors::ERROR))
                .block(Block::default().borders(Borders::TOP).title("Oops.."));
            f.render_widget(alert, chunks[4]);
        }
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Enter => self.submit(ctx),
            KeyCode::Backspace => {
                self.input_mut().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_mut().push(c);
            }
            _ => return None,
        }
        Some(Action::None)
    }

    async fn on_event(&mut self, event: &Event, ctx: &AppContext) -> Option<Action> {
        match event {
            Event::LoginSucceeded { request, token } if self.pending == Some(*request) => {
                self.pending = None;
                self.login_handle = None;
                self.password.clear();
                if let Err(e) = ctx.tokens.save(token) {
                    error!("Failed to store auth token: {}", e);
                }
                Some(Action::OpenChannels(token.clone()))
            }
            Event::LoginFailed { request, .. } if self.pending == Some(*request) => {
                self.pending = None;
                self.login_handle = None;
                self.message = Some(LOGIN_FAILED_MESSAGE.to_string());
                None
            }
            _ => None,
        }
    }
}
