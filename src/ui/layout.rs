use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    ui::{app::App, state::Route},
    util::colors,
};

pub struct AppLayout<'a> {
    pub app: &'a mut App,
}

impl<'a> AppLayout<'a> {
    pub fn new(app: &'a mut App) -> Self {
        Self { app }
    }

    pub fn render(self, f: &mut Frame, area: Rect) {
        let buf = f.buffer_mut();
        buf.set_style(area, Style::new().bg(colors::BACKGROUND));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);

        let content_block = Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(match self.app.state.ui.current_route {
                Route::Login => "TeamChat",
                Route::Channels => "TeamChat · Channels",
            })
            .title_alignment(Alignment::Center);

        let content_inner = content_block.inner(chunks[0]);
        f.render_widget(content_block, chunks[0]);

        self.app.router.render(f, content_inner, &self.app.state);

        let mut footer = vec![Span::styled(
            self.app.state.ui.current_route.key_hints(),
            Style::default().fg(colors::NEUTRAL),
        )];
        if let Some(status) = &self.app.state.ui.status_message {
            footer.push(Span::raw("  "));
            footer.push(Span::styled(
                status.as_str(),
                Style::default().fg(colors::SECONDARY),
            ));
        }
        f.render_widget(Paragraph::new(Line::from(footer)), chunks[1]);
    }
}
