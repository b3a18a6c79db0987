use crate::event::events::Event;
use crate::ui::context::AppContext;
use crate::ui::state::{AppState, Route};
use crate::ui::traits::{Action, View};
use ratatui::Frame;
use ratatui::crossterm::event::KeyEvent;
use ratatui::layout::Rect;

/// Screen stack. The bottom view is never popped; views dropped off the top
/// take their in-flight requests with them.
pub struct Router {
    pub stack: Vec<Box<dyn View>>,
}

impl Router {
    pub fn new(initial_view: Box<dyn View>) -> Self {
        Self {
            stack: vec![initial_view],
        }
    }

    pub fn push(&mut self, view: Box<dyn View>) {
        self.stack.push(view);
    }

    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub fn pop_to_root(&mut self) {
        self.stack.truncate(1);
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn active_route(&self) -> Route {
        self.stack
            .last()
            .map(|view| view.route())
            .unwrap_or_default()
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState) {
        if let Some(view) = self.stack.last_mut() {
            view.render(f, area, state);
        }
    }

    pub async fn handle_input(
        &mut self,
        key: KeyEvent,
        state: &AppState,
        ctx: &AppContext,
    ) -> Option<Action> {
        if let Some(view) = self.stack.last_mut() {
            view.handle_input(key, state, ctx).await
        } else {
            None
        }
    }

    /// Offers the event to every live view; the first action wins.
    pub async fn on_event(&mut self, event: &Event, ctx: &AppContext) -> Option<Action> {
        let mut action = None;
        for view in &mut self.stack {
            if let Some(a) = view.on_event(event, ctx).await {
                action.get_or_insert(a);
            }
        }
        action
    }
}
