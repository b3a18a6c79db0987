#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub ui: UiState,
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub current_route: Route,
    pub status_message: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    Login,
    Channels,
}

impl Route {
    pub fn key_hints(&self) -> &'static str {
        match self {
            Route::Login => "Tab: next field  Enter: sign in  Ctrl-C: quit",
            Route::Channels => "j/k: move  r: refresh  Esc: back  L: log out  Ctrl-C: quit",
        }
    }
}
