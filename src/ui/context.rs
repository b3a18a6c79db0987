use std::sync::Arc;

use flume::Sender;

use crate::{auth::TokenStore, db::Database, event::events::Event, http::ApiService};

/// Services every view can reach. Built once in `App` and passed down.
pub struct AppContext {
    pub api: Arc<ApiService>,
    pub db: Arc<Database>,
    pub tokens: Arc<dyn TokenStore>,
    pub event_tx: Sender<Event>,
}
