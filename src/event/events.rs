use std::sync::atomic::{AtomicU64, Ordering};

use crate::http::Channel;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Ids tag each background request so a view only accepts replies to the
/// request it is still waiting on.
pub fn next_request_id() -> u64 {
    NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone)]
pub enum Event {
    LoginSucceeded { request: u64, token: String },
    LoginFailed { request: u64, reason: String },
    ChannelsFetched { request: u64, channels: Vec<Channel> },
    ChannelsFailed { request: u64, reason: String },
}

impl Event {
    pub fn request(&self) -> u64 {
        match self {
            Event::LoginSucceeded { request, .. }
            | Event::LoginFailed { request, .. }
            | Event::ChannelsFetched { request, .. }
            | Event::ChannelsFailed { request, .. } => *request,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_ids_are_unique() {
        let a = next_request_id();
        let b = next_request_id();
        assert_ne!(a, b);
    }
}
