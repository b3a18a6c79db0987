pub mod auth;
pub mod channels;
pub mod config;
pub mod db;
pub mod event;
pub mod http;
pub mod ui;
pub mod util;
