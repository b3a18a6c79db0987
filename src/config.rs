use std::{path::PathBuf, str::FromStr, time::Duration};

use directories::ProjectDirs;
use lazy_static::lazy_static;
use tracing::warn;

pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_LOGIN_PATH: &str = "/teamchatapi/iwauthentication.login.plain";
pub const DEFAULT_CHANNELS_URL: &str = "https://mofa.onice.io/teamchatapi/channels.list";
pub const DEFAULT_KEYRING_SERVICE: &str = "teamchat";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase();
    pub static ref DATA_FOLDER: Option<PathBuf> =
        std::env::var(format!("{}_DATA", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("io", "onice", env!("CARGO_PKG_NAME"))
}

pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = DATA_FOLDER.clone() {
        dir
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

/// Endpoints and local paths. The login host comes from the user at runtime;
/// the channel list lives at its own fixed URL.
#[derive(Debug, Clone)]
pub struct Config {
    pub scheme: String,
    pub login_path: String,
    pub channels_url: String,
    pub timeout: Duration,
    pub keyring_service: String,
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            channels_url: DEFAULT_CHANNELS_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_string(),
            data_dir: get_data_dir(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            scheme: env_or("SCHEME", defaults.scheme),
            login_path: env_or("LOGIN_PATH", defaults.login_path),
            channels_url: env_or("CHANNELS_URL", defaults.channels_url),
            timeout: Duration::from_secs(env_parse("HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)),
            keyring_service: env_or("KEYRING_SERVICE", defaults.keyring_service),
            data_dir: defaults.data_dir,
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.db", env!("CARGO_PKG_NAME")))
    }
}

fn env_key(name: &str) -> String {
    format!("{}_{}", PROJECT_NAME.as_str(), name)
}

fn env_or(name: &str, default: String) -> String {
    std::env::var(env_key(name))
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(default)
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    let key = env_key(name);
    match std::env::var(&key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        Err(_) => default,
    }
}
