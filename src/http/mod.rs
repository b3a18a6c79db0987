pub mod error;
pub mod model;

use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::Config;

pub use self::error::ApiError;
pub use self::model::{Channel, ChannelListResponse, Credentials};

/// Thin client over the TeamChat HTTP API. Built once from [`Config`] and
/// shared through the UI context.
pub struct ApiService {
    client: Client,
    scheme: String,
    login_path: String,
    channels_url: String,
}

impl ApiService {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            scheme: config.scheme.clone(),
            login_path: config.login_path.clone(),
            channels_url: config.channels_url.clone(),
        })
    }

    pub fn login_url(&self, host: &str) -> Result<Url, ApiError> {
        parse_url(&format!("{}://{}{}", self.scheme, host, self.login_path))
    }

    /// Any 2xx is accepted here; the body must be a JSON object with a string `token`.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let url = self.login_url(&credentials.host)?;
        debug!("Logging in as {} via {}", credentials.email, url);

        let response = self
            .client
            .post(url)
            .form(&[
                ("username", credentials.email.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Login rejected with status {}", status);
            return Err(ApiError::Status(status));
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body)?;
        let token = value
            .get("token")
            .and_then(Value::as_str)
            .ok_or(ApiError::MissingToken)?;

        info!("Login succeeded for {}", credentials.email);
        Ok(token.to_string())
    }

    /// Only an exact 200 counts as success for this endpoint.
    pub async fn fetch_channels(&self, token: &str) -> Result<Vec<Channel>, ApiError> {
        let url = parse_url(&self.channels_url)?;

        let response = self
            .client
            .post(url)
            .form(&[
                ("token", token),
                ("include_unread_count", "true"),
                ("exclude_members", "true"),
                ("include_permissions", "false"),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Channel list rejected with status {}", status);
            return Err(ApiError::Status(status));
        }

        let body = response.bytes().await?;
        let list: ChannelListResponse = serde_json::from_slice(&body)?;

        info!("Fetched {} channels", list.channels.len());
        Ok(list.channels)
    }
}

fn parse_url(raw: &str) -> Result<Url, ApiError> {
    Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })
}
