use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Network request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with status code {0}")]
    Status(StatusCode),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Response carried no token")]
    MissingToken,
}
