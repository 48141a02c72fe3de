use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected response from {url}: {message}")]
    Decode { url: String, message: String },
    #[error("airport not found: {0:?}")]
    NotFound(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
