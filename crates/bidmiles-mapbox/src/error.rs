use thiserror::Error;

/// Errors returned by the Mapbox API client.
#[derive(Debug, Error)]
pub enum MapboxError {
    /// Network, TLS or non-2xx failure from the underlying HTTP client.
    /// The request URL is stripped so the access token never reaches logs.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The base URL did not parse, or cannot have API paths joined onto it.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl From<reqwest::Error> for MapboxError {
    fn from(err: reqwest::Error) -> Self {
        MapboxError::Http(err.without_url())
    }
}
