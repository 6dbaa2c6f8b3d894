use thiserror::Error;

/// Failures that abort a fetch. Rate-limited or error payloads are not
/// errors; they are reported per language.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("http client setup failed: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// Shown next to any fetch error by the binaries.
pub const RATE_LIMIT_HINT: &str = "GitHub limits unauthenticated search requests. \
Wait a moment and try again, or use an API key for a higher quota.";
