use serde_json::Value;

/// Errors raised by the Binance futures clients.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The exchange answered with a non-success status. `body` is the decoded
    /// JSON body, or the raw text as a JSON string when it was not JSON.
    #[error("binance api error (status {status}): {body}")]
    Api { status: u16, body: Value },
    #[error("unknown symbol: {0}")]
    BadSymbol(String),
    #[error("markets not loaded, call load_markets() first")]
    MarketsNotLoaded,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid number in field {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds an [`Error::Api`] from a status code and raw response text.
    pub fn api(status: u16, text: &str) -> Self {
        let body = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()));
        Error::Api { status, body }
    }
}
