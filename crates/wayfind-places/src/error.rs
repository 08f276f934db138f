use thiserror::Error;

/// Transport-level failures talking to the place search provider.
///
/// The curation pipeline never surfaces these to its caller: a failed search
/// becomes an empty reference list and a failed detail fetch skips that one
/// candidate.
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by place provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid provider base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("timed out waiting for {context}")]
    Timeout { context: String },
}
