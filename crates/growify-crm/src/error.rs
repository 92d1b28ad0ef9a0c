use growify_store::StoreError;
use thiserror::Error;

/// Errors from the HubSpot client and sync paths.
#[derive(Debug, Error)]
pub enum CrmError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HubSpot kept answering 429 after every allowed retry.
    #[error("rate limited by HubSpot; gave up after {attempts} attempts")]
    RateLimited { attempts: u32 },

    /// HubSpot answered with a non-success status other than 429.
    #[error("HubSpot API error: status {status}")]
    ApiStatus { status: u16 },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The configured base URL does not parse.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
