use thiserror::Error;

/// Errors returned by the AMap web-service client.
#[derive(Debug, Error)]
pub enum AmapError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with `"status": "0"`; carries the `info` code.
    #[error("AMap API error: {0}")]
    ApiError(String),

    /// Success status, but the expected payload list was empty.
    #[error("AMap returned no results for {0}")]
    EmptyResult(String),

    /// A `location` field was not a `"lng,lat"` pair.
    #[error("invalid location string: {0:?}")]
    InvalidLocation(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
