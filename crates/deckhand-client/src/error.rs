use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure: connection refused, DNS, timeout, TLS.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-2xx status. `message` is the
    /// structured `{error}` body when the service sent one, otherwise the
    /// raw body or status text.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// A 2xx body that does not deserialize to the expected shape.
    #[error("malformed response from {endpoint}: {source}")]
    Malformed {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
}
