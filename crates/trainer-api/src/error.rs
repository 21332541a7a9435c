use thiserror::Error;

/// Errors produced by the API client.
///
/// Nothing here is retried automatically; each failure is scoped to the
/// call that triggered it. The generation poller has its own attempt loop
/// on top, but a transport failure aborts even that (it is not treated as
/// a transient condition).
#[derive(Debug, Error)]
pub enum ApiError {
    /// No access token is configured. Callers should send the user to login.
    #[error("no access token configured; run `trainer login` first")]
    MissingToken,

    /// The backend rejected the token (HTTP 401). Callers should send the
    /// user to login; the stale token is useless.
    #[error("token invalido o expirado")]
    Unauthorized,

    /// Non-success HTTP status. `body` carries the raw response text, or a
    /// generic fallback when the body could not be read.
    #[error("request failed with status {status}: {body}")]
    Request { status: u16, body: String },

    /// Network or decoding failure below the HTTP layer.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Whether this error means the session should re-authenticate.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::MissingToken | Self::Unauthorized)
    }
}
