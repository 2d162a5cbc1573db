// Error types shared across the crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure modes when talking to TMDB.
///
/// The fallback methods on [`crate::services::tmdb::TmdbClient`] collapse all
/// of these into empty-shaped defaults; the `try_*` methods surface them.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response (connect, timeout, TLS, ...).
    #[error("TMDB request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// TMDB answered with a non-success status code.
    #[error("TMDB returned status {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode TMDB response: {0}")]
    Decode(#[from] serde_json::Error),
}
