use miette::Diagnostic;
use thiserror::Error;

/// Failure while talking to the social graph provider.
///
/// Any of these aborts the mutual-friend computation that issued the
/// request, and with it the whole path search.
#[derive(Debug, Error, Diagnostic)]
pub enum ProviderError {
    /// The request never produced a response (DNS, connect, timeout, TLS).
    #[error("Request to {url} failed: {message}")]
    #[diagnostic(help("Check your network connection and the configured API host"))]
    Transport { url: String, message: String },

    /// The provider answered with a non-success status code.
    #[error("HTTP {status} fetching {url}")]
    #[diagnostic(help("A 401 or 403 usually means the API key is missing or invalid"))]
    Status { status: u16, url: String },

    /// The response body could not be understood.
    #[error("Malformed provider response: {message}")]
    Decode { message: String },

    /// The provider refused to serve a user (used by offline providers).
    #[error("Provider unavailable for '{user}': {message}")]
    Unavailable { user: String, message: String },
}

/// Unified error type for all mutuals operations.
#[derive(Debug, Error, Diagnostic)]
pub enum MutualsError {
    /// Invalid, unreadable or incomplete configuration.
    #[error("Configuration error: {message}")]
    #[diagnostic(help("Check ~/.mutuals/config.toml or the MUTUALS_* environment variables"))]
    Config { message: String },

    /// Fetching social graph data failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Provider(#[from] ProviderError),

    /// The search was aborted before it could finish.
    #[error("Search cancelled: {message}")]
    Cancelled { message: String },

    /// Catch-all for miscellaneous errors.
    #[error("{message}")]
    Generic { message: String },
}
