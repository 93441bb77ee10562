//! Error types for the Alpha Vantage client and the statement downloader

/// Errors produced while fetching or writing financial statements.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No API key was configured
    #[error("API key not set (export ALPHAVANTAGE_API_KEY or add it to .env)")]
    MissingApiKey,

    /// The HTTP request completed with a non-success status
    #[error("Alpha Vantage returned HTTP {status}: {message}")]
    Api {
        /// Value of the `X-Request-Id` header, if any
        request_id: Option<String>,
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Alpha Vantage answered 200 but the body is an error or rate-limit notice
    #[error("Alpha Vantage: {0}")]
    Provider(String),

    /// A statement kind name that is not one of the six supported kinds
    #[error("unknown statement kind: {0}")]
    UnknownStatement(String),

    /// A ticker symbol with characters outside `[A-Za-z0-9.-]`
    #[error("invalid ticker symbol: {0:?}")]
    InvalidSymbol(String),

    /// Transport error from reqwest
    #[cfg(feature = "reqwest")]
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// JSON parse error
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// DataFrame construction or CSV serialization failed
    #[error(transparent)]
    Polars(#[from] polars_core::error::PolarsError),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Any other failure
    #[error("{0}")]
    Custom(String),
}

/// Result alias using the crate [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
