use thiserror::Error;

/// The custom error type for the application.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from the sqlx library.
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A transport error talking to the language-model endpoint.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// No API credential is configured for the language-model provider.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// The language-model provider returned a failure response.
    #[error("Provider error: {0}")]
    Provider(String),

    /// A not found error (resource does not exist).
    #[error("Not found: {0}")]
    NotFound(String),

    /// An internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A type alias for `Result<T, Error>` to simplify function signatures.
pub type Result<T> = std::result::Result<T, Error>;
