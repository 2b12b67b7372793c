//! Error types for FerreMarket Admin
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

use crate::validation::FieldErrors;

/// Main error type for the application
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (file operations, etc.)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Transport-level HTTP failure
    #[snafu(display("HTTP error: {source}"))]
    Http { source: reqwest::Error },

    /// The backend answered with a non-success status
    #[snafu(display("Backend error ({status}): {message}"))]
    Backend { status: u16, message: String },

    /// No session, or the session was rejected
    #[snafu(display("Unauthorized: {message}"))]
    Unauthorized { message: String },

    /// A record referenced by id does not exist
    #[snafu(display("{entity} not found: {id}"))]
    NotFound { entity: &'static str, id: String },

    /// Form validation failed; one message per field
    #[snafu(display("Validation failed: {errors}"))]
    Validation { errors: FieldErrors },
}

impl Error {
    /// Whether this error came from talking to the backend (toast-worthy)
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Http { .. } | Error::Backend { .. } | Error::Unauthorized { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

impl From<reqwest::Error> for Error {
    fn from(source: reqwest::Error) -> Self {
        Error::Http { source }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::Validation { errors }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
