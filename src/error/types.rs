//! Custom error types with exit codes

use serde_json::Value;
use thiserror::Error;

/// Main error type for stacklet-admin operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PlatformError {
    /// Configuration Error - missing or invalid configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// No API token could be found in the environment or credentials file
    #[error("Authorization token not configured")]
    MissingToken,

    /// Snippet name not present in the registry
    #[error("Unknown snippet: {name}")]
    UnknownSnippet { name: String },

    /// Build Error - the request could not be built from the snippet and variables
    #[error("Build error: {message}")]
    Build { message: String },

    /// Invalid Input - command line values rejected before any request is sent
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Transport Error - connection, HTTP status or response decoding failure
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The API answered with an `errors` array
    #[error("API error: {errors}")]
    Api { errors: Value },

    /// The API token is no longer accepted
    #[error("The API token has expired, please login again")]
    TokenExpired,
}

impl PlatformError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::MissingToken => 2,
            Self::UnknownSnippet { .. } => 3,
            Self::Build { .. } => 4,
            Self::InvalidInput { .. } => 5,
            Self::Transport { .. } => 6,
            Self::Api { .. } => 7,
            Self::TokenExpired => 8,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown snippet error
    #[inline]
    pub fn unknown_snippet<S: Into<String>>(name: S) -> Self {
        Self::UnknownSnippet { name: name.into() }
    }

    /// Create a build error
    #[inline]
    pub fn build<S: Into<String>>(message: S) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    #[inline]
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a transport error
    #[inline]
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}
