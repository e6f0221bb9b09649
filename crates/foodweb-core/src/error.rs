//! Error types for the foodweb client
//!
//! Every failure the client can report funnels into [`FoodwebError`]. Callers
//! that only want something to show the user call [`FoodwebError::message`];
//! callers that need to branch use [`FoodwebError::kind`].

use foodweb_session::StorageError;
use thiserror::Error;

/// Message used when the backend rejects a request without saying why
pub const DEFAULT_REQUEST_FAILED: &str = "request failed";

/// Result type alias for foodweb operations
pub type FoodwebResult<T> = Result<T, FoodwebError>;

/// Coarse classification of a [`FoodwebError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Http,
    Api,
    Unauthorized,
    Decode,
    Storage,
    Config,
    InvalidInput,
    Io,
}

/// Main error type for the foodweb client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FoodwebError {
    /// The request never produced a response (connect failure, timeout)
    #[error("{message}")]
    Transport { message: String, timed_out: bool },

    /// The server answered with a non-success HTTP status other than 401
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The envelope carried a code other than 200
    #[error("{message}")]
    Api { code: i64, message: String },

    /// The server answered 401; the session has already been torn down
    #[error("{message}")]
    Unauthorized { message: String },

    /// The response body could not be decoded into the expected type
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    /// Durable storage failed
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Invalid input errors
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// IO errors
    #[error("IO error: {message}")]
    Io { message: String },
}

impl FoodwebError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timed_out: false,
        }
    }

    /// Create a transport error for an expired deadline
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            timed_out: true,
        }
    }

    /// Create an HTTP status error using the axios-style wording
    pub fn http_status(status: u16) -> Self {
        Self::Http {
            status,
            message: format!("Request failed with status code {}", status),
        }
    }

    /// Create an application error from an envelope
    ///
    /// A missing or blank message falls back to [`DEFAULT_REQUEST_FAILED`].
    pub fn api(code: i64, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REQUEST_FAILED.to_string());
        Self::Api { code, message }
    }

    /// Create an unauthorized error
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: "Request failed with status code 401".to_string(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Human-readable message, suitable for a notification
    pub fn message(&self) -> &str {
        match self {
            Self::Transport { message, .. }
            | Self::Http { message, .. }
            | Self::Api { message, .. }
            | Self::Unauthorized { message }
            | Self::Decode { message }
            | Self::Storage { message }
            | Self::Config { message }
            | Self::InvalidInput { message }
            | Self::Io { message } => message,
        }
    }

    /// Classification of this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::Http,
            Self::Api { .. } => ErrorKind::Api,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::Storage { .. } => ErrorKind::Storage,
            Self::Config { .. } => ErrorKind::Config,
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Whether this error ended the session
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Prefix the message, keeping the kind
    ///
    /// Used by callers that re-word failures for a specific action, such as
    /// `upload failed: ...`.
    pub fn with_prefix(self, prefix: &str) -> Self {
        let prefixed = |m: String| format!("{}: {}", prefix, m);
        match self {
            Self::Transport { message, timed_out } => Self::Transport {
                message: prefixed(message),
                timed_out,
            },
            Self::Http { status, message } => Self::Http {
                status,
                message: prefixed(message),
            },
            Self::Api { code, message } => Self::Api {
                code,
                message: prefixed(message),
            },
            Self::Unauthorized { message } => Self::Unauthorized {
                message: prefixed(message),
            },
            Self::Decode { message } => Self::Decode {
                message: prefixed(message),
            },
            Self::Storage { message } => Self::Storage {
                message: prefixed(message),
            },
            Self::Config { message } => Self::Config {
                message: prefixed(message),
            },
            Self::InvalidInput { message } => Self::InvalidInput {
                message: prefixed(message),
            },
            Self::Io { message } => Self::Io {
                message: prefixed(message),
            },
        }
    }
}

impl From<std::io::Error> for FoodwebError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for FoodwebError {
    fn from(error: serde_json::Error) -> Self {
        Self::decode(error.to_string())
    }
}

impl From<StorageError> for FoodwebError {
    fn from(error: StorageError) -> Self {
        Self::storage(error.to_string())
    }
}
