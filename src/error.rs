//! Central error types for RecBar.
//!
//! The gesture and routing core does not fail: malformed pointer
//! streams, taps outside any region and a missing control endpoint are all
//! handled in-band. These errors only surface at the outer API (config I/O,
//! wire-name parsing, host bridge resolution, endpoint delivery).
//! All errors implement `Serialize` so they can cross a host bridge as strings.

use serde::Serialize;
use thiserror::Error;

/// Main error type for RecBar operations.
#[derive(Error, Debug)]
pub enum RecBarError {
    /// Configuration could not be loaded or saved
    #[error("Config error: {0}")]
    Config(String),

    /// Filesystem operation failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Action name not known to this build
    #[error("Unrecognized action: '{name}'")]
    UnrecognizedAction { name: String },

    /// Notification trigger id not known to this build
    #[error("Unknown notification trigger: '{name}'")]
    UnknownTrigger { name: String },

    /// Host bridge command not implemented
    #[error("Unknown host command: '{name}'")]
    UnknownHostCommand { name: String },

    /// No registered host bridge under the given name (strict fallback)
    #[error("Control endpoint '{name}' is not registered")]
    EndpointUnavailable { name: String },

    /// The control endpoint rejected an action
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// The router's delivery worker has shut down
    #[error("Action router is closed")]
    RouterClosed,

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

/// Serialize as the display string for host bridge compatibility.
impl Serialize for RecBarError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for RecBarError {
    fn from(msg: String) -> Self {
        RecBarError::Other(msg)
    }
}

impl From<&str> for RecBarError {
    fn from(msg: &str) -> Self {
        RecBarError::Other(msg.to_string())
    }
}

/// Extension trait for adding context to Results.
///
/// # Example
/// ```ignore
/// use crate::error::{ResultExt, RecBarResult};
///
/// fn read_layout(path: &Path) -> RecBarResult<String> {
///     std::fs::read_to_string(path).context("failed to read layout file")
/// }
/// ```
pub trait ResultExt<T> {
    /// Add context to an error, converting it to RecBarError::Other.
    fn context(self, msg: &str) -> RecBarResult<T>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F: FnOnce() -> String>(self, f: F) -> RecBarResult<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn context(self, msg: &str) -> RecBarResult<T> {
        self.map_err(|e| RecBarError::Other(format!("{}: {}", msg, e)))
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> RecBarResult<T> {
        self.map_err(|e| RecBarError::Other(format!("{}: {}", f(), e)))
    }
}

/// Extension trait for adding context to Option types.
pub trait OptionExt<T> {
    /// Convert None to RecBarError::Other with the given message.
    fn context(self, msg: &str) -> RecBarResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, msg: &str) -> RecBarResult<T> {
        self.ok_or_else(|| RecBarError::Other(msg.to_string()))
    }
}

/// Type alias for Results using RecBarError.
pub type RecBarResult<T> = Result<T, RecBarError>;
