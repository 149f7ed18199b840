//! Error taxonomy shared by the issue client and its capabilities.

use thiserror::Error;

/// Failures surfaced by [`crate::ApiClient::get_issue`].
///
/// The tag set is closed: callers distinguish causes by matching on the
/// variant, never by inspecting the message, which is diagnostic only.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport or authorisation failure reported by the HTTP capability.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The fetched body could not be decoded into an issue.
    #[error("decode error: {0}")]
    Decode(String),

    /// A unit of work delegated to the task runner failed.
    #[error("task error: {0}")]
    Task(String),
}

impl ApiError {
    /// Builds an [`ApiError::Http`] from any displayable message.
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Builds an [`ApiError::Decode`] from any displayable message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Builds an [`ApiError::Task`] from any displayable message.
    pub fn task(message: impl Into<String>) -> Self {
        Self::Task(message.into())
    }

    /// Borrows the diagnostic message carried by the variant.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Http(message) | Self::Decode(message) | Self::Task(message) => message,
        }
    }

    /// Short name of the failure kind, used in log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Decode(_) => "decode",
            Self::Task(_) => "task",
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}
