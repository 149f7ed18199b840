//! Issue records returned by the tracker API.
//!
//! [`ApiIssue`] is the private deserialisation target for the wire payload and
//! converts into the public [`Issue`] domain type. Unrecognised payload fields
//! are ignored; only `title` is required.

use serde::Deserialize;

use super::error::ApiError;

/// Lifecycle state of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    /// The issue is still open.
    Open,
    /// The issue has been closed.
    Closed,
}

impl IssueState {
    /// Lower-case label matching the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// A single issue as seen by callers of [`crate::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue title.
    pub title: String,
    /// Issue number within its repository.
    pub number: Option<u64>,
    /// Markdown body, when present.
    pub body: Option<String>,
    /// Open or closed.
    pub state: Option<IssueState>,
    /// HTML URL for displaying to a user.
    pub html_url: Option<String>,
    /// Author login if present.
    pub author: Option<String>,
}

impl Issue {
    /// Decodes an issue from a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] when the body is not valid JSON or lacks
    /// a string `title`.
    pub fn from_json(body: &str) -> Result<Self, ApiError> {
        let api_issue: ApiIssue = serde_json::from_str(body)?;
        Ok(api_issue.into())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiIssue {
    pub(super) title: String,
    pub(super) number: Option<u64>,
    pub(super) body: Option<String>,
    pub(super) state: Option<IssueState>,
    pub(super) html_url: Option<String>,
    pub(super) user: Option<ApiUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct ApiUser {
    pub(super) login: Option<String>,
}

impl From<ApiIssue> for Issue {
    fn from(value: ApiIssue) -> Self {
        Self {
            title: value.title,
            number: value.number,
            body: value.body,
            state: value.state,
            html_url: value.html_url,
            author: value.user.and_then(|user| user.login),
        }
    }
}
