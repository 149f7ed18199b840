//! Maps HTTP responses onto [`ApiError`] for the reqwest capability.

use http::StatusCode;

use crate::github::error::ApiError;

/// Checks if a status indicates an authentication failure.
pub(super) const fn is_auth_failure(status: StatusCode) -> bool {
    matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
}

/// Extracts the `message` field GitHub includes in JSON error bodies.
pub(super) fn extract_github_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

/// Builds the error for a non-success response.
///
/// Authentication failures lead with the canonical reason phrase (for
/// example `Unauthorized`) so the message reads the same whichever service
/// produced it; other failures name the URL and status.
pub(super) fn map_status_error(url: &str, status: StatusCode, body: &str) -> ApiError {
    let detail = extract_github_message(body);

    if is_auth_failure(status) {
        let reason = status.canonical_reason().unwrap_or("Unauthorized");
        return ApiError::http(
            detail.map_or_else(|| reason.to_owned(), |message| format!("{reason}: {message}")),
        );
    }

    let message = detail.unwrap_or_else(|| "unknown error".to_owned());
    ApiError::http(format!("GET {url} failed with status {status}: {message}"))
}
