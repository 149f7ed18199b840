//! Behavioural tests for fetching an issue through fake capabilities.

use std::sync::Arc;

use issue_courier::github::test_support::{FakeHttpClient, ThreadTaskRunner, issue_payload};
use issue_courier::{ApiClient, ApiError, Issue, StaticCredentials};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use tokio::runtime::Runtime;

#[derive(ScenarioState, Default)]
struct FetchState {
    served_url: Slot<String>,
    served_title: Slot<String>,
    credentials: Slot<String>,
    issue: Slot<Issue>,
    error: Slot<ApiError>,
}

#[fixture]
fn fetch_state() -> FetchState {
    FetchState::default()
}

fn unquote(value: &str) -> String {
    value.trim_matches('"').to_owned()
}

fn step_failure(message: impl Into<String>) -> ApiError {
    ApiError::task(message)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a fake tracker serving issue {number:u64} of {owner} {repo} titled {title}")]
fn seed_tracker(fetch_state: &FetchState, number: u64, owner: String, repo: String, title: String) {
    fetch_state.served_url.set(format!(
        "https://api.github.com/repos/{}/{}/issues/{number}",
        unquote(&owner),
        unquote(&repo)
    ));
    fetch_state.served_title.set(unquote(&title));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("the client credentials are {credentials}")]
fn remember_credentials(fetch_state: &FetchState, credentials: String) {
    fetch_state.credentials.set(unquote(&credentials));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("the client fetches issue {number:u64} of {owner} {repo}")]
fn fetch_issue(
    fetch_state: &FetchState,
    number: u64,
    owner: String,
    repo: String,
) -> Result<(), ApiError> {
    let served_url = fetch_state
        .served_url
        .get()
        .ok_or_else(|| step_failure("tracker not seeded"))?;
    let served_title = fetch_state
        .served_title
        .get()
        .ok_or_else(|| step_failure("tracker title missing"))?;
    let credentials = fetch_state
        .credentials
        .get()
        .ok_or_else(|| step_failure("credentials not set"))?;

    let http = FakeHttpClient::new("username:password")
        .with_route(served_url, issue_payload(2017, &served_title));
    let client = ApiClient::new(Arc::new(http), Arc::new(ThreadTaskRunner))
        .with_credentials(Arc::new(StaticCredentials::new(credentials)));

    let runtime = Runtime::new()
        .map_err(|error| step_failure(format!("failed to create Tokio runtime: {error}")))?;
    let result = runtime.block_on(client.get_issue(&unquote(&owner), &unquote(&repo), number));

    match result {
        Ok(issue) => {
            drop(fetch_state.error.take());
            fetch_state.issue.set(issue);
        }
        Err(error) => {
            drop(fetch_state.issue.take());
            fetch_state.error.set(error);
        }
    }

    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the issue title is {expected}")]
fn assert_title(fetch_state: &FetchState, expected: String) -> Result<(), ApiError> {
    let expected_title = unquote(&expected);
    let actual = fetch_state
        .issue
        .with_ref(|issue| issue.title.clone())
        .ok_or_else(|| step_failure("expected an issue but the fetch failed"))?;

    if actual == expected_title {
        Ok(())
    } else {
        Err(step_failure(format!(
            "expected title {expected_title} but found {actual}"
        )))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the request fails with an HTTP error {expected}")]
fn assert_http_error(fetch_state: &FetchState, expected: String) -> Result<(), ApiError> {
    let error = fetch_state
        .error
        .with_ref(Clone::clone)
        .ok_or_else(|| step_failure("expected an error but the fetch succeeded"))?;

    if error == ApiError::http(unquote(&expected)) {
        Ok(())
    } else {
        Err(step_failure(format!("unexpected error: {error:?}")))
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the HTTP error mentions {fragment}")]
fn assert_http_error_mentions(fetch_state: &FetchState, fragment: String) -> Result<(), ApiError> {
    let expected_fragment = unquote(&fragment);
    let error = fetch_state
        .error
        .with_ref(Clone::clone)
        .ok_or_else(|| step_failure("expected an error but the fetch succeeded"))?;

    match error {
        ApiError::Http(message) if message.contains(&expected_fragment) => Ok(()),
        other => Err(step_failure(format!(
            "expected Http error mentioning {expected_fragment}, got {other:?}"
        ))),
    }
}

#[scenario(path = "tests/features/issue_fetch.feature", index = 0)]
fn fetch_with_accepted_credentials(fetch_state: FetchState) {
    let _ = fetch_state;
}

#[scenario(path = "tests/features/issue_fetch.feature", index = 1)]
fn reject_mismatched_credentials(fetch_state: FetchState) {
    let _ = fetch_state;
}

#[scenario(path = "tests/features/issue_fetch.feature", index = 2)]
fn request_unserved_issue(fetch_state: FetchState) {
    let _ = fetch_state;
}
