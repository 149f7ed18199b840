//! Integration tests for the reqwest-backed HTTP capability.

use std::sync::Arc;

use issue_courier::{
    ApiClient, ApiError, BlockingTaskRunner, HttpClient, ReqwestHttpClient,
    ReqwestHttpClientConfig, StaticCredentials,
};
use rstest::{fixture, rstest};
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ISSUE_PATH: &str = "/repos/mozilla/uniffi-rs/issues/2017";

#[fixture]
fn http_client() -> ReqwestHttpClient {
    ReqwestHttpClient::new(&ReqwestHttpClientConfig::default())
        .expect("reqwest client should build")
}

fn issue_body() -> serde_json::Value {
    json!({
        "number": 2017,
        "title": "Foreign-implemented async traits",
        "state": "open",
        "html_url": "https://github.com/mozilla/uniffi-rs/issues/2017",
        "user": { "login": "bendk" },
        "reactions": { "+1": 4 }
    })
}

async fn mount_issue(server: &MockServer, auth_header: &str) {
    Mock::given(method("GET"))
        .and(path(ISSUE_PATH))
        .and(header("authorization", auth_header))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_body()))
        .mount(server)
        .await;
}

#[rstest]
#[tokio::test]
async fn sends_user_password_credentials_as_basic_auth(http_client: ReqwestHttpClient) {
    let server = MockServer::start().await;
    mount_issue(&server, "Basic dXNlcm5hbWU6cGFzc3dvcmQ=").await;

    let body = http_client
        .fetch(&format!("{}{ISSUE_PATH}", server.uri()), "username:password")
        .await
        .expect("fetch should succeed");

    assert!(body.contains("Foreign-implemented async traits"), "unexpected body: {body}");
}

#[rstest]
#[tokio::test]
async fn sends_bare_token_as_bearer_auth(http_client: ReqwestHttpClient) {
    let server = MockServer::start().await;
    mount_issue(&server, "Bearer ghp_example").await;

    let result = http_client
        .fetch(&format!("{}{ISSUE_PATH}", server.uri()), "ghp_example")
        .await;

    assert!(result.is_ok(), "expected success, got {result:?}");
}

#[rstest]
#[tokio::test]
async fn empty_credentials_send_no_authorization_header(http_client: ReqwestHttpClient) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ISSUE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(issue_body()))
        .mount(&server)
        .await;

    let result = http_client
        .fetch(&format!("{}{ISSUE_PATH}", server.uri()), "")
        .await;
    let requests = server
        .received_requests()
        .await
        .expect("request recording should be enabled");

    assert!(result.is_ok(), "expected success, got {result:?}");
    assert_eq!(requests.len(), 1, "expected exactly one request");
    assert!(
        requests
            .iter()
            .all(|request| !request.headers.contains_key("authorization")),
        "anonymous request should not authenticate"
    );
}

#[rstest]
#[tokio::test]
async fn unauthorised_response_maps_to_http_error(http_client: ReqwestHttpClient) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(ISSUE_PATH))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Bad credentials" })),
        )
        .mount(&server)
        .await;

    let result = http_client
        .fetch(&format!("{}{ISSUE_PATH}", server.uri()), "wrong:wrong")
        .await;

    assert_eq!(result, Err(ApiError::http("Unauthorized: Bad credentials")));
}

#[rstest]
#[tokio::test]
async fn missing_issue_maps_to_http_error_naming_url(http_client: ReqwestHttpClient) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;
    let url = format!("{}/repos/mozilla/uniffi-rs/issues/1", server.uri());

    let result = http_client.fetch(&url, "username:password").await;

    assert!(
        matches!(&result, Err(ApiError::Http(message)) if message.contains(&url) && message.contains("404")),
        "expected Http error naming {url}, got {result:?}"
    );
}

#[rstest]
#[tokio::test]
async fn unreachable_server_maps_to_http_error(http_client: ReqwestHttpClient) {
    let server = MockServer::start().await;
    let url = format!("{}{ISSUE_PATH}", server.uri());
    drop(server);

    let result = http_client.fetch(&url, "username:password").await;

    assert!(
        matches!(result, Err(ApiError::Http(_))),
        "expected Http error, got {result:?}"
    );
}

#[rstest]
#[tokio::test]
async fn api_client_fetches_issue_over_http(http_client: ReqwestHttpClient) {
    let server = MockServer::start().await;
    mount_issue(&server, "Basic dXNlcm5hbWU6cGFzc3dvcmQ=").await;
    let api_base = Url::parse(&server.uri()).expect("mock server URI should parse");
    let client = ApiClient::new(Arc::new(http_client), Arc::new(BlockingTaskRunner::unbounded()))
        .with_api_base(&api_base)
        .with_credentials(Arc::new(StaticCredentials::new("username:password")));

    let issue = client
        .get_issue("mozilla", "uniffi-rs", 2017)
        .await
        .expect("issue should load");

    assert_eq!(issue.title, "Foreign-implemented async traits");
    assert_eq!(issue.author.as_deref(), Some("bendk"));
}
