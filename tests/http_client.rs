//! HTTP client core: bearer attachment, envelope unwrapping, and the
//! refresh-on-401 interceptor.

use portfolio_client::storage::MemoryStorage;
use portfolio_client::{ClientConfig, ClientError, HttpClient, SessionContext};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

struct NoAuthHeader;

impl wiremock::Match for NoAuthHeader {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

fn client_with_tokens(
    server: &MockServer,
    access: Option<&str>,
    refresh: Option<&str>,
) -> (Arc<HttpClient>, Arc<SessionContext>) {
    let storage = MemoryStorage::new();
    let session = Arc::new(SessionContext::new(Box::new(storage)));
    if let (Some(access), Some(refresh)) = (access, refresh) {
        session
            .set_tokens(&portfolio_client::types::AuthTokens {
                access_token: access.to_string(),
                refresh_token: refresh.to_string(),
            })
            .unwrap();
    }
    let config = ClientConfig::new(&server.uri()).unwrap();
    let client = Arc::new(HttpClient::new(&config, Arc::clone(&session)).unwrap());
    (client, session)
}

fn user_envelope() -> serde_json::Value {
    json!({
        "data": {"id": "u1", "email": "a@b.c", "displayName": "A", "locale": "ko"},
        "meta": {"timestamp": "2024-06-01T10:00:00"},
        "error": null
    })
}

fn error_envelope(code: &str, message: &str) -> serde_json::Value {
    json!({
        "data": null,
        "meta": {"timestamp": "2024-06-01T10:00:00"},
        "error": {"code": code, "message": message}
    })
}

#[tokio::test]
async fn attaches_bearer_header_when_token_held() {
    let server = MockServer::start().await;
    let (client, _session) = client_with_tokens(&server, Some("at-1"), Some("rt-1"));

    Mock::given(method("GET"))
        .and(path("/v1/auth/me"))
        .and(header("authorization", "Bearer at-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let user: portfolio_client::types::User = client.get("/v1/auth/me", None).await.unwrap();
    assert_eq!(user.id, "u1");
}

#[tokio::test]
async fn omits_bearer_header_when_anonymous() {
    let server = MockServer::start().await;
    let (client, _session) = client_with_tokens(&server, None, None);

    Mock::given(method("GET"))
        .and(path("/v1/instruments"))
        .and(NoAuthHeader)
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": [], "meta": null, "error": null})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let instruments: Vec<portfolio_client::types::Instrument> =
        client.get("/v1/instruments", None).await.unwrap();
    assert!(instruments.is_empty());
}

#[tokio::test]
async fn surfaces_envelope_error_with_backend_code() {
    let server = MockServer::start().await;
    let (client, _session) = client_with_tokens(&server, None, None);

    Mock::given(method("GET"))
        .and(path("/v1/portfolios/p1"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(error_envelope("PORTFOLIO_NOT_FOUND", "no such portfolio")),
        )
        .mount(&server)
        .await;

    let err = client
        .get::<portfolio_client::types::PortfolioWithTargets>("/v1/portfolios/p1", None)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "PORTFOLIO_NOT_FOUND");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn synthesizes_network_error_for_unreadable_body() {
    let server = MockServer::start().await;
    let (client, _session) = client_with_tokens(&server, None, None);

    Mock::given(method("GET"))
        .and(path("/v1/portfolios"))
        .respond_with(ResponseTemplate::new(500).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client
        .get::<Vec<portfolio_client::types::Portfolio>>("/v1/portfolios", None)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "NETWORK_ERROR");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn refreshes_once_on_401_and_retries_with_new_token() {
    let server = MockServer::start().await;
    let (client, session) = client_with_tokens(&server, Some("expired-at"), Some("rt-old"));

    Mock::given(method("GET"))
        .and(path("/v1/auth/me"))
        .and(header("authorization", "Bearer expired-at"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope("AUTH_TOKEN_EXPIRED", "access token expired")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .and(body_json(json!({"refreshToken": "rt-old"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "fresh-at", "refreshToken": "rt-new"},
            "meta": null,
            "error": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/auth/me"))
        .and(header("authorization", "Bearer fresh-at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let user: portfolio_client::types::User = client.get("/v1/auth/me", None).await.unwrap();
    assert_eq!(user.email, "a@b.c");

    // New tokens were persisted before the retry
    assert_eq!(session.access_token().as_deref(), Some("fresh-at"));
    assert_eq!(session.refresh_token().as_deref(), Some("rt-new"));
}

#[tokio::test]
async fn second_401_is_not_retried_again() {
    let server = MockServer::start().await;
    let (client, _session) = client_with_tokens(&server, Some("at-1"), Some("rt-1"));

    // Original request and the single retry both come back 401
    Mock::given(method("GET"))
        .and(path("/v1/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope("AUTH_TOKEN_EXPIRED", "still expired")),
        )
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"accessToken": "at-2", "refreshToken": "rt-2"},
            "meta": null,
            "error": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .get::<portfolio_client::types::User>("/v1/auth/me", None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn failed_refresh_clears_session() {
    let server = MockServer::start().await;
    let (client, session) = client_with_tokens(&server, Some("at-1"), Some("rt-dead"));

    Mock::given(method("GET"))
        .and(path("/v1/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope("AUTH_TOKEN_EXPIRED", "expired")),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope("AUTH_REFRESH_INVALID", "refresh token revoked")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .get::<portfolio_client::types::User>("/v1/auth/me", None)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::SessionExpired(_)));
    assert_eq!(err.error_code(), "SESSION_EXPIRED");
    assert!(session.access_token().is_none());
    assert!(session.refresh_token().is_none());
}

#[tokio::test]
async fn bare_401_propagates_without_refresh_token() {
    let server = MockServer::start().await;
    let (client, _session) = client_with_tokens(&server, None, None);

    Mock::given(method("GET"))
        .and(path("/v1/auth/me"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(error_envelope("AUTH_REQUIRED", "login required")),
        )
        .expect(1)
        .mount(&server)
        .await;

    // No refresh attempt must be made
    Mock::given(method("POST"))
        .and(path("/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = client
        .get::<portfolio_client::types::User>("/v1/auth/me", None)
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "AUTH_REQUIRED");
    assert_eq!(err.status(), Some(401));
}
