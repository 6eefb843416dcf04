//! HTTP client core
//!
//! Builds outgoing requests against the backend base URL, attaches the
//! bearer token when one is held, unwraps the `{ data, meta, error }`
//! response envelope, and performs exactly one refresh-and-retry cycle
//! when a request comes back 401.

use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, Result};
use crate::session::SessionContext;
use crate::types::{ApiResponse, AuthTokens};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

const REFRESH_PATH: &str = "/v1/auth/refresh";

/// Query parameters as name/value pairs. `None` values are omitted by
/// the API modules before they get here.
pub type Query<'a> = &'a [(&'a str, String)];

/// Authenticated HTTP client over the backend API.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: Url,
    session: Arc<SessionContext>,
}

impl HttpClient {
    pub fn new(config: &ClientConfig, session: Arc<SessionContext>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            session,
        })
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Resolve a path like `/v1/portfolios` against the base URL.
    /// Plain concatenation: the base may carry a path prefix (`/api`)
    /// that `Url::join` would drop for absolute paths.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined)
            .map_err(|e| ClientError::Config(format!("invalid endpoint '{}': {}", joined, e)))
    }

    /// Send a request and unwrap the envelope's `data`.
    ///
    /// On a 401 the stored refresh token is exchanged for new tokens,
    /// which are persisted before the original request is re-sent once;
    /// a 401 on the retried request propagates. A failed refresh clears
    /// the session and surfaces as [`ClientError::SessionExpired`].
    ///
    /// Concurrent requests that each hit a 401 refresh independently;
    /// there is no single-flight coordination, and the last refresh to
    /// persist wins.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        query: Option<Query<'_>>,
    ) -> Result<T> {
        match self.dispatch(method.clone(), path, body.as_ref(), query).await {
            Err(ClientError::Api(err)) if err.status == Some(StatusCode::UNAUTHORIZED.as_u16()) => {
                let Some(refresh_token) = self.session.refresh_token() else {
                    // Nothing to refresh with; the 401 stands
                    return Err(ClientError::Api(err));
                };

                match self.refresh(refresh_token).await {
                    Ok(()) => {
                        tracing::debug!("token refreshed, retrying {} {}", method, path);
                        self.dispatch(method, path, body.as_ref(), query).await
                    }
                    Err(refresh_err) => {
                        tracing::warn!("token refresh failed: {}", refresh_err);
                        if let Err(e) = self.session.clear() {
                            tracing::warn!("failed to clear session: {}", e);
                        }
                        Err(ClientError::SessionExpired(Box::new(refresh_err)))
                    }
                }
            }
            other => other,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<Query<'_>>,
    ) -> Result<T> {
        self.request(Method::GET, path, None, query).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?), None)
            .await
    }

    /// POST with an empty body (logout, void, clone-style actions).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::POST, path, None, None).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        query: Option<Query<'_>>,
    ) -> Result<T> {
        self.request(Method::PUT, path, Some(serde_json::to_value(body)?), query)
            .await
    }

    pub async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        self.request(Method::PATCH, path, Some(serde_json::to_value(body)?), None)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::DELETE, path, None, None).await
    }

    /// One send without any interception.
    async fn dispatch<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
        query: Option<Query<'_>>,
    ) -> Result<T> {
        let url = self.endpoint(path)?;
        let mut request = self.client.request(method, url);

        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = self.session.access_token() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Self::unwrap_envelope(response).await
    }

    /// Unwrap `{ data, meta, error }`, surfacing the envelope error when
    /// present and synthesizing `NETWORK_ERROR` when the body is
    /// unreadable.
    async fn unwrap_envelope<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();

        let envelope: ApiResponse<T> = match response.json().await {
            Ok(envelope) => envelope,
            Err(e) => {
                return Err(ClientError::Api(ApiError {
                    code: "NETWORK_ERROR".to_string(),
                    message: format!("response body unavailable: {}", e),
                    details: None,
                    status: Some(status.as_u16()),
                }));
            }
        };

        if let Some(mut error) = envelope.error {
            error.status = Some(status.as_u16());
            return Err(ClientError::Api(error));
        }

        if !status.is_success() {
            return Err(ClientError::Api(ApiError {
                code: "NETWORK_ERROR".to_string(),
                message: format!("request failed with status {}", status),
                details: None,
                status: Some(status.as_u16()),
            }));
        }

        match envelope.data {
            Some(data) => Ok(data),
            // Endpoints with no payload deserialize `T` from null
            None => serde_json::from_value(serde_json::Value::Null).map_err(ClientError::from),
        }
    }

    /// Exchange the refresh token for a new token pair and persist it.
    /// Sent without a bearer header and never retried.
    async fn refresh(&self, refresh_token: String) -> Result<()> {
        let url = self.endpoint(REFRESH_PATH)?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "refreshToken": refresh_token }))
            .send()
            .await?;

        let tokens: AuthTokens = Self::unwrap_envelope(response).await?;
        self.session.set_tokens(&tokens)?;
        Ok(())
    }
}
