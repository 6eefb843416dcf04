//! Auth endpoints

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{AuthTokens, LoginResponse, User};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

pub struct AuthApi {
    client: Arc<HttpClient>,
}

impl AuthApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.client.post("/v1/auth/login", request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse> {
        self.client.post("/v1/auth/register", request).await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        self.client
            .post(
                "/v1/auth/refresh",
                &serde_json::json!({ "refreshToken": refresh_token }),
            )
            .await
    }

    pub async fn me(&self) -> Result<User> {
        self.client.get("/v1/auth/me", None).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.client.post_empty("/v1/auth/logout").await
    }
}
