//! Auth session store
//!
//! State machine over anonymous/authenticated. The session context owns
//! the tokens and user; this store orchestrates the login, register,
//! fetch-user and logout flows around it.

use crate::api::auth::{AuthApi, LoginRequest, RegisterRequest};
use crate::error::{ClientError, Result};
use crate::http::HttpClient;
use crate::session::SessionContext;
use crate::stores::FlagGuard;
use crate::types::{LoginResponse, User};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct AuthStore {
    api: AuthApi,
    session: Arc<SessionContext>,
    loading: AtomicBool,
    error: RwLock<Option<String>>,
}

impl AuthStore {
    pub fn new(client: Arc<HttpClient>) -> Self {
        let session = client.session().clone();
        Self {
            api: AuthApi::new(client),
            session,
            loading: AtomicBool::new(false),
            error: RwLock::new(None),
        }
    }

    /// `true` iff a user is held.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.session.user()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.login(request).await {
            Ok(response) => {
                self.session.set_tokens(&response.tokens)?;
                self.session.set_user(Some(response.user.clone()))?;
                tracing::info!("user {} logged in", response.user.email);
                Ok(response)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.register(request).await {
            Ok(response) => {
                self.session.set_tokens(&response.tokens)?;
                self.session.set_user(Some(response.user.clone()))?;
                tracing::info!("user {} registered", response.user.email);
                Ok(response)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Refresh the current user from the backend.
    ///
    /// Without an access token this is a local transition to anonymous,
    /// no network call. When the call fails but a refresh token is still
    /// held, the previously persisted user is retained so a transient
    /// failure does not log the user out mid-refresh; otherwise the
    /// session is discarded.
    pub async fn fetch_user(&self) -> Result<Option<User>> {
        if self.session.access_token().is_none() {
            if let Err(e) = self.session.set_user(None) {
                tracing::warn!("failed to persist user removal: {}", e);
            }
            return Ok(None);
        }

        let _guard = FlagGuard::set(&self.loading);

        match self.api.me().await {
            Ok(user) => {
                self.session.set_user(Some(user.clone()))?;
                Ok(Some(user))
            }
            Err(e) => {
                let retained = self.session.user();
                if retained.is_some() && self.session.refresh_token().is_some() {
                    // Keep the stale user; the interceptor refreshes the
                    // token on the next call
                    tracing::warn!("fetch_user failed, retaining persisted user: {}", e);
                    Ok(retained)
                } else {
                    tracing::warn!("fetch_user failed with no refresh token: {}", e);
                    self.logout();
                    Ok(None)
                }
            }
        }
    }

    /// Always succeeds: clears the user, both tokens and the persisted
    /// snapshot. No network call.
    pub fn logout(&self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!("failed to clear persisted session: {}", e);
        }
    }

    fn fail<T>(&self, e: ClientError) -> Result<T> {
        *self.error.write() = Some(e.to_string());
        Err(e)
    }
}
