//! Portfolio Client - SDK for the portfolio management backend
//!
//! Client-side layer of the portfolio application: an authenticated
//! HTTP client with a refresh-on-401 interceptor, typed API modules for
//! every backend resource, and state stores for auth, portfolios,
//! valuations and backtest runs (including run-status polling).

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod logging;
pub mod session;
pub mod storage;
pub mod stores;
pub mod targets;
pub mod types;

pub use config::ClientConfig;
pub use error::{ApiError, ClientError, Result};
pub use http::HttpClient;
pub use session::SessionContext;

use api::{GroupApi, InstrumentApi, TransactionApi};
use std::sync::Arc;
use storage::{FileStorage, SessionStorage};
use stores::{AuthStore, BacktestStore, PortfolioStore, ValuationStore};

/// Everything a front end needs, wired to one session.
///
/// Owns the session context, the HTTP client and the per-domain stores.
/// Resources without store-level state (instruments, transactions,
/// groups) are exposed as their API modules directly.
pub struct PortfolioClient {
    session: Arc<SessionContext>,
    pub http: Arc<HttpClient>,
    pub auth: AuthStore,
    pub portfolios: PortfolioStore,
    pub valuations: ValuationStore,
    pub backtests: Arc<BacktestStore>,
    pub instruments: InstrumentApi,
    pub transactions: TransactionApi,
    pub groups: GroupApi,
}

impl PortfolioClient {
    /// Build a client over an explicit storage backend, restoring any
    /// persisted session.
    pub fn new(config: ClientConfig, storage: Box<dyn SessionStorage>) -> Result<Self> {
        let session = Arc::new(SessionContext::restore(storage)?);
        let http = Arc::new(HttpClient::new(&config, Arc::clone(&session))?);

        tracing::info!("portfolio client targeting {}", config.base_url);

        Ok(Self {
            auth: AuthStore::new(Arc::clone(&http)),
            portfolios: PortfolioStore::new(Arc::clone(&http)),
            valuations: ValuationStore::new(Arc::clone(&http)),
            backtests: Arc::new(BacktestStore::new(Arc::clone(&http))),
            instruments: InstrumentApi::new(Arc::clone(&http)),
            transactions: TransactionApi::new(Arc::clone(&http)),
            groups: GroupApi::new(Arc::clone(&http)),
            session,
            http,
        })
    }

    /// Client configured from the environment with file-backed session
    /// storage in the platform config directory.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        let storage = FileStorage::in_default_dir()?;
        Self::new(config, Box::new(storage))
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }
}
