//! Portfolio store

use crate::api::portfolio::{CreatePortfolioRequest, PortfolioApi, UpdatePortfolioRequest};
use crate::error::{ClientError, Result};
use crate::http::HttpClient;
use crate::stores::FlagGuard;
use crate::types::{Portfolio, PortfolioTarget, PortfolioWithTargets};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Key under which portfolios without a group are bucketed.
pub const UNGROUPED: &str = "ungrouped";

pub struct PortfolioStore {
    api: PortfolioApi,
    portfolios: RwLock<Vec<Portfolio>>,
    current: RwLock<Option<PortfolioWithTargets>>,
    loading: AtomicBool,
    error: RwLock<Option<String>>,
}

impl PortfolioStore {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            api: PortfolioApi::new(client),
            portfolios: RwLock::new(Vec::new()),
            current: RwLock::new(None),
            loading: AtomicBool::new(false),
            error: RwLock::new(None),
        }
    }

    pub fn portfolios(&self) -> Vec<Portfolio> {
        self.portfolios.read().clone()
    }

    pub fn current(&self) -> Option<PortfolioWithTargets> {
        self.current.read().clone()
    }

    pub fn portfolio_count(&self) -> usize {
        self.portfolios.read().len()
    }

    /// Portfolios bucketed by group id; the ungrouped bucket is always
    /// present.
    pub fn portfolios_by_group(&self) -> HashMap<String, Vec<Portfolio>> {
        let mut groups: HashMap<String, Vec<Portfolio>> = HashMap::new();
        groups.insert(UNGROUPED.to_string(), Vec::new());
        for portfolio in self.portfolios.read().iter() {
            let key = portfolio
                .group_id
                .clone()
                .unwrap_or_else(|| UNGROUPED.to_string());
            groups.entry(key).or_default().push(portfolio.clone());
        }
        groups
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }

    /// Fetch the non-archived portfolio list, optionally scoped to one
    /// group, replacing the cached list.
    pub async fn fetch_portfolios(&self, group_id: Option<&str>) -> Result<Vec<Portfolio>> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.list(group_id, Some(false)).await {
            Ok(portfolios) => {
                *self.portfolios.write() = portfolios.clone();
                Ok(portfolios)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn fetch_portfolio(&self, id: &str) -> Result<PortfolioWithTargets> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.get_by_id(id).await {
            Ok(portfolio) => {
                *self.current.write() = Some(portfolio.clone());
                Ok(portfolio)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Create a portfolio and prepend it to the cached list.
    pub async fn create_portfolio(&self, request: &CreatePortfolioRequest) -> Result<Portfolio> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.create(request).await {
            Ok(portfolio) => {
                self.portfolios.write().insert(0, portfolio.clone());
                Ok(portfolio)
            }
            Err(e) => self.fail(e),
        }
    }

    /// Update a portfolio, syncing the cached list entry and the current
    /// portfolio when they match.
    pub async fn update_portfolio(
        &self,
        id: &str,
        request: &UpdatePortfolioRequest,
    ) -> Result<Portfolio> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.update(id, request).await {
            Ok(updated) => {
                {
                    let mut portfolios = self.portfolios.write();
                    if let Some(slot) = portfolios.iter_mut().find(|p| p.id == id) {
                        *slot = updated.clone();
                    }
                }
                {
                    let mut current = self.current.write();
                    if let Some(current) = current.as_mut() {
                        if current.portfolio.id == id {
                            // Targets are preserved; only the portfolio
                            // fields change
                            current.portfolio = updated.clone();
                        }
                    }
                }
                Ok(updated)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn delete_portfolio(&self, id: &str) -> Result<()> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.delete(id).await {
            Ok(()) => {
                self.portfolios.write().retain(|p| p.id != id);
                let mut current = self.current.write();
                if current.as_ref().is_some_and(|c| c.portfolio.id == id) {
                    *current = None;
                }
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    /// Replace the target set server-side and sync it into the current
    /// portfolio when it matches.
    pub async fn update_targets(
        &self,
        portfolio_id: &str,
        targets: &[PortfolioTarget],
        normalize: bool,
    ) -> Result<Vec<PortfolioTarget>> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.update_targets(portfolio_id, targets, normalize).await {
            Ok(updated) => {
                let mut current = self.current.write();
                if let Some(current) = current.as_mut() {
                    if current.portfolio.id == portfolio_id {
                        current.targets = updated.clone();
                    }
                }
                Ok(updated)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn clone_portfolio(&self, id: &str, new_name: &str) -> Result<Portfolio> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.clone_portfolio(id, new_name).await {
            Ok(portfolio) => {
                self.portfolios.write().insert(0, portfolio.clone());
                Ok(portfolio)
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn clear_current(&self) {
        *self.current.write() = None;
    }

    fn fail<T>(&self, e: ClientError) -> Result<T> {
        *self.error.write() = Some(e.to_string());
        Err(e)
    }
}
