//! Valuation and performance store

use crate::api::valuation::{CompareRequest, PerformanceParams, ValuationApi};
use crate::error::{ClientError, Result};
use crate::http::HttpClient;
use crate::stores::FlagGuard;
use crate::types::{CompareResponse, PerformanceData, Valuation, ValuationMode};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Caches valuations and performance data per portfolio id.
pub struct ValuationStore {
    api: ValuationApi,
    valuations: DashMap<String, Valuation>,
    performance: DashMap<String, PerformanceData>,
    compare_result: RwLock<Option<CompareResponse>>,
    loading: AtomicBool,
    performance_loading: AtomicBool,
    error: RwLock<Option<String>>,
}

impl ValuationStore {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self {
            api: ValuationApi::new(client),
            valuations: DashMap::new(),
            performance: DashMap::new(),
            compare_result: RwLock::new(None),
            loading: AtomicBool::new(false),
            performance_loading: AtomicBool::new(false),
            error: RwLock::new(None),
        }
    }

    pub fn valuation(&self, portfolio_id: &str) -> Option<Valuation> {
        self.valuations.get(portfolio_id).map(|v| v.clone())
    }

    pub fn performance(&self, portfolio_id: &str) -> Option<PerformanceData> {
        self.performance.get(portfolio_id).map(|p| p.clone())
    }

    pub fn compare_result(&self) -> Option<CompareResponse> {
        self.compare_result.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn is_performance_loading(&self) -> bool {
        self.performance_loading.load(Ordering::SeqCst)
    }

    pub fn error(&self) -> Option<String> {
        self.error.read().clone()
    }

    pub async fn fetch_valuation(
        &self,
        portfolio_id: &str,
        mode: ValuationMode,
    ) -> Result<Valuation> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.get_valuation(portfolio_id, mode, None).await {
            Ok(valuation) => {
                self.valuations
                    .insert(portfolio_id.to_string(), valuation.clone());
                Ok(valuation)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn fetch_performance(
        &self,
        portfolio_id: &str,
        params: &PerformanceParams,
    ) -> Result<PerformanceData> {
        let _guard = FlagGuard::set(&self.performance_loading);
        *self.error.write() = None;

        match self.api.get_performance(portfolio_id, params).await {
            Ok(data) => {
                self.performance
                    .insert(portfolio_id.to_string(), data.clone());
                Ok(data)
            }
            Err(e) => self.fail(e),
        }
    }

    pub async fn compare(&self, request: &CompareRequest) -> Result<CompareResponse> {
        let _guard = FlagGuard::set(&self.loading);
        *self.error.write() = None;

        match self.api.compare(request).await {
            Ok(result) => {
                *self.compare_result.write() = Some(result.clone());
                Ok(result)
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn clear_compare(&self) {
        *self.compare_result.write() = None;
    }

    fn fail<T>(&self, e: ClientError) -> Result<T> {
        *self.error.write() = Some(e.to_string());
        Err(e)
    }
}
