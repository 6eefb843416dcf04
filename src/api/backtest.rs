//! Backtest config and run endpoints

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{BacktestConfig, BacktestResult, BacktestRun};
use serde::Serialize;
use std::sync::Arc;

/// Either an existing config id or an inline config.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunBacktestRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_config: Option<BacktestConfig>,
}

impl RunBacktestRequest {
    pub fn for_config(config_id: impl Into<String>) -> Self {
        Self {
            config_id: Some(config_id.into()),
            inline_config: None,
        }
    }

    pub fn inline(config: BacktestConfig) -> Self {
        Self {
            config_id: None,
            inline_config: Some(config),
        }
    }
}

pub struct BacktestApi {
    client: Arc<HttpClient>,
}

impl BacktestApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn create_config(&self, config: &BacktestConfig) -> Result<BacktestConfig> {
        self.client.post("/v1/backtests/configs", config).await
    }

    pub async fn get_config(&self, id: &str) -> Result<BacktestConfig> {
        self.client
            .get(&format!("/v1/backtests/configs/{}", id), None)
            .await
    }

    pub async fn list_configs(&self) -> Result<Vec<BacktestConfig>> {
        self.client.get("/v1/backtests/configs", None).await
    }

    /// Start a run. The backend responds immediately with a RUNNING run;
    /// progress is observed by re-fetching its status.
    pub async fn run(&self, request: &RunBacktestRequest) -> Result<BacktestRun> {
        self.client.post("/v1/backtests/runs", request).await
    }

    pub async fn get_run(&self, run_id: &str) -> Result<BacktestRun> {
        self.client
            .get(&format!("/v1/backtests/runs/{}", run_id), None)
            .await
    }

    pub async fn get_results(&self, run_id: &str) -> Result<BacktestResult> {
        self.client
            .get(&format!("/v1/backtests/runs/{}/results", run_id), None)
            .await
    }

    pub async fn list_runs(&self, config_id: Option<&str>) -> Result<Vec<BacktestRun>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(config_id) = config_id {
            query.push(("configId", config_id.to_string()));
        }
        self.client.get("/v1/backtests/runs", Some(&query)).await
    }
}
