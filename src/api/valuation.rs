//! Valuation, performance and comparison endpoints

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{
    CompareResponse, CurrencyMode, FrequencyType, MetricType, PerformanceData, Valuation,
    ValuationMode,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PerformanceParams {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub metric: Option<MetricType>,
    pub frequency: Option<FrequencyType>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    pub portfolio_ids: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmarks: Option<Vec<String>>,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub metric: MetricType,
    pub currency_mode: CurrencyMode,
}

pub struct ValuationApi {
    client: Arc<HttpClient>,
}

impl ValuationApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn get_valuation(
        &self,
        portfolio_id: &str,
        mode: ValuationMode,
        as_of: Option<NaiveDateTime>,
    ) -> Result<Valuation> {
        let mut query: Vec<(&str, String)> = vec![("mode", enum_param(&mode))];
        if let Some(as_of) = as_of {
            query.push(("as_of", as_of.format("%Y-%m-%dT%H:%M:%S").to_string()));
        }
        self.client
            .get(
                &format!("/v1/portfolios/{}/valuation", portfolio_id),
                Some(&query),
            )
            .await
    }

    pub async fn get_performance(
        &self,
        portfolio_id: &str,
        params: &PerformanceParams,
    ) -> Result<PerformanceData> {
        let mut query: Vec<(&str, String)> = vec![
            ("from", params.from.format("%Y-%m-%d").to_string()),
            ("to", params.to.format("%Y-%m-%d").to_string()),
        ];
        if let Some(metric) = &params.metric {
            query.push(("metric", enum_param(metric)));
        }
        if let Some(frequency) = &params.frequency {
            query.push(("frequency", enum_param(frequency)));
        }
        self.client
            .get(
                &format!("/v1/portfolios/{}/performance", portfolio_id),
                Some(&query),
            )
            .await
    }

    pub async fn compare(&self, request: &CompareRequest) -> Result<CompareResponse> {
        self.client.post("/v1/compare/performance", request).await
    }
}

fn enum_param<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
