//! Instrument and market-data endpoints

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{AssetClass, FxRate, Instrument, InstrumentPage, PriceBar};
use chrono::NaiveDate;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct InstrumentSearchParams {
    pub q: Option<String>,
    pub asset_class: Option<AssetClass>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

pub struct InstrumentApi {
    client: Arc<HttpClient>,
}

impl InstrumentApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn search(&self, params: &InstrumentSearchParams) -> Result<InstrumentPage> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(q) = &params.q {
            query.push(("q", q.clone()));
        }
        if let Some(asset_class) = params.asset_class {
            query.push(("assetClass", asset_class_param(asset_class)));
        }
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = params.size {
            query.push(("size", size.to_string()));
        }
        self.client.get("/v1/instruments/search", Some(&query)).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Instrument> {
        self.client
            .get(&format!("/v1/instruments/{}", id), None)
            .await
    }

    pub async fn list(&self, asset_class: Option<AssetClass>) -> Result<Vec<Instrument>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(asset_class) = asset_class {
            query.push(("assetClass", asset_class_param(asset_class)));
        }
        self.client.get("/v1/instruments", Some(&query)).await
    }

    pub async fn prices(
        &self,
        id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PriceBar>> {
        let query = [
            ("from", from.format("%Y-%m-%d").to_string()),
            ("to", to.format("%Y-%m-%d").to_string()),
        ];
        self.client
            .get(&format!("/v1/instruments/{}/prices", id), Some(&query))
            .await
    }

    pub async fn fx_rate(&self, base: &str, quote: &str) -> Result<FxRate> {
        let query = [("base", base.to_string()), ("quote", quote.to_string())];
        self.client.get("/v1/fx/rates", Some(&query)).await
    }
}

fn asset_class_param(asset_class: AssetClass) -> String {
    // Wire form is the SCREAMING_SNAKE_CASE serde name
    serde_json::to_value(asset_class)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
