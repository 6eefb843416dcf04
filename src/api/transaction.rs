//! Transaction endpoints

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Transaction, TransactionLeg, TransactionType};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    pub occurred_at: NaiveDateTime,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub legs: Vec<TransactionLeg>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub transaction_type: Option<TransactionType>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

pub struct TransactionApi {
    client: Arc<HttpClient>,
}

impl TransactionApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        portfolio_id: &str,
        params: &TransactionListParams,
    ) -> Result<Vec<Transaction>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(page) = params.page {
            query.push(("page", page.to_string()));
        }
        if let Some(size) = params.size {
            query.push(("size", size.to_string()));
        }
        if let Some(transaction_type) = params.transaction_type {
            let wire = serde_json::to_value(transaction_type)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            query.push(("type", wire));
        }
        if let Some(from) = params.from {
            query.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = params.to {
            query.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        self.client
            .get(
                &format!("/v1/portfolios/{}/transactions", portfolio_id),
                Some(&query),
            )
            .await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Transaction> {
        self.client
            .get(&format!("/v1/transactions/{}", id), None)
            .await
    }

    pub async fn create(
        &self,
        portfolio_id: &str,
        request: &CreateTransactionRequest,
    ) -> Result<Transaction> {
        self.client
            .post(
                &format!("/v1/portfolios/{}/transactions", portfolio_id),
                request,
            )
            .await
    }

    /// Void a posted transaction. The backend keeps it with VOID status.
    pub async fn void(&self, id: &str) -> Result<Transaction> {
        self.client
            .post_empty(&format!("/v1/transactions/{}/void", id))
            .await
    }
}
