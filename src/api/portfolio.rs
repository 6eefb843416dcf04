//! Portfolio endpoints

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{Portfolio, PortfolioTarget, PortfolioType, PortfolioWithTargets};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePortfolioRequest {
    pub name: String,
    pub base_currency: String,
    #[serde(rename = "type")]
    pub portfolio_type: PortfolioType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePortfolioRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
}

pub struct PortfolioApi {
    client: Arc<HttpClient>,
}

impl PortfolioApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn list(
        &self,
        group_id: Option<&str>,
        archived: Option<bool>,
    ) -> Result<Vec<Portfolio>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(group_id) = group_id {
            query.push(("groupId", group_id.to_string()));
        }
        if let Some(archived) = archived {
            query.push(("archived", archived.to_string()));
        }
        self.client.get("/v1/portfolios", Some(&query)).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<PortfolioWithTargets> {
        self.client
            .get(&format!("/v1/portfolios/{}", id), None)
            .await
    }

    pub async fn create(&self, request: &CreatePortfolioRequest) -> Result<Portfolio> {
        self.client.post("/v1/portfolios", request).await
    }

    pub async fn update(&self, id: &str, request: &UpdatePortfolioRequest) -> Result<Portfolio> {
        self.client
            .patch(&format!("/v1/portfolios/{}", id), request)
            .await
    }

    /// Delete (archive) a portfolio.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("/v1/portfolios/{}", id))
            .await
    }

    pub async fn get_targets(&self, id: &str) -> Result<Vec<PortfolioTarget>> {
        self.client
            .get(&format!("/v1/portfolios/{}/targets", id), None)
            .await
    }

    /// Replace the target set. With `normalize` the backend rescales the
    /// weights to sum to 1 before persisting.
    pub async fn update_targets(
        &self,
        id: &str,
        targets: &[PortfolioTarget],
        normalize: bool,
    ) -> Result<Vec<PortfolioTarget>> {
        let query = [("normalize", normalize.to_string())];
        self.client
            .put(
                &format!("/v1/portfolios/{}/targets", id),
                &serde_json::json!({ "targets": targets }),
                Some(&query),
            )
            .await
    }

    pub async fn clone_portfolio(&self, id: &str, new_name: &str) -> Result<Portfolio> {
        self.client
            .post(
                &format!("/v1/portfolios/{}/clone", id),
                &serde_json::json!({ "name": new_name }),
            )
            .await
    }
}
