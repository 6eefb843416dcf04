//! Portfolio group endpoints

use crate::error::Result;
use crate::http::HttpClient;
use crate::types::PortfolioGroup;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGroupRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i32>,
}

pub struct GroupApi {
    client: Arc<HttpClient>,
}

impl GroupApi {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<PortfolioGroup>> {
        self.client.get("/v1/portfolio-groups", None).await
    }

    pub async fn create(&self, request: &CreateGroupRequest) -> Result<PortfolioGroup> {
        self.client.post("/v1/portfolio-groups", request).await
    }

    pub async fn update(&self, id: &str, request: &UpdateGroupRequest) -> Result<PortfolioGroup> {
        self.client
            .patch(&format!("/v1/portfolio-groups/{}", id), request)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        self.client
            .delete(&format!("/v1/portfolio-groups/{}", id))
            .await
    }
}
