// src/api/http.rs — reqwest implementation of the dashboard API

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::types::{CqResponse, MetricsSnapshot, QueryRequest, QueryResponse, ReasonerOp};
use super::DashboardApi;
use crate::infra::errors::DashboardError;

pub struct HttpApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpApiClient {
    /// `base_url` must already be resolved (see `Config::resolve_base_url`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, DashboardError> {
        tracing::debug!(path, "GET");
        let request = self.client.get(self.url(path));
        Self::send(path, request).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Option<&QueryRequest<'_>>,
    ) -> Result<T, DashboardError> {
        tracing::debug!(path, "POST");
        let mut request = self.client.post(self.url(path));
        if let Some(body) = body {
            request = request.json(body);
        }
        Self::send(path, request).await
    }

    /// Send and decode. The status code is not checked: error responses carry
    /// JSON bodies the dashboard renders like any other.
    async fn send<T: DeserializeOwned>(
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, DashboardError> {
        let response = request
            .send()
            .await
            .map_err(|e| DashboardError::transport(path, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, %status, "API returned an error status");
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DashboardError::transport(path, e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| DashboardError::decode(path, e.to_string()))
    }
}

#[async_trait]
impl DashboardApi for HttpApiClient {
    async fn metrics(&self) -> Result<MetricsSnapshot, DashboardError> {
        self.get("/metrics").await
    }

    async fn query(&self, query: &str) -> Result<QueryResponse, DashboardError> {
        self.post("/query", Some(&QueryRequest { query })).await
    }

    async fn run_cq(&self, number: u8) -> Result<CqResponse, DashboardError> {
        self.post(&format!("/cq/{number}"), None).await
    }

    async fn run_all_cqs(&self) -> Result<serde_json::Value, DashboardError> {
        self.post("/cqs/all", None).await
    }

    async fn reasoner(&self, op: ReasonerOp) -> Result<serde_json::Value, DashboardError> {
        self.post(&op.path(), None).await
    }

    async fn health(&self) -> Result<serde_json::Value, DashboardError> {
        self.get("/health").await
    }
}
