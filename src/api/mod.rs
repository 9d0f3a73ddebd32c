// src/api/mod.rs — Client seam for the ontology/RAG HTTP API

pub mod endpoint;
pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::infra::errors::DashboardError;
pub use http::HttpApiClient;
pub use types::{CqResponse, MetricsSnapshot, QueryResponse, ReasonerOp};

/// Every remote call the dashboard makes.
///
/// `Err` is reserved for transport failures (network errors, unreadable
/// bodies). Application-level failures arrive as `Ok` and are interpreted by
/// the dashboard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// GET /metrics
    async fn metrics(&self) -> Result<MetricsSnapshot, DashboardError>;

    /// POST /query
    async fn query(&self, query: &str) -> Result<QueryResponse, DashboardError>;

    /// POST /cq/{number}
    async fn run_cq(&self, number: u8) -> Result<CqResponse, DashboardError>;

    /// POST /cqs/all
    async fn run_all_cqs(&self) -> Result<serde_json::Value, DashboardError>;

    /// POST /reasoner/{op}
    async fn reasoner(&self, op: ReasonerOp) -> Result<serde_json::Value, DashboardError>;

    /// GET /health
    async fn health(&self) -> Result<serde_json::Value, DashboardError>;
}
