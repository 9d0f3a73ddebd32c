// src/api/types.rs — Wire types of the ontology/RAG API

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::infra::errors::DashboardError;

/// Request body for `POST /query`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    pub query: &'a str,
}

/// Response of `POST /query`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub response: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub agent: Option<String>,
    #[serde(default)]
    pub citations: Option<Citations>,
    /// Any truthy value marks an application-level failure.
    #[serde(default)]
    pub error: Value,
}

impl QueryResponse {
    pub fn is_error(&self) -> bool {
        is_truthy(&self.error)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Citations {
    #[serde(default)]
    pub documents: Vec<DocumentRef>,
    #[serde(default)]
    pub iris: Vec<IriRef>,
}

impl Citations {
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty() && self.iris.is_empty()
    }
}

/// A retrieved document: either a bare label or a structured chunk reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentRef {
    Label(String),
    Entry {
        #[serde(default, deserialize_with = "lenient_string")]
        source: Option<String>,
        #[serde(default, deserialize_with = "lenient_string")]
        chunk: Option<String>,
        #[serde(default, deserialize_with = "lenient_f64")]
        score: Option<f64>,
    },
    Other(Value),
}

impl DocumentRef {
    pub fn label(&self) -> &str {
        match self {
            DocumentRef::Label(s) => s,
            DocumentRef::Entry { source, chunk, .. } => source
                .as_deref()
                .filter(|s| !s.is_empty())
                .or(chunk.as_deref().filter(|s| !s.is_empty()))
                .unwrap_or("Documento"),
            DocumentRef::Other(_) => "Documento",
        }
    }

    pub fn score(&self) -> Option<f64> {
        match self {
            DocumentRef::Entry { score, .. } => *score,
            _ => None,
        }
    }
}

/// An ontology entity IRI, bare or wrapped as `{"iri": ...}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IriRef {
    Plain(String),
    Entry { iri: String },
    Other(Value),
}

impl IriRef {
    pub fn as_string(&self) -> String {
        match self {
            IriRef::Plain(s) | IriRef::Entry { iri: s } => s.clone(),
            IriRef::Other(v) => v.to_string(),
        }
    }
}

/// Response of `POST /cq/{n}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CqResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub error: Option<String>,
}

impl CqResponse {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Result rows; a missing or non-array `results` counts as no rows.
    pub fn rows(&self) -> &[Value] {
        self.results.as_array().map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Response of `GET /metrics`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MetricsSnapshot {
    pub ontology: OntologyMetrics,
    pub rag: RagMetrics,
    pub agents: AgentMetrics,
    pub reasoner: ReasonerMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OntologyMetrics {
    #[serde(rename = "classes")]
    pub class_count: f64,
    #[serde(rename = "properties")]
    pub property_count: f64,
    pub cqs_passed: f64,
    pub cqs_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RagMetrics {
    pub documents_indexed: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AgentMetrics {
    pub total_agents: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReasonerMetrics {
    pub classes_classified: f64,
    pub individuals_realized: f64,
    pub triples_added: f64,
    #[serde(rename = "inference_rate")]
    pub inference_rate_percent: f64,
}

/// Description-logic reasoner operations exposed under `/reasoner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReasonerOp {
    Classify,
    Consistency,
    Realize,
    Materialize,
    All,
}

impl ReasonerOp {
    pub const ALL: [ReasonerOp; 5] = [
        ReasonerOp::Classify,
        ReasonerOp::Consistency,
        ReasonerOp::Realize,
        ReasonerOp::Materialize,
        ReasonerOp::All,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReasonerOp::Classify => "classify",
            ReasonerOp::Consistency => "consistency",
            ReasonerOp::Realize => "realize",
            ReasonerOp::Materialize => "materialize",
            ReasonerOp::All => "all",
        }
    }

    pub fn path(&self) -> String {
        format!("/reasoner/{}", self.name())
    }
}

impl FromStr for ReasonerOp {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReasonerOp::ALL
            .into_iter()
            .find(|op| op.name() == s.to_ascii_lowercase())
            .ok_or_else(|| DashboardError::UnknownReasonerOp(s.to_string()))
    }
}

/// JavaScript truthiness, which is how the API signals flags like `error`.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Option::<Value>::deserialize(d)?.and_then(|v| v.as_f64()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_response_error_truthiness() {
        let r: QueryResponse = serde_json::from_value(json!({"error": true})).unwrap();
        assert!(r.is_error());
        let r: QueryResponse = serde_json::from_value(json!({"error": ""})).unwrap();
        assert!(!r.is_error());
        let r: QueryResponse = serde_json::from_value(json!({"response": "ok"})).unwrap();
        assert!(!r.is_error());
    }

    #[test]
    fn test_document_label_fallbacks() {
        let docs: Vec<DocumentRef> = serde_json::from_value(json!([
            "plain.pdf",
            {"source": "doc.pdf", "score": 0.5},
            {"chunk": "chunk-7"},
            {"score": 0.1},
            42
        ]))
        .unwrap();
        let labels: Vec<&str> = docs.iter().map(DocumentRef::label).collect();
        assert_eq!(
            labels,
            vec!["plain.pdf", "doc.pdf", "chunk-7", "Documento", "Documento"]
        );
        assert_eq!(docs[1].score(), Some(0.5));
        assert_eq!(docs[0].score(), None);
    }

    #[test]
    fn test_iri_entry_unwrapped() {
        let iris: Vec<IriRef> =
            serde_json::from_value(json!(["http://ex.org/A", {"iri": "http://ex.org/B"}]))
                .unwrap();
        assert_eq!(iris[0].as_string(), "http://ex.org/A");
        assert_eq!(iris[1].as_string(), "http://ex.org/B");
    }

    #[test]
    fn test_cq_rows_tolerate_missing_results() {
        let r: CqResponse = serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(r.is_success());
        assert!(r.rows().is_empty());
    }

    #[test]
    fn test_metrics_wire_names() {
        let m: MetricsSnapshot = serde_json::from_value(json!({
            "ontology": {"classes": 47, "properties": 88, "consistency": true,
                         "cqs_total": 10, "cqs_passed": 9},
            "rag": {"documents_indexed": 120, "vector_store_loaded": true},
            "agents": {"total_agents": 4, "agents": ["CoordinatorAgent"]},
            "reasoner": {"classes_classified": 40, "individuals_realized": 8,
                         "triples_added": 45, "inference_rate": 30.0},
            "system_status": "operational"
        }))
        .unwrap();
        assert_eq!(m.ontology.class_count, 47.0);
        assert_eq!(m.ontology.cqs_passed, 9.0);
        assert_eq!(m.reasoner.inference_rate_percent, 30.0);
    }

    #[test]
    fn test_reasoner_op_parse() {
        assert_eq!("Classify".parse::<ReasonerOp>().unwrap(), ReasonerOp::Classify);
        assert_eq!(ReasonerOp::Materialize.path(), "/reasoner/materialize");
        assert!("deduce".parse::<ReasonerOp>().is_err());
    }
}
