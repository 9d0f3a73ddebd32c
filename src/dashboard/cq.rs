// src/dashboard/cq.rs — Competency question panels

use serde::Serialize;
use serde_json::Value;

use super::state::Sequencer;
use crate::api::types::CqResponse;

pub const CQ_COUNT: u8 = 10;
/// Rows shown per panel; the rest are only counted.
pub const CQ_PREVIEW_ROWS: usize = 5;
pub const CQ_ERROR_TEXT: &str = "Erro ao executar CQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CqStatus {
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CqField {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CqView {
    Idle,
    Loading,
    Success {
        total: usize,
        rows: Vec<Vec<CqField>>,
        /// Rows beyond the preview.
        remaining: usize,
    },
    /// The API answered with a non-success status.
    Rejected(String),
    /// The request itself failed.
    Failed(String),
}

impl CqView {
    pub fn from_response(response: &CqResponse) -> Self {
        if !response.is_success() {
            let message = response
                .error
                .clone()
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| CQ_ERROR_TEXT.to_string());
            return CqView::Rejected(message);
        }

        let all = response.rows();
        let rows = all
            .iter()
            .take(CQ_PREVIEW_ROWS)
            .map(row_fields)
            .collect();
        CqView::Success {
            total: all.len(),
            rows,
            remaining: all.len().saturating_sub(CQ_PREVIEW_ROWS),
        }
    }

    pub fn status(&self) -> CqStatus {
        match self {
            CqView::Idle => CqStatus::Idle,
            CqView::Loading => CqStatus::Loading,
            CqView::Success { .. } => CqStatus::Success,
            CqView::Rejected(_) | CqView::Failed(_) => CqStatus::Error,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CqPanel {
    pub number: u8,
    /// Result region visibility.
    pub expanded: bool,
    pub view: CqView,
    pub(crate) seq: Sequencer,
}

impl CqPanel {
    pub fn new(number: u8) -> Self {
        Self {
            number,
            expanded: false,
            view: CqView::Idle,
            seq: Sequencer::default(),
        }
    }

    pub fn status(&self) -> CqStatus {
        self.view.status()
    }
}

/// Results of the server-side batch run (`POST /cqs/all`).
#[derive(Debug, Clone, PartialEq)]
pub enum CqSummaryView {
    Idle,
    Loading,
    /// (CQ name, pretty JSON) in response order.
    Results(Vec<(String, String)>),
    Failed(String),
}

impl CqSummaryView {
    pub fn from_response(response: &Value) -> Self {
        let entries = response
            .get("results")
            .and_then(Value::as_object)
            .map(|results| {
                results
                    .iter()
                    .map(|(name, value)| (name.clone(), pretty_json(value)))
                    .collect()
            })
            .unwrap_or_default();
        CqSummaryView::Results(entries)
    }
}

fn row_fields(row: &Value) -> Vec<CqField> {
    match row {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| CqField {
                key: key.clone(),
                value: display_value(value),
            })
            .collect(),
        other => vec![CqField {
            key: "value".into(),
            value: display_value(other),
        }],
    }
}

/// Field value as shown in a result row.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    }
}

pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response(value: Value) -> CqResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_success_truncates_to_preview() {
        let rows: Vec<Value> = (1..=7).map(|i| json!({"curso": format!("C{i}")})).collect();
        let view = CqView::from_response(&response(json!({"status": "success", "results": rows})));
        match view {
            CqView::Success {
                total,
                rows,
                remaining,
            } => {
                assert_eq!(total, 7);
                assert_eq!(rows.len(), 5);
                assert_eq!(remaining, 2);
                assert_eq!(rows[0][0].value, "C1");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_fields_keep_response_order() {
        let view = CqView::from_response(&response(json!({
            "status": "success",
            "results": [{"zeta": 1, "alpha": "a", "tags": ["x", "y"], "extra": null}]
        })));
        let CqView::Success { rows, .. } = view else {
            panic!("expected success");
        };
        let keys: Vec<&str> = rows[0].iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "tags", "extra"]);
        assert_eq!(rows[0][2].value, "x,y");
        assert_eq!(rows[0][3].value, "null");
    }

    #[test]
    fn test_non_success_uses_error_field() {
        let view = CqView::from_response(&response(json!({"status": "error", "error": "SPARQL falhou"})));
        assert_eq!(view, CqView::Rejected("SPARQL falhou".into()));
        assert_eq!(view.status(), CqStatus::Error);

        let view = CqView::from_response(&response(json!({"detail": "boom"})));
        assert_eq!(view, CqView::Rejected(CQ_ERROR_TEXT.into()));
    }

    #[test]
    fn test_summary_entries_in_order() {
        let view = CqSummaryView::from_response(&json!({
            "status": "success",
            "results": {"CQ1": {"results": []}, "CQ2": {"results": [1]}}
        }));
        let CqSummaryView::Results(entries) = view else {
            panic!("expected results");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "CQ1");
        assert!(entries[1].1.contains("\"results\""));
    }
}
