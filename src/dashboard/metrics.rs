// src/dashboard/metrics.rs — Metric display slots

use crate::api::types::MetricsSnapshot;
use crate::infra::config::MetricsConfig;

/// The nine metric slots, formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsDisplay {
    pub classes: String,
    pub properties: String,
    pub cqs: String,
    pub docs: String,
    pub agents_total: String,
    pub classified: String,
    pub realized: String,
    pub triples: String,
    pub inference: String,
}

impl MetricsDisplay {
    pub fn from_snapshot(m: &MetricsSnapshot, config: &MetricsConfig) -> Self {
        Self {
            classes: js_number(m.ontology.class_count),
            properties: js_number(m.ontology.property_count),
            cqs: format!(
                "{}/{}",
                js_number(m.ontology.cqs_passed),
                js_number(m.ontology.cqs_total)
            ),
            docs: js_number(m.rag.documents_indexed),
            agents_total: js_number(m.agents.total_agents),
            classified: format!(
                "{}/{}",
                js_number(m.reasoner.classes_classified),
                config.class_total
            ),
            realized: format!(
                "{}/{}",
                js_number(m.reasoner.individuals_realized),
                config.individual_total
            ),
            triples: format!("+{}", js_number(m.reasoner.triples_added)),
            inference: format!("{}%", js_number(m.reasoner.inference_rate_percent)),
        }
    }

    /// Shown before the first successful load.
    pub fn placeholder() -> Self {
        let dash = || "-".to_string();
        Self {
            classes: dash(),
            properties: dash(),
            cqs: dash(),
            docs: dash(),
            agents_total: dash(),
            classified: dash(),
            realized: dash(),
            triples: dash(),
            inference: dash(),
        }
    }

    /// (element id, label, value) for every slot, in display order.
    pub fn slots(&self) -> [(&'static str, &'static str, &str); 9] {
        [
            ("metric-classes", "Classes", self.classes.as_str()),
            ("metric-properties", "Propriedades", self.properties.as_str()),
            ("metric-cqs", "CQs Aprovadas", self.cqs.as_str()),
            ("metric-docs", "Documentos Indexados", self.docs.as_str()),
            ("metric-agents-total", "Agentes", self.agents_total.as_str()),
            ("metric-classified", "Classes Classificadas", self.classified.as_str()),
            ("metric-realized", "Indivíduos Realizados", self.realized.as_str()),
            ("metric-triples", "Triplas Inferidas", self.triples.as_str()),
            ("metric-inference", "Taxa de Inferência", self.inference.as_str()),
        ]
    }
}

/// Format a number the way a browser prints it: integral values drop the
/// fractional part.
pub fn js_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
