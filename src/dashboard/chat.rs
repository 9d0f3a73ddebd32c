// src/dashboard/chat.rs — Chat log and citation display

use serde::Serialize;

use crate::api::types::{Citations, DocumentRef};

/// IRIs longer than this are shortened for display (the link keeps the full IRI).
pub const IRI_DISPLAY_LIMIT: usize = 60;

pub const USER_LABEL: &str = "Você";
pub const SYSTEM_LABEL: &str = "Sistema";
pub const LOADING_TEXT: &str = "Analisando sua consulta e buscando informações relevantes...";
pub const NO_ANSWER_TEXT: &str = "Sem resposta";
pub const QUERY_ERROR_TEXT: &str = "Erro ao processar consulta";

/// Suggested questions offered on the home tab.
pub const EXAMPLE_QUERIES: [&str; 4] = [
    "Quais cursos estão disponíveis e quem são os professores?",
    "Quais são os pré-requisitos do curso de Ontologias?",
    "Que recursos de acessibilidade existem nos módulos?",
    "Quais competências são desenvolvidas em cada curso?",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Error,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Error => "error",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    /// `msg-{n}`, strictly increasing in creation order.
    pub id: String,
    pub role: Role,
    pub author: String,
    pub text: String,
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    pub citations: Option<Citations>,
    /// Placeholder shown while a query is in flight.
    pub loading: bool,
}

/// Append-only chat transcript. Only the loading placeholder is ever removed
/// individually; everything else goes with `clear`.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl ChatLog {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, text: &str) -> String {
        self.push(Role::User, USER_LABEL, text, None, false)
    }

    pub fn push_loading(&mut self) -> String {
        self.push(Role::Assistant, SYSTEM_LABEL, LOADING_TEXT, None, true)
    }

    pub fn push_assistant(
        &mut self,
        author: &str,
        text: &str,
        citations: Option<Citations>,
    ) -> String {
        self.push(Role::Assistant, author, text, citations, false)
    }

    pub fn push_error(&mut self, text: &str) -> String {
        self.push(Role::Error, "", text, None, false)
    }

    /// Remove a message by id. Returns false if it was already gone.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| m.id != id);
        self.messages.len() != before
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn push(
        &mut self,
        role: Role,
        author: &str,
        text: &str,
        citations: Option<Citations>,
        loading: bool,
    ) -> String {
        self.next_id += 1;
        let id = format!("msg-{}", self.next_id);
        self.messages.push(ChatMessage {
            id: id.clone(),
            role,
            author: author.to_string(),
            text: text.to_string(),
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            citations,
            loading,
        });
        id
    }
}

// ── Citation display ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DocumentLine {
    pub label: String,
    /// Relevance as a percentage, e.g. `87.3%`.
    pub score: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IriLine {
    pub href: String,
    pub short: String,
}

/// Display-ready citations, shared by the HTML and terminal renderers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CitationView {
    pub documents: Vec<DocumentLine>,
    pub iris: Vec<IriLine>,
}

impl CitationView {
    /// `None` when there is nothing to show.
    pub fn build(citations: &Citations) -> Option<Self> {
        if citations.is_empty() {
            return None;
        }
        let documents = citations
            .documents
            .iter()
            .map(|doc: &DocumentRef| DocumentLine {
                label: doc.label().to_string(),
                // Zero counts as no score.
                score: doc
                    .score()
                    .filter(|s| *s != 0.0 && !s.is_nan())
                    .map(format_score),
            })
            .collect();
        let iris = citations
            .iris
            .iter()
            .map(|iri| {
                let href = iri.as_string();
                IriLine {
                    short: shorten_iri(&href),
                    href,
                }
            })
            .collect();
        Some(Self { documents, iris })
    }
}

/// Relevance score in [0,1] as a one-decimal percentage.
pub fn format_score(score: f64) -> String {
    format!("{:.1}%", score * 100.0)
}

pub fn shorten_iri(iri: &str) -> String {
    if iri.chars().count() > IRI_DISPLAY_LIMIT {
        let head: String = iri.chars().take(IRI_DISPLAY_LIMIT).collect();
        format!("{head}...")
    } else {
        iri.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ids_increase_and_stay_unique_after_removal() {
        let mut log = ChatLog::default();
        let a = log.push_user("oi");
        let b = log.push_loading();
        assert!(log.remove(&b));
        let c = log.push_assistant("Sistema", "olá", None);
        assert_eq!(a, "msg-1");
        assert_eq!(c, "msg-3");
        assert!(!log.remove(&b));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(0.873), "87.3%");
        assert_eq!(format_score(1.0), "100.0%");
        assert_eq!(format_score(0.0), "0.0%");
    }

    #[test]
    fn test_shorten_iri() {
        let long = format!("http://ex.org/{}", "x".repeat(80));
        let short = shorten_iri(&long);
        assert_eq!(short.chars().count(), 63);
        assert!(short.ends_with("..."));
        assert_eq!(&short[..60], &long[..60]);

        let exact = "a".repeat(60);
        assert_eq!(shorten_iri(&exact), exact);
    }

    #[test]
    fn test_zero_score_omitted() {
        let citations: Citations = serde_json::from_value(serde_json::json!({
            "documents": [{"source": "doc.pdf", "score": 0}, {"source": "b.pdf", "score": 0.5}]
        }))
        .unwrap();
        let view = CitationView::build(&citations).unwrap();
        assert_eq!(view.documents[0].score, None);
        assert_eq!(view.documents[1].score.as_deref(), Some("50.0%"));
    }

    #[test]
    fn test_empty_citations_have_no_view() {
        assert!(CitationView::build(&Citations::default()).is_none());
    }
}
