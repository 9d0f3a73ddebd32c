// src/dashboard/views.rs — HTML rendering of each display region (minijinja).
//
// Every region has one render function taking its view model. Markup, labels
// and emoji match the browser dashboard so existing stylesheets and snapshot
// checks keep working. Dynamic text is escaped here, before it reaches a
// template, so templates run with auto-escaping off.

use std::sync::OnceLock;

use minijinja::{context, AutoEscape, Environment};
use serde::Serialize;

use super::chat::{ChatLog, ChatMessage, CitationView, DocumentLine, IriLine, Role, EXAMPLE_QUERIES};
use super::cq::{CqField, CqPanel, CqSummaryView, CqView};
use super::metrics::MetricsDisplay;
use super::reasoner::ReasonerView;
use super::state::{DashboardState, Tab};
use crate::api::types::ReasonerOp;
use crate::infra::errors::DashboardError;

const MESSAGE: &str = r#"<div id="{{ id }}" class="message {{ role }}">
    <div class="message-header">
        <span>{{ author }}</span>
        <span>{{ timestamp }}</span>
    </div>
    <div class="message-content">{% if loading %}<div class="loading">⏳ Processando sua consulta</div>{% else %}{{ lines|join("<br>") }}{% endif %}</div>{{ citations }}
</div>"#;

const ERROR_BLOCK: &str = r#"<div class="error">{{ text }}</div>"#;

const CITATIONS: &str = r#"<div class="citations"><div class="citations-title">📚 Fontes e Referências</div>
{%- if documents %}<div style="margin-bottom: 12px;"><strong style="color: var(--primary); font-size: 0.9em;">Documentos:</strong></div>
{%- for doc in documents %}<div class="citation-item">📄 {{ doc.label }}{% if doc.score %} <span style="color: var(--text-light); font-size: 0.85em;">({{ doc.score }})</span>{% endif %}</div>{% endfor %}{% endif %}
{%- if iris %}<div style="margin-top: 16px; margin-bottom: 12px;"><strong style="color: var(--primary); font-size: 0.9em;">IRIs da Ontologia:</strong></div>
{%- for iri in iris %}<div class="citation-item">🔗 <a href="{{ iri.href }}" target="_blank" style="color: var(--primary); text-decoration: none;">{{ iri.short }}</a></div>{% endfor %}{% endif %}</div>"#;

const CQ_PANEL: &str = r#"{% if state == "loading" -%}
<div class="cq-loading">⏳ Executando CQ{{ number }}...</div>
{%- elif state == "failed" -%}
<div class="cq-error">❌ Erro ao executar CQ{{ number }}: {{ message }}</div>
{%- elif state == "rejected" -%}
<div class="cq-result-content"><div class="cq-error">❌ {{ message }}</div></div>
{%- elif state == "success" -%}
<div class="cq-result-content"><div class="cq-result-header"><span class="cq-status-success">✅ Sucesso</span><span class="cq-result-count">{{ total }} resultado(s)</span></div>
{%- if rows %}<div class="cq-result-items">
{%- for row in rows %}<div class="cq-result-item">{% for field in row %}<div class="cq-result-field"><strong>{{ field.key }}:</strong> {{ field.value }}</div>{% endfor %}</div>{% endfor %}
{%- if remaining %}<div class="cq-result-more">... e mais {{ remaining }} resultado(s)</div>{% endif %}</div>
{%- else %}<div class="cq-result-empty">Nenhum resultado encontrado.</div>{% endif %}</div>
{%- endif %}"#;

const CQ_SUMMARY: &str = r#"{% if state == "loading" -%}
<div class="loading">Executando todas as CQs...</div>
{%- elif state == "failed" -%}
<div class="error">Erro: {{ message }}</div>
{%- elif state == "results" -%}
<h3>Todas as CQs</h3>{% for entry in entries %}<div class="result-item"><h4>{{ entry.name }}</h4><pre>{{ entry.json }}</pre></div>{% endfor %}
{%- endif %}"#;

const REASONER: &str = r#"{% if state == "running" -%}
<div class="loading">{{ label }}</div>
{%- elif state == "failed" -%}
<div class="error">Erro: {{ message }}</div>
{%- elif state == "all" -%}
<h3>{{ title }}</h3><pre>{{ json }}</pre>
{%- elif state == "result" -%}
<div class="result-item"><h3>{{ title }}</h3><pre>{{ json }}</pre></div>
{%- endif %}"#;

const METRICS: &str = r#"<div class="metrics-grid">
{%- for slot in slots %}
    <div class="metric-card"><div class="metric-label">{{ slot.label }}</div><div id="{{ slot.id }}" class="metric-value">{{ slot.value }}</div></div>
{%- endfor %}
</div>"#;

const NAV: &str = r#"<nav class="nav">
{%- for tab in tabs %}
    <button class="nav-item{% if tab.active %} active{% endif %}" data-tab="{{ tab.name }}">{{ tab.label }}</button>
{%- endfor %}
</nav>"#;

const PAGE: &str = r#"<div class="dashboard">
{{ nav }}
<main>
{%- for section in sections %}
<section id="{{ section.name }}-tab" class="tab-content{% if section.active %} active{% endif %}">
{{ section.body }}
</section>
{%- endfor %}
</main>
</div>"#;

const HOME: &str = r#"<h2>Assistente de Ontologia e RAG</h2>
<p>Faça perguntas sobre cursos, estudantes e recursos. As respostas combinam recuperação de documentos e consultas SPARQL à ontologia.</p>
<ul class="examples">
{%- for example in examples %}
    <li class="example-query">{{ example }}</li>
{%- endfor %}
</ul>"#;

const QUERY: &str = r#"<div id="chat-container">{{ chat }}</div>
<div class="query-input-row"><textarea id="query-input" placeholder="Digite sua pergunta (Ctrl+Enter para enviar)">{{ input }}</textarea></div>"#;

const CQ_LIST: &str = r#"<div class="cq-list">
{%- for panel in panels %}
    <div class="cq-card" id="cq-{{ panel.number }}"><div class="cq-header"><span class="cq-title">CQ{{ panel.number }}</span></div><div id="cq-result-{{ panel.number }}" class="cq-result{% if panel.expanded %} expanded{% endif %}">{{ panel.body }}</div></div>
{%- endfor %}
</div>
<div id="cqs-results">{{ summary }}</div>"#;

const ABOUT: &str = r#"<h2>Sobre</h2>
<p>Painel de validação da ontologia: consultas com RAG, execução das Competency Questions e inferências do reasoner DL (classificação, consistência, realização e materialização).</p>"#;

const TEMPLATES: [(&str, &str); 13] = [
    ("message", MESSAGE),
    ("error_block", ERROR_BLOCK),
    ("citations", CITATIONS),
    ("cq_panel", CQ_PANEL),
    ("cq_summary", CQ_SUMMARY),
    ("reasoner", REASONER),
    ("metrics", METRICS),
    ("nav", NAV),
    ("page", PAGE),
    ("home", HOME),
    ("query", QUERY),
    ("cq_list", CQ_LIST),
    ("about", ABOUT),
];

static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();

fn environment() -> &'static Environment<'static> {
    ENVIRONMENT.get_or_init(|| {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        for (name, source) in TEMPLATES {
            if let Err(e) = env.add_template(name, source) {
                tracing::error!(template = name, "Invalid template: {e}");
            }
        }
        env
    })
}

fn render(name: &str, ctx: minijinja::Value) -> Result<String, DashboardError> {
    Ok(environment().get_template(name)?.render(ctx)?)
}

// ── Escaping ─────────────────────────────────────────────────────

/// Escape text node content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    escape_text(s).replace('"', "&quot;").replace('\'', "&#39;")
}

// ── Chat ─────────────────────────────────────────────────────────

pub fn render_chat(chat: &ChatLog) -> Result<String, DashboardError> {
    let mut html = String::new();
    for message in chat.messages() {
        html.push_str(&render_message(message)?);
        html.push('\n');
    }
    Ok(html)
}

pub fn render_message(message: &ChatMessage) -> Result<String, DashboardError> {
    if message.role == Role::Error {
        return render("error_block", context! { text => escape_text(&message.text) });
    }

    let citations = match message.citations.as_ref().and_then(CitationView::build) {
        Some(view) if !message.loading => render_citations(&view)?,
        _ => String::new(),
    };
    let lines: Vec<String> = message.text.split('\n').map(escape_text).collect();

    render(
        "message",
        context! {
            id => &message.id,
            role => message.role.as_str(),
            author => escape_text(&message.author),
            timestamp => &message.timestamp,
            loading => message.loading,
            lines => lines,
            citations => citations,
        },
    )
}

pub fn render_citations(view: &CitationView) -> Result<String, DashboardError> {
    let documents: Vec<DocumentLine> = view
        .documents
        .iter()
        .map(|d| DocumentLine {
            label: escape_text(&d.label),
            score: d.score.clone(),
        })
        .collect();
    let iris: Vec<IriLine> = view
        .iris
        .iter()
        .map(|i| IriLine {
            href: escape_attr(&i.href),
            short: escape_text(&i.short),
        })
        .collect();
    render("citations", context! { documents => documents, iris => iris })
}

// ── CQs ──────────────────────────────────────────────────────────

/// Inner content of `cq-result-{n}`.
pub fn render_cq_panel(panel: &CqPanel) -> Result<String, DashboardError> {
    let ctx = match &panel.view {
        CqView::Idle => context! { state => "idle" },
        CqView::Loading => context! { state => "loading", number => panel.number },
        CqView::Failed(message) => context! {
            state => "failed",
            number => panel.number,
            message => escape_text(message),
        },
        CqView::Rejected(message) => context! {
            state => "rejected",
            message => escape_text(message),
        },
        CqView::Success {
            total,
            rows,
            remaining,
        } => {
            let rows: Vec<Vec<CqField>> = rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|f| CqField {
                            key: escape_text(&f.key),
                            value: escape_text(&f.value),
                        })
                        .collect()
                })
                .collect();
            context! {
                state => "success",
                total => total,
                rows => rows,
                remaining => remaining,
            }
        }
    };
    render("cq_panel", ctx)
}

#[derive(Serialize)]
struct SummaryEntry {
    name: String,
    json: String,
}

pub fn render_cq_summary(view: &CqSummaryView) -> Result<String, DashboardError> {
    let ctx = match view {
        CqSummaryView::Idle => context! { state => "idle" },
        CqSummaryView::Loading => context! { state => "loading" },
        CqSummaryView::Failed(message) => {
            context! { state => "failed", message => escape_text(message) }
        }
        CqSummaryView::Results(entries) => {
            let entries: Vec<SummaryEntry> = entries
                .iter()
                .map(|(name, json)| SummaryEntry {
                    name: escape_text(name),
                    json: escape_text(json),
                })
                .collect();
            context! { state => "results", entries => entries }
        }
    };
    render("cq_summary", ctx)
}

// ── Reasoner ─────────────────────────────────────────────────────

pub fn render_reasoner(view: &ReasonerView) -> Result<String, DashboardError> {
    let ctx = match view {
        ReasonerView::Idle => context! { state => "idle" },
        ReasonerView::Running(op) => context! { state => "running", label => op.running_label() },
        ReasonerView::Failed(message) => {
            context! { state => "failed", message => escape_text(message) }
        }
        ReasonerView::Result { op, json } => context! {
            state => if *op == ReasonerOp::All { "all" } else { "result" },
            title => op.title(),
            json => escape_text(json),
        },
    };
    render("reasoner", ctx)
}

// ── Metrics ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct Slot<'a> {
    id: &'a str,
    label: &'a str,
    value: String,
}

/// Metric cards; slots show `-` until the first successful load.
pub fn render_metrics(metrics: Option<&MetricsDisplay>) -> Result<String, DashboardError> {
    let placeholder = MetricsDisplay::placeholder();
    let display = metrics.unwrap_or(&placeholder);
    let slots: Vec<Slot> = display
        .slots()
        .into_iter()
        .map(|(id, label, value)| Slot {
            id,
            label,
            value: escape_text(value),
        })
        .collect();
    render("metrics", context! { slots => slots })
}

// ── Navigation and page ──────────────────────────────────────────

#[derive(Serialize)]
struct NavTab {
    name: &'static str,
    label: &'static str,
    active: bool,
}

pub fn render_nav(active: Tab) -> Result<String, DashboardError> {
    let tabs: Vec<NavTab> = Tab::ALL
        .iter()
        .map(|t| NavTab {
            name: t.name(),
            label: t.label(),
            active: *t == active,
        })
        .collect();
    render("nav", context! { tabs => tabs })
}

#[derive(Serialize)]
struct Section {
    name: &'static str,
    active: bool,
    body: String,
}

#[derive(Serialize)]
struct PanelHtml {
    number: u8,
    expanded: bool,
    body: String,
}

/// Body of one tab section.
pub fn render_tab(state: &DashboardState, tab: Tab) -> Result<String, DashboardError> {
    match tab {
        Tab::Home => {
            let examples: Vec<String> = EXAMPLE_QUERIES.iter().map(|q| escape_text(q)).collect();
            render("home", context! { examples => examples })
        }
        Tab::Query => render(
            "query",
            context! {
                chat => render_chat(&state.chat)?,
                input => escape_text(&state.query_input),
            },
        ),
        Tab::Cqs => {
            let panels = state
                .cq_panels
                .iter()
                .map(|p| {
                    Ok(PanelHtml {
                        number: p.number,
                        expanded: p.expanded,
                        body: render_cq_panel(p)?,
                    })
                })
                .collect::<Result<Vec<_>, DashboardError>>()?;
            render(
                "cq_list",
                context! { panels => panels, summary => render_cq_summary(&state.cq_summary)? },
            )
        }
        Tab::Reasoner => Ok(format!(
            "<div id=\"reasoner-results\">{}</div>",
            render_reasoner(&state.reasoner)?
        )),
        Tab::Metrics => render_metrics(state.metrics.as_ref()),
        Tab::About => render("about", context! {}),
    }
}

/// The whole dashboard: navigation plus every tab, only the active one marked.
pub fn render_page(state: &DashboardState) -> Result<String, DashboardError> {
    let sections = Tab::ALL
        .iter()
        .map(|t| {
            Ok(Section {
                name: t.name(),
                active: *t == state.active_tab,
                body: render_tab(state, *t)?,
            })
        })
        .collect::<Result<Vec<_>, DashboardError>>()?;
    render(
        "page",
        context! { nav => render_nav(state.active_tab)?, sections => sections },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Citations;
    use serde_json::json;

    #[test]
    fn test_all_templates_parse() {
        for (name, _) in TEMPLATES {
            assert!(
                environment().get_template(name).is_ok(),
                "template '{name}' failed to load"
            );
        }
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a<b>&c"), "a&lt;b&gt;&amp;c");
        assert_eq!(escape_text("\"quoted\""), "\"quoted\"");
        assert_eq!(escape_attr("x\"y"), "x&quot;y");
    }

    #[test]
    fn test_message_newlines_become_breaks() {
        let mut log = ChatLog::default();
        log.push_assistant("LMSAgent", "linha 1\nlinha <2>", None);
        let html = render_message(&log.messages()[0]).unwrap();
        assert!(html.contains("linha 1<br>linha &lt;2&gt;"));
        assert!(html.contains("<span>LMSAgent</span>"));
        assert!(html.contains("class=\"message assistant\""));
    }

    #[test]
    fn test_loading_message_body() {
        let mut log = ChatLog::default();
        log.push_loading();
        let html = render_message(&log.messages()[0]).unwrap();
        assert!(html.contains("<div class=\"loading\">⏳ Processando sua consulta</div>"));
        assert!(!html.contains("Analisando"));
    }

    #[test]
    fn test_citations_render() {
        let citations: Citations = serde_json::from_value(json!({
            "documents": [{"source": "doc.pdf", "score": 0.873}],
            "iris": [format!("http://ex.org/{}", "x".repeat(80))]
        }))
        .unwrap();
        let view = CitationView::build(&citations).unwrap();
        let html = render_citations(&view).unwrap();
        assert!(html.contains("📄 doc.pdf"));
        assert!(html.contains("(87.3%)"));
        let short = format!("{}...", &format!("http://ex.org/{}", "x".repeat(80))[..60]);
        assert!(html.contains(&format!(">{short}</a>")));
        assert!(html.contains("IRIs da Ontologia:"));
    }

    #[test]
    fn test_citations_sections_omitted_when_empty() {
        let citations: Citations =
            serde_json::from_value(json!({"documents": ["a.pdf"], "iris": []})).unwrap();
        let html = render_citations(&CitationView::build(&citations).unwrap()).unwrap();
        assert!(html.contains("Documentos:"));
        assert!(!html.contains("IRIs da Ontologia:"));
        assert!(!html.contains("%)"));
    }

    #[test]
    fn test_zero_score_not_rendered() {
        let citations: Citations =
            serde_json::from_value(json!({"documents": [{"source": "doc.pdf", "score": 0}]}))
                .unwrap();
        let html = render_citations(&CitationView::build(&citations).unwrap()).unwrap();
        assert!(html.contains("📄 doc.pdf</div>"));
        assert!(!html.contains("%)"));
    }

    #[test]
    fn test_error_block() {
        let mut log = ChatLog::default();
        log.push_error("Erro ao processar consulta: <falha>");
        let html = render_message(&log.messages()[0]).unwrap();
        assert_eq!(
            html,
            "<div class=\"error\">Erro ao processar consulta: &lt;falha&gt;</div>"
        );
    }

    #[test]
    fn test_nav_marks_single_active() {
        let html = render_nav(Tab::Reasoner).unwrap();
        assert_eq!(html.matches("nav-item active").count(), 1);
        assert!(html.contains("nav-item active\" data-tab=\"reasoner\""));
    }

    #[test]
    fn test_page_single_active_section() {
        let mut state = DashboardState::new();
        state.active_tab = Tab::Cqs;
        let html = render_page(&state).unwrap();
        assert_eq!(html.matches("class=\"tab-content active\"").count(), 1);
        assert!(html.contains("<section id=\"cqs-tab\" class=\"tab-content active\">"));
        assert_eq!(html.matches("class=\"cq-card\"").count(), 10);
    }

    #[test]
    fn test_metrics_placeholder() {
        let html = render_metrics(None).unwrap();
        assert!(html.contains("id=\"metric-classes\" class=\"metric-value\">-</div>"));
    }
}
