// src/tui/widgets/query.rs — Chat log and query input (Tab 2).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{panel, text_lines};
use crate::dashboard::chat::{ChatLog, ChatMessage, CitationView, Role};
use crate::dashboard::DashboardState;
use crate::tui::theme::Theme;

pub fn chat_lines(chat: &ChatLog) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for message in chat.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(message_lines(message));
    }
    lines
}

fn message_lines(message: &ChatMessage) -> Vec<Line<'static>> {
    if message.role == Role::Error {
        let mut lines = text_lines(&message.text, Theme::error());
        if let Some(first) = lines.first_mut() {
            first.spans.insert(0, Span::styled("❌ ", Theme::error()));
        }
        return lines;
    }

    let author_style = match message.role {
        Role::User => Theme::user(),
        _ => Theme::assistant(),
    };
    let mut lines = vec![Line::from(vec![
        Span::styled(message.author.clone(), author_style),
        Span::styled(format!("  {}", message.timestamp), Theme::text_dim()),
    ])];

    if message.loading {
        lines.push(Line::from(Span::styled(
            "⏳ Processando sua consulta",
            Theme::warning(),
        )));
        return lines;
    }

    lines.extend(text_lines(&message.text, Theme::text()));
    if let Some(view) = message.citations.as_ref().and_then(CitationView::build) {
        lines.extend(citation_lines(&view));
    }
    lines
}

pub fn citation_lines(view: &CitationView) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        "📚 Fontes e Referências",
        Theme::header(),
    ))];

    if !view.documents.is_empty() {
        lines.push(Line::from(Span::styled("Documentos:", Theme::assistant())));
        for doc in &view.documents {
            let mut spans = vec![Span::styled(format!("  📄 {}", doc.label), Theme::text())];
            if let Some(score) = &doc.score {
                spans.push(Span::styled(format!(" ({score})"), Theme::text_dim()));
            }
            lines.push(Line::from(spans));
        }
    }

    if !view.iris.is_empty() {
        lines.push(Line::from(Span::styled(
            "IRIs da Ontologia:",
            Theme::assistant(),
        )));
        for iri in &view.iris {
            lines.push(Line::from(vec![
                Span::styled("  🔗 ", Theme::text()),
                Span::styled(iri.short.clone(), Theme::link()),
            ]));
        }
    }
    lines
}

pub fn render(f: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(area);

    let lines = chat_lines(&state.chat);
    // Follow the newest message.
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;
    let chat = Paragraph::new(lines)
        .block(panel("Consultas"))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(chat, chunks[0]);

    let mut input = text_lines(&state.query_input, Theme::text());
    if let Some(last) = input.last_mut() {
        last.spans.push(Span::styled("▏", Theme::key_hint()));
    }
    let input = Paragraph::new(input)
        .block(panel("Pergunta · Ctrl+Enter envia · Ctrl+L limpa").border_style(Theme::border_focus()))
        .wrap(Wrap { trim: false });
    f.render_widget(input, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Citations;
    use crate::tui::widgets::plain_text;

    #[test]
    fn test_chat_lines_show_citations() {
        let citations: Citations = serde_json::from_value(serde_json::json!({
            "documents": [{"source": "doc.pdf", "score": 0.873}],
            "iris": ["http://ex.org/Curso"]
        }))
        .unwrap();
        let mut log = ChatLog::default();
        log.push_user("Quais cursos?");
        log.push_assistant("LMSAgent", "Ontologias", Some(citations));
        let text = plain_text(&chat_lines(&log));
        assert!(text.contains("Você"));
        assert!(text.contains("📄 doc.pdf (87.3%)"));
        assert!(text.contains("🔗 http://ex.org/Curso"));
    }

    #[test]
    fn test_error_entry_marked() {
        let mut log = ChatLog::default();
        log.push_error("Erro ao processar consulta: timeout");
        assert_eq!(
            plain_text(&chat_lines(&log)),
            "❌ Erro ao processar consulta: timeout"
        );
    }
}
