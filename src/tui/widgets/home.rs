// src/tui/widgets/home.rs — Landing tab with example questions.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::panel;
use crate::dashboard::chat::EXAMPLE_QUERIES;
use crate::tui::theme::Theme;

/// Keys that load the example questions, in order.
pub const EXAMPLE_KEYS: [char; 4] = ['a', 'b', 'c', 'd'];

pub fn lines() -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Assistente de Ontologia e RAG", Theme::header())),
        Line::from(""),
        Line::from(Span::styled(
            "Faça perguntas sobre cursos, estudantes e recursos. As respostas combinam \
             recuperação de documentos e consultas SPARQL à ontologia.",
            Theme::text(),
        )),
        Line::from(""),
        Line::from(Span::styled("Exemplos:", Theme::text_dim())),
    ];
    for (key, example) in EXAMPLE_KEYS.iter().zip(EXAMPLE_QUERIES) {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key} "), Theme::key_hint()),
            Span::styled(example, Theme::text()),
        ]));
    }
    lines
}

pub fn render(f: &mut Frame, area: Rect) {
    let p = Paragraph::new(lines())
        .block(panel("Início"))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
