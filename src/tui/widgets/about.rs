// src/tui/widgets/about.rs — About tab.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::panel;
use crate::tui::theme::Theme;

pub fn lines(base_url: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "Painel de validação da ontologia: consultas com RAG, execução das \
             Competency Questions e inferências do reasoner DL (classificação, \
             consistência, realização e materialização).",
            Theme::text(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("API:     ", Theme::text_dim()),
            Span::styled(base_url.to_string(), Theme::link()),
        ]),
        Line::from(vec![
            Span::styled("Versão:  ", Theme::text_dim()),
            Span::styled(format!("v{}", env!("CARGO_PKG_VERSION")), Theme::text()),
        ]),
    ]
}

pub fn render(f: &mut Frame, area: Rect, base_url: &str) {
    let p = Paragraph::new(lines(base_url))
        .block(panel("Sobre"))
        .wrap(Wrap { trim: false });
    f.render_widget(p, area);
}
