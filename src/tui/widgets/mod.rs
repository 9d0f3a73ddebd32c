// src/tui/widgets/mod.rs — One module per tab. Each exposes `lines()` (also
// used for the CLI's plain-text output) and `render()`.

pub mod about;
pub mod cqs;
pub mod home;
pub mod metrics;
pub mod query;
pub mod reasoner;

use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders},
};

use crate::tui::theme::Theme;

/// Bordered block with a padded title.
pub fn panel(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), Theme::header()))
        .borders(Borders::ALL)
        .border_style(Theme::border())
}

/// Drop styling: one output line per `Line`.
pub fn plain_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Multi-line text as one `Line` per line, all in `style`.
pub fn text_lines(text: &str, style: ratatui::style::Style) -> Vec<Line<'static>> {
    text.split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect()
}
