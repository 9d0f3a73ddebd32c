// src/tui/widgets/reasoner.rs — Reasoner operations and the shared result region (Tab 4).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{panel, text_lines};
use crate::api::types::ReasonerOp;
use crate::dashboard::reasoner::ReasonerView;
use crate::tui::theme::Theme;

/// Key bound to each operation on this tab.
pub fn op_key(op: ReasonerOp) -> char {
    match op {
        ReasonerOp::Classify => 'c',
        ReasonerOp::Consistency => 's',
        ReasonerOp::Realize => 'z',
        ReasonerOp::Materialize => 'm',
        ReasonerOp::All => 'a',
    }
}

pub fn lines(view: &ReasonerView) -> Vec<Line<'static>> {
    match view {
        ReasonerView::Idle => vec![],
        ReasonerView::Running(op) => vec![Line::from(Span::styled(
            op.running_label(),
            Theme::warning(),
        ))],
        ReasonerView::Failed(message) => vec![Line::from(Span::styled(
            format!("Erro: {message}"),
            Theme::error(),
        ))],
        ReasonerView::Result { op, json } => {
            let mut lines = vec![Line::from(Span::styled(op.title(), Theme::header()))];
            lines.extend(text_lines(json, Theme::text()));
            lines
        }
    }
}

fn menu_lines() -> Vec<Line<'static>> {
    ReasonerOp::ALL
        .iter()
        .map(|op| {
            Line::from(vec![
                Span::styled(format!(" {} ", op_key(*op)), Theme::key_hint()),
                Span::styled(op.title(), Theme::text()),
            ])
        })
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, view: &ReasonerView) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(20)])
        .split(area);

    f.render_widget(
        Paragraph::new(menu_lines()).block(panel("Reasoner DL")),
        chunks[0],
    );
    f.render_widget(
        Paragraph::new(lines(view))
            .block(panel("Resultado"))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::plain_text;

    #[test]
    fn test_result_has_title_and_json() {
        let view = ReasonerView::Result {
            op: ReasonerOp::Classify,
            json: "{\n  \"status\": \"success\"\n}".into(),
        };
        let text = plain_text(&lines(&view));
        assert!(text.starts_with("Classificação\n{"));
    }

    #[test]
    fn test_failure_prefixed() {
        let text = plain_text(&lines(&ReasonerView::Failed("offline".into())));
        assert_eq!(text, "Erro: offline");
    }

    #[test]
    fn test_keys_unique() {
        let keys: std::collections::HashSet<char> =
            ReasonerOp::ALL.iter().map(|op| op_key(*op)).collect();
        assert_eq!(keys.len(), ReasonerOp::ALL.len());
    }
}
