// src/tui/widgets/cqs.rs — Competency question panels (Tab 3).

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::{panel, text_lines};
use crate::dashboard::cq::{CqPanel, CqStatus, CqSummaryView, CqView};
use crate::dashboard::DashboardState;
use crate::tui::theme::Theme;

fn status_badge(status: CqStatus) -> (&'static str, Style) {
    match status {
        CqStatus::Idle => ("·", Theme::text_dim()),
        CqStatus::Loading => ("⏳", Theme::warning()),
        CqStatus::Success => ("✅", Theme::success()),
        CqStatus::Error => ("❌", Theme::error()),
    }
}

/// Body of one panel, shown when it is expanded.
pub fn panel_lines(panel: &CqPanel) -> Vec<Line<'static>> {
    match &panel.view {
        CqView::Idle => vec![],
        CqView::Loading => vec![Line::from(Span::styled(
            format!("⏳ Executando CQ{}...", panel.number),
            Theme::warning(),
        ))],
        CqView::Failed(message) => vec![Line::from(Span::styled(
            format!("❌ Erro ao executar CQ{}: {message}", panel.number),
            Theme::error(),
        ))],
        CqView::Rejected(message) => vec![Line::from(Span::styled(
            format!("❌ {message}"),
            Theme::error(),
        ))],
        CqView::Success {
            total,
            rows,
            remaining,
        } => {
            let mut lines = vec![Line::from(vec![
                Span::styled("✅ Sucesso", Theme::success()),
                Span::styled(format!("  {total} resultado(s)"), Theme::text_dim()),
            ])];
            if rows.is_empty() {
                lines.push(Line::from(Span::styled(
                    "Nenhum resultado encontrado.",
                    Theme::text_dim(),
                )));
                return lines;
            }
            for (i, row) in rows.iter().enumerate() {
                if i > 0 {
                    lines.push(Line::from(Span::styled("  ─", Theme::border())));
                }
                for field in row {
                    lines.push(Line::from(vec![
                        Span::styled(format!("  {}: ", field.key), Theme::assistant()),
                        Span::styled(field.value.clone(), Theme::text()),
                    ]));
                }
            }
            if *remaining > 0 {
                lines.push(Line::from(Span::styled(
                    format!("... e mais {remaining} resultado(s)"),
                    Theme::text_dim(),
                )));
            }
            lines
        }
    }
}

pub fn summary_lines(view: &CqSummaryView) -> Vec<Line<'static>> {
    match view {
        CqSummaryView::Idle => vec![],
        CqSummaryView::Loading => vec![Line::from(Span::styled(
            "Executando todas as CQs...",
            Theme::warning(),
        ))],
        CqSummaryView::Failed(message) => vec![Line::from(Span::styled(
            format!("Erro: {message}"),
            Theme::error(),
        ))],
        CqSummaryView::Results(entries) => {
            let mut lines = vec![Line::from(Span::styled("Todas as CQs", Theme::header()))];
            for (name, json) in entries {
                lines.push(Line::from(Span::styled(name.clone(), Theme::assistant())));
                lines.extend(text_lines(json, Theme::text()));
            }
            lines
        }
    }
}

/// Every panel header, with the body of expanded panels underneath.
/// `selected` is the 1-based number of the highlighted panel.
pub fn lines(state: &DashboardState, selected: Option<u8>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for cq in &state.cq_panels {
        let (badge, badge_style) = status_badge(cq.status());
        let marker = if cq.expanded { "▾" } else { "▸" };
        let mut header = Line::from(vec![
            Span::styled(format!("{marker} CQ{} ", cq.number), Theme::header()),
            Span::styled(badge, badge_style),
        ]);
        if selected == Some(cq.number) {
            header = header.style(Theme::selected());
        }
        lines.push(header);
        if cq.expanded {
            lines.extend(panel_lines(cq));
        }
    }
    lines
}

pub fn render(f: &mut Frame, area: Rect, state: &DashboardState, selected: u8) {
    let summary = summary_lines(&state.cq_summary);
    let constraints = if summary.is_empty() {
        vec![Constraint::Min(3)]
    } else {
        vec![Constraint::Percentage(60), Constraint::Percentage(40)]
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let body = lines(state, Some(selected));
    // Keep the selected header on screen.
    let header_row = body
        .iter()
        .position(|l| l.style == Theme::selected())
        .unwrap_or(0);
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = header_row.saturating_sub(visible / 2) as u16;
    let p = Paragraph::new(body)
        .block(panel("Competency Questions"))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, chunks[0]);

    if let Some(area) = chunks.get(1) {
        let p = Paragraph::new(summary)
            .block(panel("Todas as CQs"))
            .wrap(Wrap { trim: false });
        f.render_widget(p, *area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::cq::CqField;
    use crate::tui::widgets::plain_text;

    #[test]
    fn test_collapsed_panels_show_headers_only() {
        let state = DashboardState::new();
        let text = plain_text(&lines(&state, None));
        assert_eq!(text.lines().count(), 10);
        assert!(text.starts_with("▸ CQ1 ·"));
    }

    #[test]
    fn test_expanded_success_panel() {
        let mut state = DashboardState::new();
        let cq = &mut state.cq_panels[2];
        cq.expanded = true;
        cq.view = CqView::Success {
            total: 7,
            rows: vec![vec![CqField {
                key: "curso".into(),
                value: "Ontologias".into(),
            }]],
            remaining: 2,
        };
        let text = plain_text(&lines(&state, Some(3)));
        assert!(text.contains("▾ CQ3 ✅"));
        assert!(text.contains("7 resultado(s)"));
        assert!(text.contains("  curso: Ontologias"));
        assert!(text.contains("... e mais 2 resultado(s)"));
    }

    #[test]
    fn test_failed_panel_names_cq() {
        let mut cq = CqPanel::new(5);
        cq.view = CqView::Failed("timeout".into());
        assert_eq!(
            plain_text(&panel_lines(&cq)),
            "❌ Erro ao executar CQ5: timeout"
        );
    }
}
