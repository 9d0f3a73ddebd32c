// src/tui/widgets/metrics.rs — Metric slots (Tab 5).

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel;
use crate::dashboard::metrics::MetricsDisplay;
use crate::tui::theme::Theme;

const LABEL_WIDTH: usize = 24;

pub fn lines(metrics: Option<&MetricsDisplay>) -> Vec<Line<'static>> {
    let placeholder;
    let display = match metrics {
        Some(m) => m,
        None => {
            placeholder = MetricsDisplay::placeholder();
            &placeholder
        }
    };
    display
        .slots()
        .iter()
        .map(|(_, label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<LABEL_WIDTH$}"), Theme::text_dim()),
                Span::styled(value.to_string(), Theme::header()),
            ])
        })
        .collect()
}

pub fn render(f: &mut Frame, area: Rect, metrics: Option<&MetricsDisplay>) {
    f.render_widget(
        Paragraph::new(lines(metrics)).block(panel("Métricas")),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::widgets::plain_text;

    #[test]
    fn test_placeholder_before_first_load() {
        let text = plain_text(&lines(None));
        assert_eq!(text.lines().count(), 9);
        assert!(text.lines().all(|l| l.ends_with('-')));
    }
}
