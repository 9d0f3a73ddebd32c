// src/tui/theme.rs — Color scheme and style definitions for the TUI dashboard.

use ratatui::style::{Color, Modifier, Style};

/// Palette matching the web dashboard's CSS variables.
pub struct Theme;

impl Theme {
    // ── Palette ──────────────────────────────────────────────────
    pub const PRIMARY: Color = Color::Rgb(99, 102, 241);
    pub const TEXT: Color = Color::Rgb(235, 235, 245);
    pub const TEXT_LIGHT: Color = Color::Rgb(140, 140, 160);
    pub const BORDER: Color = Color::Rgb(70, 70, 90);
    pub const SUCCESS: Color = Color::Rgb(34, 197, 94);
    pub const ERROR: Color = Color::Rgb(239, 68, 68);
    pub const WARNING: Color = Color::Rgb(234, 179, 8);
    pub const USER: Color = Color::Rgb(56, 189, 248);
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 64);

    // ── Semantic styles ──────────────────────────────────────────

    /// Active nav item.
    pub fn tab_active() -> Style {
        Style::default()
            .fg(Theme::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tab_inactive() -> Style {
        Style::default().fg(Theme::TEXT_LIGHT)
    }

    pub fn header() -> Style {
        Style::default()
            .fg(Theme::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Theme::BORDER)
    }

    pub fn border_focus() -> Style {
        Style::default().fg(Theme::PRIMARY)
    }

    pub fn text() -> Style {
        Style::default().fg(Theme::TEXT)
    }

    pub fn text_dim() -> Style {
        Style::default().fg(Theme::TEXT_LIGHT)
    }

    pub fn success() -> Style {
        Style::default().fg(Theme::SUCCESS)
    }

    pub fn warning() -> Style {
        Style::default().fg(Theme::WARNING)
    }

    pub fn error() -> Style {
        Style::default().fg(Theme::ERROR)
    }

    /// Chat author label of the user's own messages.
    pub fn user() -> Style {
        Style::default().fg(Theme::USER).add_modifier(Modifier::BOLD)
    }

    /// Chat author label of assistant messages.
    pub fn assistant() -> Style {
        Style::default()
            .fg(Theme::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Citation headings and IRIs.
    pub fn link() -> Style {
        Style::default()
            .fg(Theme::PRIMARY)
            .add_modifier(Modifier::UNDERLINED)
    }

    pub fn selected() -> Style {
        Style::default().bg(Theme::SELECTED_BG).fg(Theme::TEXT)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Theme::PRIMARY)
    }

    pub fn key_desc() -> Style {
        Style::default().fg(Theme::TEXT_LIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_active_is_primary_bold() {
        let s = Theme::tab_active();
        assert_eq!(s.fg, Some(Theme::PRIMARY));
        assert!(s.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_tab_inactive_is_light() {
        assert_eq!(Theme::tab_inactive().fg, Some(Theme::TEXT_LIGHT));
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(Theme::success().fg, Some(Theme::SUCCESS));
        assert_eq!(Theme::error().fg, Some(Theme::ERROR));
    }

    #[test]
    fn test_link_underlined() {
        assert!(Theme::link().add_modifier.contains(Modifier::UNDERLINED));
    }
}
