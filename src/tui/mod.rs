// src/tui/mod.rs — TUI dashboard module.
//
// Terminal front end for the dashboard component, built with ratatui.
// Launch via `ontodash dashboard` (the default command).

pub mod app;
pub mod theme;
pub mod widgets;

pub use app::run_dashboard;
