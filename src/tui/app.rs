// src/tui/app.rs — TUI event loop, key bindings, and rendering.
//
// The loop itself is synchronous. Every dashboard operation is spawned on the
// tokio runtime and writes into the shared state, which is redrawn each tick.

use std::future::Future;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tokio::runtime::Handle;

use crate::api::types::ReasonerOp;
use crate::api::DashboardApi;
use crate::dashboard::chat::EXAMPLE_QUERIES;
use crate::dashboard::cq::CQ_COUNT;
use crate::dashboard::{Dashboard, DashboardState, Tab};
use crate::infra::config::DashboardConfig;

use super::theme::Theme;
use super::widgets;

// ── Actions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Quit,
    NextTab,
    PrevTab,
    Goto(Tab),
    LoadExample(usize),
    Input(char),
    Newline,
    Backspace,
    Submit,
    ClearChat,
    SelectNext,
    SelectPrev,
    RunCq,
    ToggleCq,
    RunAllCqs,
    RunBatch,
    Reasoner(ReasonerOp),
    RefreshMetrics,
}

/// Translate a key press on `tab` into an action.
fn map_key(tab: Tab, key: KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => return Some(Action::Quit),
        KeyCode::Tab => return Some(Action::NextTab),
        KeyCode::BackTab => return Some(Action::PrevTab),
        _ => {}
    }

    // The query tab owns the keyboard for text input.
    if tab == Tab::Query {
        return match key.code {
            KeyCode::Enter if ctrl => Some(Action::Submit),
            // Terminals without keyboard enhancement report Ctrl+Enter as Ctrl+J.
            KeyCode::Char('j') if ctrl => Some(Action::Submit),
            KeyCode::Char('l') if ctrl => Some(Action::ClearChat),
            KeyCode::Enter => Some(Action::Newline),
            KeyCode::Backspace => Some(Action::Backspace),
            KeyCode::Esc => Some(Action::Goto(Tab::Home)),
            KeyCode::Char(c) if !ctrl => Some(Action::Input(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Right => return Some(Action::NextTab),
        KeyCode::Left => return Some(Action::PrevTab),
        KeyCode::Char(c @ '1'..='6') => {
            return Some(Action::Goto(Tab::from_index(c as usize - '1' as usize)))
        }
        _ => {}
    }

    match (tab, key.code) {
        (Tab::Home, KeyCode::Char(c)) => widgets::home::EXAMPLE_KEYS
            .iter()
            .position(|k| *k == c)
            .map(Action::LoadExample),
        (Tab::Home, KeyCode::Enter) => Some(Action::Goto(Tab::Query)),

        (Tab::Cqs, KeyCode::Down | KeyCode::Char('j')) => Some(Action::SelectNext),
        (Tab::Cqs, KeyCode::Up | KeyCode::Char('k')) => Some(Action::SelectPrev),
        (Tab::Cqs, KeyCode::Enter) => Some(Action::RunCq),
        (Tab::Cqs, KeyCode::Char(' ')) => Some(Action::ToggleCq),
        (Tab::Cqs, KeyCode::Char('a')) => Some(Action::RunAllCqs),
        (Tab::Cqs, KeyCode::Char('b')) => Some(Action::RunBatch),

        (Tab::Reasoner, KeyCode::Char(c)) => ReasonerOp::ALL
            .into_iter()
            .find(|op| widgets::reasoner::op_key(*op) == c)
            .map(Action::Reasoner),

        (Tab::Metrics, KeyCode::Char('r')) => Some(Action::RefreshMetrics),
        _ => None,
    }
}

// ── App state ────────────────────────────────────────────────────

struct App<C> {
    dashboard: Arc<Dashboard<C>>,
    runtime: Handle,
    base_url: String,
    /// Highlighted CQ panel, 1-based.
    selected_cq: u8,
    /// Set while a sequential run of all CQs is in progress.
    running_all: Arc<AtomicBool>,
    /// `None` disables the periodic refresh.
    metrics_interval: Option<Duration>,
    last_metrics_refresh: Instant,
}

impl<C: DashboardApi + 'static> App<C> {
    fn new(
        dashboard: Arc<Dashboard<C>>,
        config: &DashboardConfig,
        base_url: &str,
        runtime: Handle,
    ) -> Self {
        Self {
            dashboard,
            runtime,
            base_url: base_url.to_string(),
            selected_cq: 1,
            running_all: Arc::new(AtomicBool::new(false)),
            metrics_interval: (config.metrics_refresh_secs > 0)
                .then(|| Duration::from_secs(config.metrics_refresh_secs)),
            last_metrics_refresh: Instant::now(),
        }
    }

    fn spawn<F, Fut>(&self, task: F)
    where
        F: FnOnce(Arc<Dashboard<C>>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.runtime.spawn(task(Arc::clone(&self.dashboard)));
    }

    fn active_tab(&self) -> Tab {
        self.dashboard.lock().active_tab
    }

    fn open_tab(&mut self, tab: Tab) {
        self.dashboard.lock().active_tab = tab;
        if tab == Tab::Metrics {
            self.refresh_metrics();
        }
    }

    fn refresh_metrics(&mut self) {
        self.last_metrics_refresh = Instant::now();
        self.spawn(|d| async move { d.load_metrics().await });
    }

    /// Follow CQ runs and keep the metrics tab fresh.
    fn tick(&mut self) {
        let on_metrics = {
            let mut state = self.dashboard.lock();
            if let Some(number) = state.scroll_target.take() {
                self.selected_cq = number;
            }
            state.active_tab == Tab::Metrics
        };
        if let Some(interval) = self.metrics_interval {
            if on_metrics && self.last_metrics_refresh.elapsed() >= interval {
                self.refresh_metrics();
            }
        }
    }

    /// Returns false when the app should exit.
    fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return false,
            Action::NextTab => {
                let tab = self.active_tab().next();
                self.open_tab(tab);
            }
            Action::PrevTab => {
                let tab = self.active_tab().prev();
                self.open_tab(tab);
            }
            Action::Goto(tab) => self.open_tab(tab),
            Action::LoadExample(i) => {
                if let Some(example) = EXAMPLE_QUERIES.get(i) {
                    self.dashboard.set_query(example);
                    self.open_tab(Tab::Query);
                }
            }

            Action::Input(c) => self.dashboard.lock().query_input.push(c),
            Action::Newline => self.dashboard.lock().query_input.push('\n'),
            Action::Backspace => {
                self.dashboard.lock().query_input.pop();
            }
            Action::Submit => self.spawn(|d| async move { d.submit_current_query().await }),
            Action::ClearChat => self.dashboard.clear_chat(),

            Action::SelectNext => self.selected_cq = (self.selected_cq + 1).min(CQ_COUNT),
            Action::SelectPrev => self.selected_cq = self.selected_cq.saturating_sub(1).max(1),
            Action::RunCq => {
                let number = self.selected_cq;
                self.spawn(move |d| async move {
                    if let Err(e) = d.run_cq(number).await {
                        tracing::error!("{e}");
                    }
                });
            }
            Action::ToggleCq => {
                if let Err(e) = self.dashboard.toggle_cq(self.selected_cq) {
                    tracing::warn!("{e}");
                }
            }
            Action::RunAllCqs => {
                if self.running_all.swap(true, Ordering::SeqCst) {
                    tracing::debug!("Sequential CQ run already in progress");
                } else {
                    let flag = Arc::clone(&self.running_all);
                    self.spawn(move |d| async move {
                        d.run_all_cqs().await;
                        flag.store(false, Ordering::SeqCst);
                    });
                }
            }
            Action::RunBatch => self.spawn(|d| async move { d.run_all_cqs_batch().await }),

            Action::Reasoner(op) => self.spawn(move |d| async move { d.run_reasoner(op).await }),
            Action::RefreshMetrics => self.refresh_metrics(),
        }
        true
    }
}

// ── Public entry point ───────────────────────────────────────────

/// Launch the TUI dashboard. Blocks until the user quits (q / Esc / Ctrl-C),
/// so call it from a blocking context inside the tokio runtime.
pub fn run_dashboard<C: DashboardApi + 'static>(
    dashboard: Arc<Dashboard<C>>,
    config: &DashboardConfig,
    base_url: &str,
) -> anyhow::Result<()> {
    let mut app = App::new(dashboard, config, base_url, Handle::current());

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<C: DashboardApi + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<C>,
) -> anyhow::Result<()> {
    loop {
        app.tick();

        {
            let state = app.dashboard.lock();
            terminal.draw(|f| render(f, &state, app.selected_cq, &app.base_url))?;
        }

        // Short poll so results from spawned operations show up promptly.
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = map_key(app.active_tab(), key) {
                    if !app.apply(action) {
                        return Ok(());
                    }
                }
            }
        }
    }
}

// ── Rendering ────────────────────────────────────────────────────

fn render(f: &mut Frame, state: &DashboardState, selected_cq: u8, base_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header + tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Footer / key hints
        ])
        .split(f.area());

    render_header(f, chunks[0], state.active_tab);
    match state.active_tab {
        Tab::Home => widgets::home::render(f, chunks[1]),
        Tab::Query => widgets::query::render(f, chunks[1], state),
        Tab::Cqs => widgets::cqs::render(f, chunks[1], state, selected_cq),
        Tab::Reasoner => widgets::reasoner::render(f, chunks[1], &state.reasoner),
        Tab::Metrics => widgets::metrics::render(f, chunks[1], state.metrics.as_ref()),
        Tab::About => widgets::about::render(f, chunks[1], base_url),
    }
    render_footer(f, chunks[2], state.active_tab);
}

fn render_header(f: &mut Frame, area: Rect, active: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let label = format!(" {} {} ", i + 1, tab.label());
            if *tab == active {
                Line::from(Span::styled(label, Theme::tab_active()))
            } else {
                Line::from(Span::styled(label, Theme::tab_inactive()))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(Span::styled(" Ontologia · Dashboard ", Theme::header()))
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        )
        .select(active.index())
        .highlight_style(Theme::tab_active())
        .divider(Span::styled(" | ", Theme::text_dim()));

    f.render_widget(tabs, area);
}

fn footer_hints(tab: Tab) -> Vec<(&'static str, &'static str)> {
    let mut hints = match tab {
        Tab::Home => vec![("a-d", "exemplo")],
        Tab::Query => vec![
            ("Ctrl+Enter", "enviar"),
            ("Ctrl+L", "limpar"),
            ("Esc", "início"),
        ],
        Tab::Cqs => vec![
            ("j/k", "selecionar"),
            ("Enter", "executar"),
            ("Espaço", "expandir"),
            ("a", "todas"),
            ("b", "lote"),
        ],
        Tab::Reasoner => vec![("c/s/z/m/a", "executar")],
        Tab::Metrics => vec![("r", "atualizar")],
        Tab::About => vec![],
    };
    if tab == Tab::Query {
        hints.push(("Ctrl+C", "sair"));
    } else {
        hints.extend([("1-6", "aba"), ("q", "sair")]);
    }
    hints.insert(0, ("Tab", "próxima aba"));
    hints
}

fn render_footer(f: &mut Frame, area: Rect, tab: Tab) {
    let spans: Vec<Span> = footer_hints(tab)
        .into_iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(format!(" {key}"), Theme::key_hint()),
                Span::styled(format!(" {desc} "), Theme::key_desc()),
            ]
        })
        .collect();
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
