// src/dashboard/state.rs — Dashboard state: tabs, regions, request sequencing

use std::str::FromStr;

use super::chat::ChatLog;
use super::cq::{CqPanel, CqSummaryView, CQ_COUNT};
use super::metrics::MetricsDisplay;
use super::reasoner::ReasonerView;
use crate::infra::errors::DashboardError;

// ── Tabs ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Query,
    Cqs,
    Reasoner,
    Metrics,
    About,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Home,
        Tab::Query,
        Tab::Cqs,
        Tab::Reasoner,
        Tab::Metrics,
        Tab::About,
    ];

    /// Identifier used in element ids (`{name}-tab`) and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Tab::Home => "home",
            Tab::Query => "query",
            Tab::Cqs => "cqs",
            Tab::Reasoner => "reasoner",
            Tab::Metrics => "metrics",
            Tab::About => "about",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Início",
            Tab::Query => "Consultas",
            Tab::Cqs => "CQs",
            Tab::Reasoner => "Reasoner",
            Tab::Metrics => "Métricas",
            Tab::About => "Sobre",
        }
    }

    pub fn index(&self) -> usize {
        Tab::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn from_index(i: usize) -> Tab {
        *Tab::ALL.get(i).unwrap_or(&Tab::Home)
    }

    pub fn next(&self) -> Tab {
        Tab::from_index((self.index() + 1) % Tab::ALL.len())
    }

    pub fn prev(&self) -> Tab {
        Tab::from_index((self.index() + Tab::ALL.len() - 1) % Tab::ALL.len())
    }
}

impl FromStr for Tab {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Tab::ALL
            .into_iter()
            .find(|t| t.name() == lower)
            .ok_or_else(|| DashboardError::UnknownTab(s.to_string()))
    }
}

// ── Request sequencing ───────────────────────────────────────────

/// Generation ticket handed out when an operation starts on a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic generation counter for one display region. Only the response
/// holding the latest ticket may write the region.
#[derive(Debug, Default, Clone)]
pub struct Sequencer {
    current: u64,
}

impl Sequencer {
    pub fn issue(&mut self) -> Ticket {
        self.current += 1;
        Ticket(self.current)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current == ticket.0
    }
}

// ── State ────────────────────────────────────────────────────────

/// Every display region of the dashboard, owned in one place and handed to
/// the render functions explicitly.
#[derive(Debug)]
pub struct DashboardState {
    pub active_tab: Tab,
    /// Contents of the query input field.
    pub query_input: String,
    pub chat: ChatLog,
    /// Panels for CQ1..CQ10, in order.
    pub cq_panels: Vec<CqPanel>,
    pub cq_summary: CqSummaryView,
    pub reasoner: ReasonerView,
    /// `None` until the first successful load.
    pub metrics: Option<MetricsDisplay>,
    /// CQ panel most recently brought into view.
    pub scroll_target: Option<u8>,

    pub(crate) cq_summary_seq: Sequencer,
    pub(crate) reasoner_seq: Sequencer,
    pub(crate) metrics_seq: Sequencer,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            active_tab: Tab::Home,
            query_input: String::new(),
            chat: ChatLog::default(),
            cq_panels: (1..=CQ_COUNT).map(CqPanel::new).collect(),
            cq_summary: CqSummaryView::Idle,
            reasoner: ReasonerView::Idle,
            metrics: None,
            scroll_target: None,
            cq_summary_seq: Sequencer::default(),
            reasoner_seq: Sequencer::default(),
            metrics_seq: Sequencer::default(),
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cq_panel(&self, number: u8) -> Option<&CqPanel> {
        number
            .checked_sub(1)
            .and_then(|i| self.cq_panels.get(usize::from(i)))
    }

    pub(crate) fn cq_panel_mut(&mut self, number: u8) -> Option<&mut CqPanel> {
        number
            .checked_sub(1)
            .and_then(|i| self.cq_panels.get_mut(usize::from(i)))
    }
}
