// src/dashboard/mod.rs — The dashboard component.
//
// Owns a handle to the shared `DashboardState` and a `DashboardApi` client.
// Every operation mutates its display regions in short synchronous steps and
// only awaits on network I/O, so several operations can be in flight at once.

pub mod chat;
pub mod cq;
pub mod metrics;
pub mod reasoner;
pub mod state;
pub mod views;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::api::types::ReasonerOp;
use crate::api::DashboardApi;
use crate::infra::config::MetricsConfig;
use crate::infra::errors::DashboardError;

use chat::{NO_ANSWER_TEXT, QUERY_ERROR_TEXT, SYSTEM_LABEL};
use cq::{pretty_json, CqSummaryView, CqView, CQ_COUNT};
use metrics::MetricsDisplay;
use reasoner::ReasonerView;
pub use state::{DashboardState, Tab};

/// Pause between consecutive CQs in `run_all_cqs`.
pub const CQ_RUN_PAUSE: Duration = Duration::from_millis(300);

pub type StateHandle = Arc<Mutex<DashboardState>>;

pub struct Dashboard<C> {
    api: C,
    state: StateHandle,
    metrics_config: MetricsConfig,
}

impl<C: DashboardApi> Dashboard<C> {
    pub fn new(api: C, metrics_config: MetricsConfig) -> Self {
        Self::with_state(api, metrics_config, Arc::new(Mutex::new(DashboardState::new())))
    }

    /// Use an existing state handle, e.g. one a renderer already holds.
    pub fn with_state(api: C, metrics_config: MetricsConfig, state: StateHandle) -> Self {
        Self {
            api,
            state,
            metrics_config,
        }
    }

    pub fn state(&self) -> StateHandle {
        Arc::clone(&self.state)
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    /// Lock the state. A panic in another holder does not invalidate it:
    /// every mutation is a single assignment or push.
    pub fn lock(&self) -> MutexGuard<'_, DashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Navigation ───────────────────────────────────────────────

    /// Show one tab. Opening the metrics tab reloads the metrics.
    pub async fn select_tab(&self, tab: Tab) {
        self.lock().active_tab = tab;
        if tab == Tab::Metrics {
            self.load_metrics().await;
        }
    }

    // ── Metrics ──────────────────────────────────────────────────

    /// Fetch `/metrics` and replace every slot. Failures are logged and the
    /// previous values stay on screen.
    pub async fn load_metrics(&self) {
        let ticket = self.lock().metrics_seq.issue();

        let snapshot = match self.api.metrics().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!("Erro ao carregar métricas: {e}");
                return;
            }
        };

        let mut state = self.lock();
        if !state.metrics_seq.is_current(ticket) {
            tracing::debug!("Dropping stale metrics response");
            return;
        }
        state.metrics = Some(MetricsDisplay::from_snapshot(
            &snapshot,
            &self.metrics_config,
        ));
    }

    // ── Chat ─────────────────────────────────────────────────────

    /// Put `text` in the query input field.
    pub fn set_query(&self, text: &str) {
        self.lock().query_input = text.to_string();
    }

    pub fn clear_chat(&self) {
        self.lock().chat.clear();
    }

    /// Submit whatever is in the query input (Ctrl+Enter).
    pub async fn submit_current_query(&self) {
        let text = self.lock().query_input.clone();
        self.submit_query(&text).await;
    }

    /// Send a question and append the answer (or an error) to the chat.
    pub async fn submit_query(&self, text: &str) {
        let query = text.trim();
        if query.is_empty() {
            return;
        }

        let loading_id = {
            let mut state = self.lock();
            state.chat.push_user(query);
            let id = state.chat.push_loading();
            state.query_input.clear();
            id
        };

        let result = self.api.query(query).await;

        let mut state = self.lock();
        state.chat.remove(&loading_id);
        match result {
            Ok(response) if response.is_error() => {
                let message = response
                    .response
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| QUERY_ERROR_TEXT.to_string());
                state.chat.push_error(&message);
            }
            Ok(response) => {
                let answer = [response.response.as_deref(), response.answer.as_deref()]
                    .into_iter()
                    .flatten()
                    .find(|s| !s.is_empty())
                    .unwrap_or(NO_ANSWER_TEXT)
                    .to_string();
                let author = response
                    .agent
                    .as_deref()
                    .filter(|a| !a.is_empty())
                    .unwrap_or(SYSTEM_LABEL)
                    .to_string();
                state
                    .chat
                    .push_assistant(&author, &answer, response.citations);
            }
            Err(e) => {
                tracing::error!("Query failed: {e}");
                state.chat.push_error(&format!("{QUERY_ERROR_TEXT}: {e}"));
            }
        }
    }

    // ── Competency questions ─────────────────────────────────────

    /// Run one CQ and render its panel. Only an out-of-range number is an
    /// error; request failures are rendered in the panel.
    pub async fn run_cq(&self, number: u8) -> Result<(), DashboardError> {
        let ticket = {
            let mut state = self.lock();
            let panel = state
                .cq_panel_mut(number)
                .ok_or(DashboardError::InvalidCq {
                    number,
                    max: CQ_COUNT,
                })?;
            panel.view = CqView::Loading;
            panel.expanded = true;
            let ticket = panel.seq.issue();
            state.scroll_target = Some(number);
            ticket
        };

        let view = match self.api.run_cq(number).await {
            Ok(response) => CqView::from_response(&response),
            Err(e) => {
                tracing::warn!(cq = number, "CQ request failed: {e}");
                CqView::Failed(e.to_string())
            }
        };

        let mut state = self.lock();
        if let Some(panel) = state.cq_panel_mut(number) {
            if panel.seq.is_current(ticket) {
                panel.view = view;
            } else {
                tracing::debug!(cq = number, "Dropping stale CQ response");
            }
        }
        Ok(())
    }

    /// Run CQ1..CQ10 one after another with a fixed pause between runs.
    pub async fn run_all_cqs(&self) {
        for number in 1..=CQ_COUNT {
            if number > 1 {
                tokio::time::sleep(CQ_RUN_PAUSE).await;
            }
            if let Err(e) = self.run_cq(number).await {
                tracing::error!("{e}");
            }
        }
    }

    /// Run every CQ server-side in one request (`/cqs/all`) and show the
    /// combined results.
    pub async fn run_all_cqs_batch(&self) {
        let ticket = {
            let mut state = self.lock();
            state.cq_summary = CqSummaryView::Loading;
            state.cq_summary_seq.issue()
        };

        let view = match self.api.run_all_cqs().await {
            Ok(response) => CqSummaryView::from_response(&response),
            Err(e) => CqSummaryView::Failed(e.to_string()),
        };

        let mut state = self.lock();
        if state.cq_summary_seq.is_current(ticket) {
            state.cq_summary = view;
        }
    }

    /// Show or hide a panel's results without re-running it.
    pub fn toggle_cq(&self, number: u8) -> Result<(), DashboardError> {
        let mut state = self.lock();
        let panel = state
            .cq_panel_mut(number)
            .ok_or(DashboardError::InvalidCq {
                number,
                max: CQ_COUNT,
            })?;
        panel.expanded = !panel.expanded;
        Ok(())
    }

    // ── Reasoner ─────────────────────────────────────────────────

    /// Trigger a reasoner operation and show its raw JSON result.
    pub async fn run_reasoner(&self, op: ReasonerOp) {
        let ticket = {
            let mut state = self.lock();
            state.reasoner = ReasonerView::Running(op);
            state.reasoner_seq.issue()
        };

        let view = match self.api.reasoner(op).await {
            Ok(json) => ReasonerView::Result {
                op,
                json: pretty_json(&json),
            },
            Err(e) => {
                tracing::warn!(op = op.name(), "Reasoner request failed: {e}");
                ReasonerView::Failed(e.to_string())
            }
        };

        let mut state = self.lock();
        if state.reasoner_seq.is_current(ticket) {
            state.reasoner = view;
        } else {
            tracing::debug!(op = op.name(), "Dropping stale reasoner response");
        }
    }

    // ── Health ───────────────────────────────────────────────────

    pub async fn health(&self) -> Result<serde_json::Value, DashboardError> {
        self.api.health().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{CqResponse, QueryResponse};
    use crate::api::MockDashboardApi;
    use super::cq::CqStatus;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn dashboard(api: MockDashboardApi) -> Dashboard<MockDashboardApi> {
        Dashboard::new(api, MetricsConfig::default())
    }

    #[tokio::test]
    async fn test_blank_query_sends_nothing() {
        let mut api = MockDashboardApi::new();
        api.expect_query().never();
        let d = dashboard(api);
        d.submit_query("").await;
        d.submit_query("   ").await;
        assert!(d.lock().chat.is_empty());
    }

    #[tokio::test]
    async fn test_query_sends_trimmed_text_and_clears_input() {
        let mut api = MockDashboardApi::new();
        api.expect_query()
            .withf(|q: &str| q == "Quais cursos?")
            .times(1)
            .returning(|_| {
                Ok(serde_json::from_value::<QueryResponse>(json!({
                    "answer": "Ontologias",
                    "agent": "LMSAgent"
                }))
                .unwrap())
            });
        let d = dashboard(api);
        d.set_query("  Quais cursos?  ");
        d.submit_current_query().await;

        let state = d.lock();
        assert!(state.query_input.is_empty());
        let messages = state.chat.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].text, "Quais cursos?");
        assert_eq!(messages[1].author, "LMSAgent");
        assert_eq!(messages[1].text, "Ontologias");
        assert!(messages.iter().all(|m| !m.loading));
    }

    #[tokio::test]
    async fn test_application_error_uses_response_text() {
        let mut api = MockDashboardApi::new();
        api.expect_query().returning(|_| {
            Ok(serde_json::from_value::<QueryResponse>(json!({
                "response": "Erro ao processar consulta: índice vazio",
                "agent": "error",
                "error": true
            }))
            .unwrap())
        });
        let d = dashboard(api);
        d.submit_query("x").await;

        let state = d.lock();
        let last = state.chat.messages().last().unwrap();
        assert_eq!(last.role, chat::Role::Error);
        assert_eq!(last.text, "Erro ao processar consulta: índice vazio");
    }

    #[tokio::test]
    async fn test_cq_out_of_range_rejected_without_request() {
        let mut api = MockDashboardApi::new();
        api.expect_run_cq().never();
        let d = dashboard(api);
        assert!(matches!(
            d.run_cq(11).await,
            Err(DashboardError::InvalidCq { number: 11, .. })
        ));
        assert!(d.run_cq(0).await.is_err());
        assert!(d.toggle_cq(0).is_err());
    }

    #[tokio::test]
    async fn test_cq_success_expands_panel() {
        let mut api = MockDashboardApi::new();
        api.expect_run_cq().withf(|n| *n == 4).returning(|_| {
            Ok(serde_json::from_value::<CqResponse>(json!({
                "cq_number": 4,
                "status": "success",
                "results": [{"professor": "Ana", "estudante": "Bruno"}]
            }))
            .unwrap())
        });
        let d = dashboard(api);
        d.run_cq(4).await.unwrap();

        let state = d.lock();
        let panel = state.cq_panel(4).unwrap();
        assert_eq!(panel.status(), CqStatus::Success);
        assert!(panel.expanded);
        assert_eq!(state.scroll_target, Some(4));
    }

    #[tokio::test]
    async fn test_toggle_does_not_fetch() {
        let mut api = MockDashboardApi::new();
        api.expect_run_cq().never();
        let d = dashboard(api);
        d.toggle_cq(2).unwrap();
        assert!(d.lock().cq_panel(2).unwrap().expanded);
        d.toggle_cq(2).unwrap();
        assert!(!d.lock().cq_panel(2).unwrap().expanded);
        assert_eq!(d.lock().cq_panel(2).unwrap().status(), CqStatus::Idle);
    }

    #[tokio::test]
    async fn test_reasoner_failure_rendered() {
        let mut api = MockDashboardApi::new();
        api.expect_reasoner()
            .returning(|_| Err(DashboardError::transport("/reasoner/realize", "connection refused")));
        let d = dashboard(api);
        d.run_reasoner(ReasonerOp::Realize).await;
        assert_eq!(
            d.lock().reasoner,
            ReasonerView::Failed("connection refused".into())
        );
    }

    #[tokio::test]
    async fn test_metrics_tab_triggers_single_load() {
        let mut api = MockDashboardApi::new();
        api.expect_metrics()
            .times(1)
            .returning(|| Err(DashboardError::transport("/metrics", "offline")));
        let d = dashboard(api);
        d.select_tab(Tab::Reasoner).await;
        d.select_tab(Tab::Metrics).await;
        let state = d.lock();
        assert_eq!(state.active_tab, Tab::Metrics);
        assert!(state.metrics.is_none());
    }

    #[tokio::test]
    async fn test_batch_summary() {
        let mut api = MockDashboardApi::new();
        api.expect_run_all_cqs().returning(|| {
            Ok(json!({"status": "success", "results": {"CQ1": {"results": []}}}))
        });
        let d = dashboard(api);
        d.run_all_cqs_batch().await;
        let state = d.lock();
        match &state.cq_summary {
            CqSummaryView::Results(entries) => assert_eq!(entries[0].0, "CQ1"),
            other => panic!("expected results, got {other:?}"),
        }
    }
}
