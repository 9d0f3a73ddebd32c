// src/cli/run.rs — One-shot commands: run one operation, print its region.

use crate::api::types::ReasonerOp;
use crate::api::DashboardApi;
use crate::dashboard::{views, Dashboard};
use crate::tui::widgets::{self, plain_text};

use super::OutputFormat;

pub async fn run_query<C: DashboardApi>(
    dashboard: &Dashboard<C>,
    text: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        anyhow::bail!("Query is empty");
    }
    dashboard.submit_query(text).await;

    let state = dashboard.lock();
    let out = match format {
        OutputFormat::Html => views::render_chat(&state.chat)?,
        OutputFormat::Text => plain_text(&widgets::query::chat_lines(&state.chat)),
    };
    println!("{out}");
    Ok(())
}

pub async fn run_cq<C: DashboardApi>(
    dashboard: &Dashboard<C>,
    number: u8,
    format: OutputFormat,
) -> anyhow::Result<()> {
    dashboard.run_cq(number).await?;

    let state = dashboard.lock();
    let Some(panel) = state.cq_panel(number) else {
        return Ok(());
    };
    let out = match format {
        OutputFormat::Html => views::render_cq_panel(panel)?,
        OutputFormat::Text => {
            format!("CQ{number}\n{}", plain_text(&widgets::cqs::panel_lines(panel)))
        }
    };
    println!("{out}");
    Ok(())
}

pub async fn run_all_cqs<C: DashboardApi>(
    dashboard: &Dashboard<C>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    dashboard.run_all_cqs().await;

    let state = dashboard.lock();
    let out = match format {
        OutputFormat::Html => state
            .cq_panels
            .iter()
            .map(views::render_cq_panel)
            .collect::<Result<Vec<_>, _>>()?
            .join("\n"),
        OutputFormat::Text => plain_text(&widgets::cqs::lines(&state, None)),
    };
    println!("{out}");
    Ok(())
}

pub async fn run_cq_batch<C: DashboardApi>(
    dashboard: &Dashboard<C>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    dashboard.run_all_cqs_batch().await;

    let state = dashboard.lock();
    let out = match format {
        OutputFormat::Html => views::render_cq_summary(&state.cq_summary)?,
        OutputFormat::Text => plain_text(&widgets::cqs::summary_lines(&state.cq_summary)),
    };
    println!("{out}");
    Ok(())
}

pub async fn run_reasoner<C: DashboardApi>(
    dashboard: &Dashboard<C>,
    op: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let op: ReasonerOp = op.parse()?;
    dashboard.run_reasoner(op).await;

    let state = dashboard.lock();
    let out = match format {
        OutputFormat::Html => views::render_reasoner(&state.reasoner)?,
        OutputFormat::Text => plain_text(&widgets::reasoner::lines(&state.reasoner)),
    };
    println!("{out}");
    Ok(())
}

pub async fn show_metrics<C: DashboardApi>(
    dashboard: &Dashboard<C>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    dashboard.load_metrics().await;

    let state = dashboard.lock();
    let Some(metrics) = state.metrics.as_ref() else {
        anyhow::bail!("Could not load metrics (see log output)");
    };
    let out = match format {
        OutputFormat::Html => views::render_metrics(Some(metrics))?,
        OutputFormat::Text => plain_text(&widgets::metrics::lines(Some(metrics))),
    };
    println!("{out}");
    Ok(())
}

pub async fn show_health<C: DashboardApi>(dashboard: &Dashboard<C>) -> anyhow::Result<()> {
    let health = dashboard.health().await?;
    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}

/// Full page snapshot with freshly loaded metrics.
pub async fn print_page<C: DashboardApi>(dashboard: &Dashboard<C>) -> anyhow::Result<()> {
    dashboard.load_metrics().await;
    let page = views::render_page(&dashboard.lock())?;
    println!("{page}");
    Ok(())
}
