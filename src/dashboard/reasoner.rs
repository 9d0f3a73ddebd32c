// src/dashboard/reasoner.rs — Shared reasoner result region

use crate::api::types::ReasonerOp;

pub const REASONER_ALL_HEADING: &str = "Todos os Resultados do Reasoner";

impl ReasonerOp {
    /// Placeholder text while the operation runs.
    pub fn running_label(&self) -> &'static str {
        match self {
            ReasonerOp::Classify => "Executando classificação...",
            ReasonerOp::Consistency => "Verificando consistência...",
            ReasonerOp::Realize => "Executando realização...",
            ReasonerOp::Materialize => "Executando materialização...",
            ReasonerOp::All => "Executando todos os testes...",
        }
    }

    /// Heading of the result block.
    pub fn title(&self) -> &'static str {
        match self {
            ReasonerOp::Classify => "Classificação",
            ReasonerOp::Consistency => "Consistência",
            ReasonerOp::Realize => "Realização",
            ReasonerOp::Materialize => "Materialização",
            ReasonerOp::All => REASONER_ALL_HEADING,
        }
    }
}

/// Only the most recent operation's outcome is shown.
#[derive(Debug, Clone, PartialEq)]
pub enum ReasonerView {
    Idle,
    Running(ReasonerOp),
    Result { op: ReasonerOp, json: String },
    Failed(String),
}
