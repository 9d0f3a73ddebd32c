// benches/benchmarks.rs — Performance benchmarks (criterion)
//
// Covers the work done on every response:
//   1. Decoding: CQ and query responses from raw JSON
//   2. Region rendering: CQ panels, chat transcript, full page (HTML)
//   3. Terminal rendering: the same regions as styled lines

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::{json, Value};

use ontodash::api::types::{Citations, CqResponse, QueryResponse};
use ontodash::dashboard::chat::ChatLog;
use ontodash::dashboard::cq::CqView;
use ontodash::dashboard::{views, DashboardState};
use ontodash::tui::widgets::{cqs, plain_text, query};

// ─── Helpers ────────────────────────────────────────────────────────────────

fn cq_body(rows: usize) -> Vec<u8> {
    let results: Vec<Value> = (0..rows)
        .map(|i| {
            json!({
                "curso": format!("Curso {i}"),
                "professor": format!("Professor {}", i % 7),
                "modulos": ["M1", "M2", "M3"],
                "carga_horaria": 60,
            })
        })
        .collect();
    serde_json::to_vec(&json!({"cq_number": 1, "status": "success", "results": results}))
        .expect("serialize")
}

fn citations() -> Citations {
    serde_json::from_value(json!({
        "documents": [
            {"source": "ementa.pdf", "score": 0.873},
            {"chunk": "Módulo 2: Lógica de Descrição", "score": 0.51},
            "plano_de_ensino.docx"
        ],
        "iris": [
            "http://example.org/ontologia/lms#CursoDeOntologiasEWebSemanticaAvancada",
            {"iri": "http://example.org/ontologia/lms#Professor"}
        ]
    }))
    .expect("citations")
}

/// A transcript of `n` question/answer pairs.
fn build_chat(n: usize) -> ChatLog {
    let mut log = ChatLog::default();
    for i in 0..n {
        log.push_user(&format!("Pergunta {i}: quais cursos têm <pré-requisitos>?"));
        log.push_assistant(
            "LMSAgent",
            &format!("Resposta {i}\ncom várias linhas\ne & caracteres especiais"),
            Some(citations()),
        );
    }
    log
}

fn populated_state() -> DashboardState {
    let mut state = DashboardState::new();
    let response: CqResponse = serde_json::from_slice(&cq_body(20)).expect("decode");
    for panel in &mut state.cq_panels {
        panel.expanded = true;
        panel.view = CqView::from_response(&response);
    }
    state.chat = build_chat(50);
    state
}

// ─── Benchmark: Decoding ────────────────────────────────────────────────────

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let body = cq_body(1000);
    group.bench_function("cq_response_1000_rows", |b| {
        b.iter(|| {
            let response: CqResponse = serde_json::from_slice(black_box(&body)).expect("decode");
            CqView::from_response(&response)
        })
    });

    let body = serde_json::to_vec(&json!({
        "response": "O curso de Ontologias exige Lógica.",
        "agent": "LMSAgent",
        "citations": {
            "documents": [{"source": "ementa.pdf", "score": 0.873}],
            "iris": ["http://example.org/ontologia/lms#Curso"]
        }
    }))
    .expect("serialize");
    group.bench_function("query_response", |b| {
        b.iter(|| {
            let _response: QueryResponse =
                serde_json::from_slice(black_box(&body)).expect("decode");
        })
    });

    group.finish();
}

// ─── Benchmark: HTML regions ────────────────────────────────────────────────

fn bench_html(c: &mut Criterion) {
    let state = populated_state();
    let mut group = c.benchmark_group("html");

    group.bench_function("cq_panel", |b| {
        b.iter(|| views::render_cq_panel(black_box(&state.cq_panels[0])).expect("render"))
    });

    group.bench_function("chat_100_msgs", |b| {
        b.iter(|| views::render_chat(black_box(&state.chat)).expect("render"))
    });

    group.bench_function("full_page", |b| {
        b.iter(|| views::render_page(black_box(&state)).expect("render"))
    });

    group.finish();
}

// ─── Benchmark: Terminal regions ────────────────────────────────────────────

fn bench_terminal(c: &mut Criterion) {
    let state = populated_state();
    let mut group = c.benchmark_group("terminal");

    group.bench_function("cq_list", |b| {
        b.iter(|| cqs::lines(black_box(&state), Some(1)))
    });

    group.bench_function("chat_100_msgs_plain", |b| {
        b.iter(|| plain_text(&query::chat_lines(black_box(&state.chat))))
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_html, bench_terminal);
criterion_main!(benches);
