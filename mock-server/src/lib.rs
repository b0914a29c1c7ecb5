use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Minimum length of a query word that counts as a search term.
const MIN_TERM_LEN: usize = 3;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PruneInput {
    pub code: String,
    pub query: String,
    pub threshold: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PruneOutput {
    pub score: f64,
    pub pruned_code: String,
    pub original_lines: usize,
    pub pruned_lines: usize,
}

/// How the mock answers requests.
#[derive(Clone, Debug)]
pub enum Behavior {
    /// Prune by query-term matching.
    Prune,
    /// Answer every request with this status and raw body.
    Respond { status: u16, body: String },
    /// Sleep, then prune normally.
    Delay(Duration),
}

#[derive(Clone)]
pub struct MockState {
    behavior: Behavior,
    prune_hits: Arc<AtomicUsize>,
}

impl MockState {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            prune_hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `POST /prune` requests received so far.
    pub fn prune_hits(&self) -> usize {
        self.prune_hits.load(Ordering::SeqCst)
    }
}

pub fn app() -> Router {
    router(MockState::new(Behavior::Prune))
}

pub fn router(state: MockState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/prune", post(prune))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, router(state)).await
}

/// Keep the non-blank lines of `code` that mention any query term
/// (case-insensitive). Score is the fraction of non-blank lines kept.
pub fn prune_lines(code: &str, query: &str) -> PruneOutput {
    let terms: Vec<String> = query
        .split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|t| t.chars().count() >= MIN_TERM_LEN)
        .map(str::to_lowercase)
        .collect();

    let lines: Vec<&str> = code.lines().filter(|l| !l.trim().is_empty()).collect();
    let kept: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| {
            let lower = line.to_lowercase();
            terms.iter().any(|t| lower.contains(t.as_str()))
        })
        .collect();

    let score = if lines.is_empty() {
        0.0
    } else {
        kept.len() as f64 / lines.len() as f64
    };

    PruneOutput {
        score,
        pruned_code: kept.join("\n"),
        original_lines: lines.len(),
        pruned_lines: kept.len(),
    }
}

/// One-line log summary of a prune request; sizes in characters.
fn describe(input: &PruneInput) -> String {
    format!(
        "prune request: {} chars, query={:?}, threshold={}",
        input.code.chars().count(),
        input.query,
        input.threshold
    )
}

fn raw_json(status: u16, body: String) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn health(State(state): State<MockState>) -> Response {
    match &state.behavior {
        Behavior::Respond { status, .. } => raw_json(*status, r#"{"status":"scripted"}"#.to_string()),
        _ => Json(serde_json::json!({ "status": "ok" })).into_response(),
    }
}

async fn prune(State(state): State<MockState>, Json(input): Json<PruneInput>) -> Response {
    state.prune_hits.fetch_add(1, Ordering::SeqCst);
    log::info!("{}", describe(&input));

    match &state.behavior {
        Behavior::Respond { status, body } => raw_json(*status, body.clone()),
        Behavior::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            Json(prune_lines(&input.code, &input.query)).into_response()
        }
        Behavior::Prune => Json(prune_lines(&input.code, &input.query)).into_response(),
    }
}
