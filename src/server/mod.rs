//! HTTP control surface.
//!
//! Three operations over one shared browser session:
//! `POST /nl_to_flow` compiles a prompt into a flow, `POST /run_flow` replays
//! a flow and persists its report, `POST /close` tears the session down.
//! The session mutex serializes flows; running two flows against one session
//! concurrently is undefined, so callers queue on the lock instead.

use crate::browser::Session;
use crate::error::FlowError;
use crate::flow::{compile, executor, CompiledFlow, SessionRunner, StepResult};
use crate::flow::step::RunStatus;
use crate::report::{self, ReportConfig};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::post,
    Router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared state: the single session plus report output locations
pub struct AppState {
    pub session: Mutex<Session>,
    pub reports: ReportConfig,
}

impl AppState {
    pub fn new(session: Session, reports: ReportConfig) -> Self {
        Self { session: Mutex::new(session), reports }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct NlToFlowRequest {
    pub prompt: String,

    /// Launch the browser headless for this scan (default: true)
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Optional selector to wait for before scanning the page
    #[serde(default, rename = "wait_for")]
    pub wait_selector: Option<String>,
}

fn default_headless() -> bool {
    true
}

#[derive(Debug, Serialize, JsonSchema)]
pub struct RunFlowResponse {
    pub report_id: String,
    pub overall_status: RunStatus,
    pub json_report: String,
    pub html_report: String,
    pub results: Vec<StepResult>,
}

fn error_response(err: FlowError) -> Response {
    let status = match err {
        FlowError::NoUrlInPrompt | FlowError::UnknownAction(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({"error": err.to_string()}))).into_response()
}

async fn nl_to_flow(State(state): State<Arc<AppState>>, Json(req): Json<NlToFlowRequest>) -> Response {
    let mut session = state.session.lock().await;
    session.set_headless(req.headless);

    match compile(&mut session, &req.prompt, req.wait_selector.as_deref()) {
        Ok(compiled) => Json::<CompiledFlow>(compiled).into_response(),
        Err(e) => error_response(e),
    }
}

async fn run_flow(State(state): State<Arc<AppState>>, Json(steps): Json<Vec<Value>>) -> Response {
    let mut session = state.session.lock().await;
    let mut runner = SessionRunner::new(&mut session, &state.reports);

    let report = executor::run_flow(&mut runner, &steps);
    match report::persist(&report, &state.reports) {
        Ok(paths) => Json(RunFlowResponse {
            report_id: report.report_id,
            overall_status: report.overall_status,
            json_report: paths.json.display().to_string(),
            html_report: paths.html.display().to_string(),
            results: report.results,
        })
        .into_response(),
        Err(e) => error_response(e),
    }
}

async fn close(State(state): State<Arc<AppState>>) -> Response {
    let mut session = state.session.lock().await;
    match session.close() {
        Ok(()) => Json(json!({"status": "browser_closed"})).into_response(),
        Err(e) => error_response(e),
    }
}

/// Build the three-operation router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/nl_to_flow", post(nl_to_flow))
        .route("/run_flow", post(run_flow))
        .route("/close", post(close))
        .with_state(state)
}
