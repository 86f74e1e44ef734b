//! Fail-soft sequential flow execution.
//!
//! Every supplied step runs exactly once, in order, and a fault in one step
//! never short-circuits the rest: the fault becomes that step's recorded
//! error and execution moves on. The worst possible outcome is a report in
//! which every step failed.

use crate::error::{FlowError, Result};
use crate::flow::actions::ActionRunner;
use crate::flow::step::{ActionStep, RunReport, StepResult, StepStatus};
use chrono::Local;
use serde_json::Value;

/// Wire tags the executor understands
const KNOWN_ACTIONS: &[&str] = &["navigate", "fill", "click", "wait_for", "screenshot", "close"];

fn parse_step(raw: &Value) -> Result<ActionStep> {
    let tag = raw.get("action").and_then(Value::as_str).unwrap_or_default();
    if !KNOWN_ACTIONS.contains(&tag) {
        return Err(FlowError::UnknownAction(tag.to_string()));
    }

    serde_json::from_value(raw.clone())
        .map_err(|e| FlowError::ActionFailed { action: tag.to_string(), reason: e.to_string() })
}

fn dispatch<R: ActionRunner>(runner: &mut R, step: &ActionStep) -> Result<Value> {
    match step {
        ActionStep::Navigate { url } => runner.navigate(url),
        ActionStep::Fill { selector, text } => runner.fill(selector.as_deref(), text),
        ActionStep::Click { selector } => runner.click(selector),
        ActionStep::WaitFor { selector, timeout_ms } => runner.wait_for(selector, *timeout_ms),
        ActionStep::Screenshot { selector, save } => runner.screenshot(selector.as_deref(), *save),
        ActionStep::Close => runner.close(),
    }
}

/// Replay raw flow steps against a runner and aggregate the results.
///
/// Never fails as a whole; per-step faults are folded into the report.
pub fn run_flow<R: ActionRunner>(runner: &mut R, steps: &[Value]) -> RunReport {
    let mut results = Vec::with_capacity(steps.len());

    for (idx, raw) in steps.iter().enumerate() {
        let step_number = idx + 1;
        let action = raw.get("action").and_then(Value::as_str).map(str::to_string);

        let outcome = parse_step(raw).and_then(|step| dispatch(runner, &step));
        let (status, output) = match outcome {
            Ok(output) => (StepStatus::Passed, output),
            Err(e) => {
                log::warn!("step {} failed: {}", step_number, e);
                (StepStatus::Failed, serde_json::json!({"error": e.to_string()}))
            }
        };

        results.push(StepResult {
            step_number,
            action,
            status,
            input: raw.clone(),
            output,
            timestamp: Local::now().to_rfc3339(),
        });
    }

    RunReport::new(results)
}
