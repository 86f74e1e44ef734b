//! Flow, step, and report data model.
//!
//! Steps are immutable once constructed. On the wire a flow is a JSON array
//! of `{"action": ..., ...}` objects; keeping the wire form loose lets the
//! executor degrade an unrecognized action tag into a failed step instead of
//! rejecting the whole request.

use chrono::Local;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5000;

/// Placeholder filled in when the prompt carried no username
pub const USERNAME_PLACEHOLDER: &str = "<USERNAME>";
/// Placeholder filled in when the prompt carried no password
pub const PASSWORD_PLACEHOLDER: &str = "<PASSWORD>";

fn default_wait_timeout() -> u64 {
    DEFAULT_WAIT_TIMEOUT_MS
}

/// One declarative browser action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActionStep {
    /// Load a URL in the session page
    Navigate { url: String },

    /// Type text into the element behind a selector. The selector is
    /// optional so a compiled flow stays structurally complete even when a
    /// role was not discovered; executing such a step fails softly.
    Fill { selector: Option<String>, text: String },

    /// Click the element behind a selector
    Click { selector: String },

    /// Wait until a selector resolves, up to a timeout
    WaitFor {
        selector: String,
        #[serde(rename = "timeout", default = "default_wait_timeout")]
        timeout_ms: u64,
    },

    /// Capture the page (or one element); `save` writes a PNG file instead
    /// of returning base64 inline
    Screenshot {
        #[serde(default)]
        selector: Option<String>,
        #[serde(default)]
        save: bool,
    },

    /// Tear the browser session down
    Close,
}

impl ActionStep {
    /// The wire tag for this step
    pub fn name(&self) -> &'static str {
        match self {
            ActionStep::Navigate { .. } => "navigate",
            ActionStep::Fill { .. } => "fill",
            ActionStep::Click { .. } => "click",
            ActionStep::WaitFor { .. } => "wait_for",
            ActionStep::Screenshot { .. } => "screenshot",
            ActionStep::Close => "close",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Passed,
    Failed,
}

/// Aggregate verdict; failed iff any step failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Passed,
    Failed,
}

/// Outcome of one executed step
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StepResult {
    pub step_number: usize,
    /// Wire tag of the attempted action, if the step carried one
    pub action: Option<String>,
    pub status: StepStatus,
    /// The raw step as supplied
    pub input: Value,
    /// Action output, or `{"error": ...}` on failure
    pub output: Value,
    pub timestamp: String,
}

/// Write-once record of a full flow run
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RunReport {
    pub report_id: String,
    pub overall_status: RunStatus,
    pub results: Vec<StepResult>,
}

impl RunReport {
    /// Assemble a report from step results; the id is derived from the wall
    /// clock so consecutive runs sort by name
    pub fn new(results: Vec<StepResult>) -> Self {
        let failed = results.iter().any(|r| r.status == StepStatus::Failed);
        Self {
            report_id: format!("flow_{}", Local::now().format("%Y-%m-%d_%H-%M-%S")),
            overall_status: if failed { RunStatus::Failed } else { RunStatus::Passed },
            results,
        }
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.status == StepStatus::Passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| r.status == StepStatus::Failed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_step_wire_format() {
        let step: ActionStep =
            serde_json::from_value(json!({"action": "fill", "selector": "#em", "text": "x"})).unwrap();
        assert_eq!(step, ActionStep::Fill { selector: Some("#em".into()), text: "x".into() });

        let step: ActionStep = serde_json::from_value(json!({"action": "wait_for", "selector": "body"})).unwrap();
        assert_eq!(
            step,
            ActionStep::WaitFor { selector: "body".into(), timeout_ms: DEFAULT_WAIT_TIMEOUT_MS }
        );

        let step: ActionStep = serde_json::from_value(json!({"action": "close"})).unwrap();
        assert_eq!(step, ActionStep::Close);
    }

    #[test]
    fn test_unknown_action_tag_is_rejected() {
        let result = serde_json::from_value::<ActionStep>(json!({"action": "frobnicate"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_wait_for_serializes_timeout_key() {
        let value = serde_json::to_value(ActionStep::WaitFor { selector: "body".into(), timeout_ms: 8000 }).unwrap();
        assert_eq!(value, json!({"action": "wait_for", "selector": "body", "timeout": 8000}));
    }

    #[test]
    fn test_report_status_aggregation() {
        let passed = StepResult {
            step_number: 1,
            action: Some("navigate".into()),
            status: StepStatus::Passed,
            input: json!({}),
            output: json!({}),
            timestamp: String::new(),
        };
        let mut failed = passed.clone();
        failed.status = StepStatus::Failed;

        let report = RunReport::new(vec![passed.clone()]);
        assert_eq!(report.overall_status, RunStatus::Passed);

        let report = RunReport::new(vec![passed, failed]);
        assert_eq!(report.overall_status, RunStatus::Failed);
        assert_eq!(report.passed_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert!(report.report_id.starts_with("flow_"));
    }

    #[test]
    fn test_status_casing_matches_wire_format() {
        assert_eq!(serde_json::to_value(StepStatus::Passed).unwrap(), json!("passed"));
        assert_eq!(serde_json::to_value(RunStatus::Failed).unwrap(), json!("FAILED"));
    }
}
