//! Run-report persistence: one machine-readable JSON file and one rendered
//! HTML file per run, named by the report id, plus screenshot files referenced
//! from step outputs.

use crate::error::Result;
use crate::flow::step::{RunReport, RunStatus, StepStatus};
use chrono::Local;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Where reports and screenshots land. Directories are created on first use.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub reports_dir: PathBuf,
    pub screenshots_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("target/reports"),
            screenshots_dir: PathBuf::from("target/screenshots"),
        }
    }
}

/// Files written for one run
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub json: PathBuf,
    pub html: PathBuf,
}

/// Write the JSON and HTML reports for a run
pub fn persist(report: &RunReport, config: &ReportConfig) -> Result<ReportPaths> {
    fs::create_dir_all(&config.reports_dir)?;

    let json_path = config.reports_dir.join(format!("{}.json", report.report_id));
    fs::write(&json_path, serde_json::to_string_pretty(report)?)?;

    let html_path = config.reports_dir.join(format!("{}.html", report.report_id));
    fs::write(&html_path, render_html(report))?;

    log::info!("report written to {}", json_path.display());

    Ok(ReportPaths { json: json_path, html: html_path })
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn status_class(status: StepStatus) -> &'static str {
    match status {
        StepStatus::Passed => "passed",
        StepStatus::Failed => "failed",
    }
}

/// A step's screenshot cell: inline base64 data or a link to the saved file
fn screenshot_cell(output: &Value) -> String {
    let shot = output.get("screenshot").unwrap_or(output);

    if let Some(data) = shot.get("data").and_then(Value::as_str) {
        return format!("<img src=\"data:image/png;base64,{}\" width=\"300\"/>", data);
    }
    if let Some(path) = shot.get("path").and_then(Value::as_str) {
        return format!("<a href=\"{0}\" target=\"_blank\"><img src=\"{0}\" width=\"200\"/></a>", path);
    }
    String::new()
}

/// Render the human-readable report: a summary plus one table row per step
/// with collapsible input/output payloads.
pub fn render_html(report: &RunReport) -> String {
    let overall_class = match report.overall_status {
        RunStatus::Passed => "passed",
        RunStatus::Failed => "failed",
    };
    let overall_text = match report.overall_status {
        RunStatus::Passed => "PASSED",
        RunStatus::Failed => "FAILED",
    };

    let mut html = vec![
        format!("<html><head><title>Flow Report {}</title>", report.report_id),
        "<style>".to_string(),
        "body{font-family:Arial;margin:20px;}".to_string(),
        "table{border-collapse:collapse;width:100%;margin-bottom:20px;}".to_string(),
        "th,td{border:1px solid #ddd;padding:8px;vertical-align:top;}".to_string(),
        "th{background:#f4f4f4;}".to_string(),
        ".passed{color:green;font-weight:bold;}".to_string(),
        ".failed{color:red;font-weight:bold;}".to_string(),
        "pre{white-space:pre-wrap;word-wrap:break-word;max-height:200px;overflow:auto;background:#f9f9f9;padding:6px;border-radius:4px;}".to_string(),
        "details{margin:4px 0;}".to_string(),
        "</style></head><body>".to_string(),
        format!("<h1>Flow Report: {}</h1>", report.report_id),
        format!("<p>Generated at: {}</p>", Local::now().to_rfc3339()),
        "<h2>Summary</h2>".to_string(),
        format!("<p>Overall Status: <span class='{}'>{}</span></p>", overall_class, overall_text),
        format!(
            "<p>Total Steps: {} | Passed: <span class='passed'>{}</span> | Failed: <span class='failed'>{}</span></p>",
            report.results.len(),
            report.passed_count(),
            report.failed_count()
        ),
        "<h2>Step Details</h2>".to_string(),
        "<table>".to_string(),
        "<tr><th>Step</th><th>Action</th><th>Status</th><th>Input</th><th>Output</th><th>Screenshot</th></tr>"
            .to_string(),
    ];

    for r in &report.results {
        let input = serde_json::to_string_pretty(&r.input).unwrap_or_default();
        let output = serde_json::to_string_pretty(&r.output).unwrap_or_default();
        html.push(format!(
            "<tr><td>{}</td><td>{}</td><td class='{}'>{}</td>\
             <td><details><summary>Show Input</summary><pre>{}</pre></details></td>\
             <td><details><summary>Show Output</summary><pre>{}</pre></details></td>\
             <td>{}</td></tr>",
            r.step_number,
            r.action.as_deref().unwrap_or("-"),
            status_class(r.status),
            status_class(r.status).to_uppercase(),
            escape(&input),
            escape(&output),
            screenshot_cell(&r.output),
        ));
    }

    html.push("</table></body></html>".to_string());
    html.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::step::StepResult;
    use serde_json::json;

    fn sample_report() -> RunReport {
        RunReport::new(vec![
            StepResult {
                step_number: 1,
                action: Some("navigate".into()),
                status: StepStatus::Passed,
                input: json!({"action": "navigate", "url": "https://example.com"}),
                output: json!({"status": "navigated"}),
                timestamp: "2026-01-01T00:00:00".into(),
            },
            StepResult {
                step_number: 2,
                action: Some("click".into()),
                status: StepStatus::Failed,
                input: json!({"action": "click", "selector": "#gone"}),
                output: json!({"error": "element '#gone' not found"}),
                timestamp: "2026-01-01T00:00:01".into(),
            },
        ])
    }

    #[test]
    fn test_render_html_summary() {
        let html = render_html(&sample_report());

        assert!(html.contains("Overall Status: <span class='failed'>FAILED</span>"));
        assert!(html.contains("Total Steps: 2"));
        assert!(html.contains("navigate"));
        assert!(html.contains("element '#gone' not found"));
    }

    #[test]
    fn test_screenshot_cell_variants() {
        let inline = json!({"screenshot": {"data": "QUJD"}});
        assert!(screenshot_cell(&inline).contains("data:image/png;base64,QUJD"));

        let saved = json!({"status": "screenshot_saved", "path": "target/screenshots/s.png"});
        assert!(screenshot_cell(&saved).contains("href=\"target/screenshots/s.png\""));

        assert_eq!(screenshot_cell(&json!({"status": "navigated"})), "");
    }

    #[test]
    fn test_persist_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig {
            reports_dir: dir.path().join("reports"),
            screenshots_dir: dir.path().join("screenshots"),
        };

        let paths = persist(&sample_report(), &config).unwrap();

        assert!(paths.json.exists());
        assert!(paths.html.exists());
        let json: RunReport = serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(json.results.len(), 2);
    }
}
