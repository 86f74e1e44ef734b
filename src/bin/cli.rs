//! One-shot loginflow CLI: compile a prompt into a flow, optionally run it,
//! and print the results as JSON.

use clap::Parser;
use loginflow::browser::{LaunchOptions, Session};
use loginflow::flow::{compile, run_flow, SessionRunner};
use loginflow::report::{persist, ReportConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "loginflow")]
#[command(version)]
#[command(about = "Compile a natural-language login instruction into a browser flow", long_about = None)]
struct Cli {
    /// The instruction, e.g. `go to https://example.com and login with "a@b.c" and password "x"`
    prompt: String,

    /// Launch the browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Selector to wait for before scanning the page
    #[arg(long, value_name = "SELECTOR")]
    wait_for: Option<String>,

    /// Also execute the compiled flow and write a report
    #[arg(long)]
    run: bool,

    /// Directory for JSON/HTML reports
    #[arg(long, default_value = "target/reports")]
    reports_dir: PathBuf,

    /// Directory for saved screenshots
    #[arg(long, default_value = "target/screenshots")]
    screenshots_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut session = Session::new(LaunchOptions::new().headless(!cli.headed));
    let compiled = compile(&mut session, &cli.prompt, cli.wait_for.as_deref())?;

    println!("{}", serde_json::to_string_pretty(&compiled)?);

    if cli.run {
        let config = ReportConfig { reports_dir: cli.reports_dir, screenshots_dir: cli.screenshots_dir };
        let steps: Vec<serde_json::Value> =
            compiled.flow.iter().map(serde_json::to_value).collect::<Result<_, _>>()?;

        let mut runner = SessionRunner::new(&mut session, &config);
        let report = run_flow(&mut runner, &steps);
        let paths = persist(&report, &config)?;

        eprintln!(
            "{}: {} passed, {} failed",
            report.report_id,
            report.passed_count(),
            report.failed_count()
        );
        eprintln!("JSON report: {}", paths.json.display());
        eprintln!("HTML report: {}", paths.html.display());
    }

    session.close()?;
    Ok(())
}
