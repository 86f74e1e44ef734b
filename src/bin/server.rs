//! loginflow HTTP server
//!
//! Exposes the three flow operations over HTTP: compile a flow from a
//! natural-language prompt, run a flow, and close the browser session.

use clap::Parser;
use loginflow::browser::{LaunchOptions, Session};
use loginflow::report::ReportConfig;
use loginflow::server::{router, AppState};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "loginflow-server")]
#[command(version)]
#[command(about = "Natural-language login flows over HTTP", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, short = 'p', default_value = "5000")]
    port: u16,

    /// Launch the browser in headed mode (default: headless)
    #[arg(long, short = 'H')]
    headed: bool,

    /// Path to a custom Chrome binary
    #[arg(long, value_name = "PATH")]
    chrome_path: Option<PathBuf>,

    /// Persistent browser profile directory
    #[arg(long, value_name = "DIR")]
    user_data_dir: Option<PathBuf>,

    /// Disable the Chrome sandbox (needed in some containers)
    #[arg(long)]
    no_sandbox: bool,

    /// Directory for JSON/HTML reports
    #[arg(long, default_value = "target/reports")]
    reports_dir: PathBuf,

    /// Directory for saved screenshots
    #[arg(long, default_value = "target/screenshots")]
    screenshots_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = LaunchOptions::new().headless(!cli.headed).sandbox(!cli.no_sandbox);
    if let Some(path) = cli.chrome_path {
        options = options.chrome_path(path);
    }
    if let Some(dir) = cli.user_data_dir {
        options = options.user_data_dir(dir);
    }

    let state = Arc::new(AppState::new(
        Session::new(options),
        ReportConfig { reports_dir: cli.reports_dir, screenshots_dir: cli.screenshots_dir },
    ));

    let bind_addr = format!("{}:{}", cli.host, cli.port);
    eprintln!("loginflow server v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("Browser mode: {}", if cli.headed { "headed" } else { "headless" });
    eprintln!("Listening on http://{}", bind_addr);
    eprintln!("Routes: POST /nl_to_flow | POST /run_flow | POST /close");

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, router(state)).await?;

    Ok(())
}
