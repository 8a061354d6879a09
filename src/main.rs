//! Single-shot uptime monitor.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                   UPTIME MONITOR                      │
//!                 │                                                       │
//!   env / TOML ───┼─▶ config ──▶ lifecycle::startup ──▶ Monitor           │
//!                 │                                        │              │
//!                 │         ┌──────────────────────────────┤              │
//!                 │         ▼                              ▼              │
//!   Target ◀──────┼──── health::probe              health::transition     │
//!                 │                                        │              │
//!                 │              ┌─────────────────────────┼────────┐     │
//!                 │              ▼                         ▼        ▼     │
//!                 │          state (GCS,             notify     publish   │
//!                 │          file, baseline)         (Slack)   (Pub/Sub)  │
//!                 └──────────────────────────────────────────────────────┘
//! ```
//!
//! Exit codes: 0 on a completed run, 2 on configuration errors, 1 on any
//! other failure.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use uptime_monitor::config::{load_config, ObservabilityConfig};
use uptime_monitor::lifecycle::build_monitor;
use uptime_monitor::observability::init_logging;
use uptime_monitor::MonitorError;

#[derive(Parser)]
#[command(name = "uptime-monitor", version)]
#[command(about = "Probe a URL once and alert on status transitions", long_about = None)]
struct Cli {
    /// Optional TOML file with defaults; environment variables override it.
    #[arg(short, long, env = "MONITOR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&ObservabilityConfig::default());
            let err = MonitorError::from(e);
            tracing::error!(error = %err, "Environment variables error");
            return ExitCode::from(err.exit_code());
        }
    };
    init_logging(&config.observability);

    tracing::info!("uptime-monitor v{} starting", env!("CARGO_PKG_VERSION"));

    let result = match build_monitor(&config) {
        Ok(monitor) => monitor.run_once().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            tracing::info!(
                status = %report.observed,
                outcome = ?report.outcome,
                published = report.published.is_some(),
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::from(e.exit_code())
        }
    }
}
