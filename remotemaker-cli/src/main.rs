//! Remotemaker CLI
//!
//! Command-line tool that asks a remote flatmap server to build a map and
//! watches the build to completion, streaming its log to the console.
//!
//! Architecture:
//! - Config: validated runtime settings from flags and environment
//! - Launcher: one-shot job submission
//! - Monitor: polling loop (incremental log fetch, deadline, bounded retries)
//! - Console: severity-colored presentation of remote log lines
//!
//! The exit code reports the final outcome: 0 success, 1 the server reported
//! a failed build, 2 the deadline passed, 3 communication gave up, 130
//! interrupted.

mod cancel;
mod clock;
mod config;
mod console;
mod launcher;
mod monitor;

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use remotemaker_client::{MakerApi, MakerClient};
use remotemaker_core::domain::log::Severity;
use remotemaker_core::domain::outcome::Outcome;

use crate::cancel::CancelToken;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::console::Console;
use crate::launcher::SubmissionError;
use crate::monitor::{Monitor, MonitorConfig};

#[derive(Parser)]
#[command(name = "remotemaker")]
#[command(version)]
#[command(about = "Make a flatmap on a remote map server", long_about = None)]
struct Cli {
    /// Map server URL
    #[arg(long, env = "FLATMAP_SERVER")]
    server: String,

    /// Bearer token for the map server
    #[arg(long, env = "FLATMAP_TOKEN", hide_env_values = true)]
    token: String,

    /// Source repository to build from
    #[arg(long)]
    source: String,

    /// Manifest path inside the source repository
    #[arg(long)]
    manifest: String,

    /// Commit to build
    #[arg(long)]
    commit: String,

    /// Rebuild even if the server already has a map for this commit
    #[arg(long)]
    force: bool,

    /// Seconds between status polls
    #[arg(long, default_value_t = 5)]
    poll_interval: u64,

    /// Overall deadline in seconds
    #[arg(long, default_value_t = 600)]
    timeout: u64,

    /// Consecutive failed polls tolerated before giving up
    #[arg(long, default_value_t = 3)]
    max_retries: u32,

    /// Verbose request tracing plus remote debug lines
    #[arg(long)]
    debug: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(cli.debug);

    match run(cli).await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("{} {:#}", "✗".red(), e);
            let code = e
                .downcast_ref::<SubmissionError>()
                .map(SubmissionError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

/// Initialize logging
///
/// Diagnostics stay at warn level by default so the console output of the
/// remote job is what the user sees; `--debug` (or RUST_LOG) opens it up.
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "remotemaker_cli=debug,remotemaker_client=debug"
    } else {
        "remotemaker_cli=warn,remotemaker_client=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run(cli: Cli) -> Result<Outcome> {
    let config = Config {
        server: cli.server,
        token: cli.token,
        source: cli.source,
        manifest: cli.manifest,
        commit: cli.commit,
        force: cli.force,
        poll_interval: Duration::from_secs(cli.poll_interval),
        timeout: Duration::from_secs(cli.timeout),
        max_retries: cli.max_retries,
        debug: cli.debug,
        color: !cli.no_color,
    };
    config.validate()?;

    // The submission POST carries its own transport budget; the
    // poll-derived timeout only governs monitoring requests.
    let submit_http = reqwest::Client::builder()
        .connect_timeout(config.submit_connect_timeout())
        .timeout(config.submit_request_timeout())
        .build()
        .context("Failed to build HTTP client")?;
    let poll_http = reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let submitter = MakerClient::with_client(
        config.server.as_str(),
        config.token.as_str(),
        submit_http,
    );
    let poller: Arc<dyn MakerApi> = Arc::new(MakerClient::with_client(
        config.server.as_str(),
        config.token.as_str(),
        poll_http,
    ));

    let min_level = if config.debug {
        Severity::Debug
    } else {
        Severity::Info
    };
    let mut console = Console::new(config.color, min_level);

    let cancel = CancelToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let handle = launcher::submit(&submitter, &config, &mut console).await?;

    let monitor = Monitor::new(
        poller,
        console,
        Arc::new(SystemClock),
        cancel,
        MonitorConfig {
            poll_interval: config.poll_interval,
            timeout: config.timeout,
            max_retries: config.max_retries,
            ..MonitorConfig::default()
        },
    );

    Ok(monitor.run(handle).await)
}
