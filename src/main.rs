//! syshealth - health aggregation demo
//!
//! Embeds the aggregator the way an application would: wires the standard
//! probes, initializes, then prints one report or keeps refreshing until
//! Ctrl-C.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │    Probes    │───▶│  Aggregator  │───▶│    Report    │
//! │ (fact ports) │    │  (reduction) │    │  (current()) │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use syshealth::adapters::{
    HostInfoConfig, HostRuntimeInfoProvider, TcpConnectivityConfig, TcpConnectivityProvider,
};
use syshealth::health::{
    render_health, render_system_info, standard_probe_set, AggregatorConfig, HealthAggregator,
    HealthSnapshot, ProbeSources,
};
use syshealth::Result;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Subsystem health aggregation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Endpoint used to test network connectivity (host:port)
    #[arg(long, env = "CONNECTIVITY_TARGET", default_value = "1.1.1.1:443")]
    connectivity_target: String,

    /// Connectivity timeout in milliseconds
    #[arg(long, env = "CONNECTIVITY_TIMEOUT_MS", default_value = "3000")]
    connectivity_timeout_ms: u64,

    /// Per-probe timeout in milliseconds
    #[arg(long, env = "PROBE_TIMEOUT_MS", default_value = "5000")]
    probe_timeout_ms: u64,

    /// Refresh interval in seconds when watching
    #[arg(long, env = "REFRESH_INTERVAL_SECONDS", default_value = "30")]
    refresh_interval_seconds: u64,

    /// Directory whose filesystem is reported as storage
    #[arg(long, env = "DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Keep refreshing and reprinting until interrupted
    #[arg(long)]
    watch: bool,

    /// Print snapshots as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long, env = "LOG_JSON")]
    log_json: bool,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args);

    info!("Starting syshealth {}", syshealth::VERSION);
    info!("  Connectivity target: {}", args.connectivity_target);
    info!("  Probe timeout: {} ms", args.probe_timeout_ms);

    let config = AggregatorConfig {
        probe_timeout: Duration::from_millis(args.probe_timeout_ms),
        refresh_interval: Duration::from_secs(args.refresh_interval_seconds),
    };

    let connectivity_config = TcpConnectivityConfig {
        target: args.connectivity_target.clone(),
        connect_timeout: Duration::from_millis(args.connectivity_timeout_ms),
    };
    let connectivity = connectivity_config
        .validate_within(config.probe_timeout)
        .and_then(|_| TcpConnectivityProvider::new(connectivity_config))
        .map_err(|e| {
            error!("Invalid connectivity configuration: {}", e);
            e
        })?;

    let host_info = HostRuntimeInfoProvider::new(HostInfoConfig {
        data_dir: args.data_dir.clone(),
        ..Default::default()
    });

    let aggregator = Arc::new(
        HealthAggregator::builder()
            .config(config)
            .probe_set(standard_probe_set(ProbeSources::new(Arc::new(connectivity))))
            .runtime_info(Arc::new(host_info))
            .build()?,
    );

    aggregator.initialize().await;

    if !args.json {
        print!("{}", render_system_info(&aggregator.system_info()));
        println!();
    }

    if !args.watch {
        let snapshot = aggregator.refresh().await;
        print_snapshot(&snapshot, args.json)?;
        return Ok(());
    }

    let token = CancellationToken::new();
    let refresher = aggregator.clone().spawn_periodic(token.clone());

    let mut last_printed = 0;
    let mut poll = tokio::time::interval(Duration::from_millis(250));
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                break;
            }
            _ = poll.tick() => {
                let snapshot = aggregator.current();
                if snapshot.generation() != last_printed {
                    last_printed = snapshot.generation();
                    print_snapshot(&snapshot, args.json)?;
                }
            }
        }
    }

    token.cancel();
    if let Err(e) = refresher.await {
        error!("Periodic refresh task failed: {}", e);
    }

    info!("Shutdown complete");
    Ok(())
}

fn print_snapshot(snapshot: &HealthSnapshot, json: bool) -> Result<()> {
    if json {
        let line = serde_json::to_string(snapshot)
            .map_err(|e| syshealth::Error::Internal(format!("Failed to encode snapshot: {}", e)))?;
        println!("{}", line);
    } else {
        print!("{}", render_health(snapshot));
        println!();
    }
    Ok(())
}

// =============================================================================
// Logging Setup
// =============================================================================

fn init_logging(args: &Args) {
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Logs go to stderr so stdout stays a clean report stream.
    if args.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}
