use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use cronatlas_sources::GeneratorPaths;
use cronatlas_sources::aggregate;
use cronatlas_sources::timers::SystemctlTimers;

/// Aggregate schedule metadata from the health-monitor config, OpenClaw
/// cron jobs, and systemd timers into one cron-events.json document.
#[derive(Parser)]
#[command(name = "cronatlas", about = "Generate cron-events.json from all schedule sources")]
struct Cli {
    /// Health-monitor config path (default: ~/aurora/health-monitor-config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// OpenClaw jobs file path (default: ~/.openclaw/cron/jobs.json)
    #[arg(long)]
    jobs: Option<PathBuf>,

    /// Output path (default: ~/projects/aurora-health/dist/cron-events.json)
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seconds to wait for `systemctl list-timers` before giving up
    #[arg(long, default_value = "5")]
    timer_timeout: u64,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let mut paths = GeneratorPaths::resolve()?;
    if let Some(config) = cli.config {
        paths.monitor_config = config;
    }
    if let Some(jobs) = cli.jobs {
        paths.openclaw_jobs = jobs;
    }
    if let Some(output) = cli.output {
        paths.output = output;
    }

    let timer_source = SystemctlTimers {
        timeout: Duration::from_secs(cli.timer_timeout),
    };

    let rt = tokio::runtime::Runtime::new()?;
    let generated = rt.block_on(aggregate::generate(&paths, &timer_source));

    // Source failures were already logged as warnings; only a write
    // failure exits non-zero.
    aggregate::write_document(&generated.document, &paths.output)?;

    println!(
        "Generated {} events to {}",
        generated.document.events.len(),
        paths.output.display()
    );

    Ok(())
}
