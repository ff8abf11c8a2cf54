//! fleet-pilot: A terminal dashboard for a load-balanced GPU fleet

use clap::Parser;
use color_eyre::Result;
use fleet_rs::DashboardConfig;
use fleet_pilot_tui::App;
use std::fs::File;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};

/// fleet-pilot: Terminal dashboard for GPU fleet utilization and RL scheduling
#[derive(Parser, Debug)]
#[command(name = "fleet-pilot")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: ~/.fleet-pilot/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stats backend host
    #[arg(long)]
    host: Option<String>,

    /// Stats backend port
    #[arg(long)]
    port: Option<u16>,

    /// Stats endpoint path
    #[arg(long)]
    path: Option<String>,

    /// Request deadline in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Refresh automatically every N seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    auto_refresh: Option<u64>,

    /// Serve refreshes from built-in data instead of the stats endpoint
    #[arg(long)]
    offline: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Log file path (default: /tmp/fleet-pilot.log)
    #[arg(long, default_value = "/tmp/fleet-pilot.log")]
    log_file: String,
}

impl Cli {
    fn load_config(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::load_from(path)?,
            None => DashboardConfig::load_default()?,
        };

        if let Some(host) = &self.host {
            config.endpoint.host = host.clone();
        }
        if let Some(port) = self.port {
            config.endpoint.port = port;
        }
        if let Some(path) = &self.path {
            config.endpoint.path = path.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if self.auto_refresh.is_some() {
            config.auto_refresh_secs = self.auto_refresh;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize error handling
    color_eyre::install()?;

    // Initialize logging to file (not stdout, which would corrupt TUI)
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let log_file = File::create(&cli.log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(log_file)
                .with_ansi(true)
                .with_target(false),
        )
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    tracing::info!("Starting fleet-pilot");

    let config = cli.load_config()?;
    if cli.offline {
        tracing::info!("Offline mode, refreshes use built-in data");
    } else {
        tracing::info!("Stats endpoint: {}", config.endpoint.url());
    }

    let mut app = App::new(&config, cli.offline)?;
    app.run().await?;

    tracing::info!("Goodbye!");
    Ok(())
}
