mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use cli::{App, Cli};
use config::{Config, LogFormat};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so results on stdout can be piped.
fn init_logging(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Plain => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    init_logging(config.log_format);
    info!("Starting photon CLI...");

    let app = App::new(&config, cli.url).context("Failed to initialize HTTP client")?;

    match cli.command {
        Some(command) => {
            // Already reported; exit without a second error message
            if !app.run_and_report(command).await {
                std::process::exit(1);
            }
        },
        None => app.run_interactive().await?,
    }

    Ok(())
}
