use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use order_forecast::{cli::Cli, pipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let summary = pipeline::run(&cli.into()).await?;

    tracing::info!(
        forecast_file = %summary.forecast_file,
        html_report = %summary.html_report,
        "Forecast run complete"
    );
    Ok(())
}
