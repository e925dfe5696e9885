use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::PipelineParams;

/// Forecast daily order volume and publish the artifacts.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Output path for the Parquet forecast file
    #[arg(long)]
    pub forecast_file: PathBuf,

    /// Output path for the HTML report
    #[arg(long)]
    pub html_report: PathBuf,

    /// Destination GCS bucket for both artifacts
    #[arg(long)]
    pub gcs_bucket: String,

    /// Forecast horizon in days
    #[arg(long)]
    pub nr_days_fcst: usize,

    /// CSS color for the historical trace (e.g. "blue")
    #[arg(long)]
    pub color_history: String,

    /// CSS color for the predicted trace (e.g. "red")
    #[arg(long)]
    pub color_prediction: String,
}

impl From<Cli> for PipelineParams {
    fn from(cli: Cli) -> Self {
        PipelineParams {
            forecast_file: cli.forecast_file,
            html_report: cli.html_report,
            gcs_bucket: cli.gcs_bucket,
            nr_days_fcst: cli.nr_days_fcst,
            color_history: cli.color_history,
            color_prediction: cli.color_prediction,
        }
    }
}
