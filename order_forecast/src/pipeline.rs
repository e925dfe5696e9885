//! The sequential extract -> resample -> fit -> predict -> export pipeline.

use std::path::PathBuf;

use chrono::Days;

use crate::{
    config::ResourceHints,
    errors::Error,
    forecast::{Predictor, sarima::Sarima},
    gcp::{ServiceAccountKey, mint_access_token},
    io::dataframe::write_forecast_parquet,
    models::{
        series::{ForecastSeries, SeriesError},
        summary::RunSummary,
    },
    outputs,
    providers::{WarehouseProvider, bigquery::BigQueryProvider},
    render::{ChartOptions, write_report},
    storage::{ArtifactSink, gcs::GcsSink},
};

/// Model orders used for the daily order-volume series: first-order terms with
/// a weekly season.
const ORDER: (usize, usize, usize) = (1, 1, 1);
const SEASONAL_ORDER: (usize, usize, usize, usize) = (1, 1, 1, 7);

/// One pipeline invocation's parameters, straight from the CLI.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    pub forecast_file: PathBuf,
    pub html_report: PathBuf,
    pub gcs_bucket: String,
    pub nr_days_fcst: usize,
    pub color_history: String,
    pub color_prediction: String,
}

/// Runs the full pipeline against production BigQuery and GCS.
pub async fn run(params: &PipelineParams) -> Result<RunSummary, Error> {
    let hints = ResourceHints::from_env()?;
    tracing::info!(cpu = hints.cpu, memory_mb = hints.memory_mb, "Resource hints");

    let key = ServiceAccountKey::from_env()?;
    let http = reqwest::Client::new();
    let token = mint_access_token(&http, &key).await?;

    let provider = BigQueryProvider::new(&token, &key.project_id)?;
    let sink = GcsSink::new(&token, &params.gcs_bucket)?;

    run_with(params, &provider, &sink).await
}

/// Pipeline body with injectable provider and sink, so tests can drive it with
/// mocks.
pub async fn run_with<P, S>(
    params: &PipelineParams,
    provider: &P,
    sink: &S,
) -> Result<RunSummary, Error>
where
    P: WarehouseProvider + Sync + ?Sized,
    S: ArtifactSink<Output = Vec<String>> + Sync + ?Sized,
{
    let raw = provider.fetch_daily_totals().await?;
    let initial_nr_rows = raw.len();
    tracing::info!(rows = initial_nr_rows, "Number of rows in the dataset");

    let daily = raw.resample_daily()?;
    let nr_rows_daily = daily.len();
    tracing::info!(rows = nr_rows_daily, "Resampled to daily frequency");

    let mut model = Sarima::new(ORDER, SEASONAL_ORDER)?;
    let (order, seasonal_order) = model.orders();
    tracing::info!(?order, ?seasonal_order, "Fitting model");
    model.fit(&daily.values())?;
    let predicted = model.predict(params.nr_days_fcst)?;

    let start = daily.last_date().ok_or(SeriesError::Empty)? + Days::new(1);
    let forecast = ForecastSeries::from_values(start, &predicted);

    let forecast_file = write_forecast_parquet(&forecast, &params.forecast_file)?;
    tracing::info!(path = %forecast_file.display(), "Forecast written");

    let chart = ChartOptions {
        color_history: params.color_history.clone(),
        color_prediction: params.color_prediction.clone(),
    };
    let html_report = write_report(&daily, &forecast, &chart, &params.html_report)?;
    tracing::info!(path = %html_report.display(), "Report rendered");

    sink.store(&[params.html_report.clone(), params.forecast_file.clone()])
        .await?;

    let summary = RunSummary {
        initial_nr_rows,
        nr_rows_daily,
        forecast_file: forecast_file.display().to_string(),
        html_report: html_report.display().to_string(),
    };
    outputs::emit(&summary)?;
    Ok(summary)
}
