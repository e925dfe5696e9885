//! Interactive HTML report of historical and predicted order volume.

use std::fs;
use std::path::{Path, PathBuf};

use plotly::common::{Line, Mode, Title};
use plotly::layout::{Axis, Legend};
use plotly::{Layout, Plot, Scatter};

use crate::errors::Error;
use crate::models::series::{DailySeries, ForecastSeries};

/// Caller-supplied presentation options. Colors are CSS color strings and are
/// passed to the chart as-is.
#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub color_history: String,
    pub color_prediction: String,
}

fn date_axis(series_dates: Vec<chrono::NaiveDate>) -> Vec<String> {
    series_dates
        .into_iter()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .collect()
}

/// Builds the two-trace figure. Days with no orders carry `None` and render as
/// gaps in the historical line.
pub fn build_report(
    history: &DailySeries,
    forecast: &ForecastSeries,
    options: &ChartOptions,
) -> Plot {
    let history_trace = Scatter::new(
        date_axis(history.dates()),
        history.rows.iter().map(|r| r.y).collect::<Vec<_>>(),
    )
    .mode(Mode::Lines)
    .name("Historical Order Volume")
    .line(Line::new().color(options.color_history.clone()));

    let forecast_trace = Scatter::new(date_axis(forecast.dates()), forecast.values())
        .mode(Mode::Lines)
        .name("Predicted Order Volume")
        .line(Line::new().color(options.color_prediction.clone()));

    let layout = Layout::new()
        .title(Title::with_text(format!(
            "Order Volume Prediction for the Next {} Days",
            forecast.len()
        )))
        .x_axis(Axis::new().title(Title::with_text("Date")).show_grid(true))
        .y_axis(
            Axis::new()
                .title(Title::with_text("Order Total"))
                .show_grid(true),
        )
        .legend(Legend::new().title(Title::with_text("Legend")));

    let mut plot = Plot::new();
    plot.add_trace(history_trace);
    plot.add_trace(forecast_trace);
    plot.set_layout(layout);
    plot
}

/// Renders the report to a standalone HTML file at `path`, overwriting any
/// existing file. Returns the path on success.
pub fn write_report(
    history: &DailySeries,
    forecast: &ForecastSeries,
    options: &ChartOptions,
    path: &Path,
) -> Result<PathBuf, Error> {
    let plot = build_report(history, forecast, options);
    fs::write(path, plot.to_html())?;
    Ok(path.to_path_buf())
}
