use serde::{Deserialize, Serialize};

/// Summary record handed back to the orchestration caller at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Row count straight out of the warehouse query.
    pub initial_nr_rows: usize,
    /// Row count after resampling onto the daily calendar.
    pub nr_rows_daily: usize,
    /// Local path of the Parquet forecast file.
    pub forecast_file: String,
    /// Local path of the HTML report.
    pub html_report: String,
}
