//! DataFrame conversion and Parquet serialization of the forecast.

use std::fs::File;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use polars::prelude::*;

use crate::errors::Error;
use crate::models::series::ForecastSeries;

/// Converts the forecast into a two-column DataFrame (`ds: Date`,
/// `yhat: Float64`), the schema downstream consumers expect.
pub fn forecast_to_dataframe(forecast: &ForecastSeries) -> Result<DataFrame, PolarsError> {
    // Polars Date is days since the Unix epoch; chrono's default NaiveDate is
    // exactly that epoch.
    let epoch = NaiveDate::default();
    let days: Vec<i32> = forecast
        .points
        .iter()
        .map(|p| (p.ds - epoch).num_days() as i32)
        .collect();

    let ds = Series::new("ds".into(), days).cast(&DataType::Date)?;
    let yhat = Series::new("yhat".into(), forecast.values());
    DataFrame::new(vec![ds.into_column(), yhat.into_column()])
}

/// Writes the forecast to a Parquet file at `path`, overwriting any existing
/// file. Returns the path on success.
pub fn write_forecast_parquet(forecast: &ForecastSeries, path: &Path) -> Result<PathBuf, Error> {
    let mut df = forecast_to_dataframe(forecast)?;
    let file = File::create(path)?;
    ParquetWriter::new(file).finish(&mut df)?;
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn dataframe_has_expected_schema() {
        let fc = ForecastSeries::from_values(d("2025-01-01"), &[1.0, 2.0, 3.0]);
        let df = forecast_to_dataframe(&fc).unwrap();

        assert_eq!(df.shape(), (3, 2));
        assert_eq!(df.get_column_names_str(), vec!["ds", "yhat"]);
        assert_eq!(df.column("ds").unwrap().dtype(), &DataType::Date);
        assert_eq!(df.column("yhat").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn parquet_round_trip_preserves_row_count() {
        let fc = ForecastSeries::from_values(d("2025-06-01"), &[5.0; 90]);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.parquet");

        let written = write_forecast_parquet(&fc, &path).unwrap();
        assert_eq!(written, path);

        let df = ParquetReader::new(File::open(&path).unwrap())
            .finish()
            .unwrap();
        assert_eq!(df.height(), 90);
        assert_eq!(df.get_column_names_str(), vec!["ds", "yhat"]);
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.parquet");

        let first = ForecastSeries::from_values(d("2025-01-01"), &[1.0; 10]);
        write_forecast_parquet(&first, &path).unwrap();

        let second = ForecastSeries::from_values(d("2025-01-01"), &[1.0; 3]);
        write_forecast_parquet(&second, &path).unwrap();

        let df = ParquetReader::new(File::open(&path).unwrap())
            .finish()
            .unwrap();
        assert_eq!(df.height(), 3);
    }
}
