//! Daily order-total series and the forecast produced from it.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeriesError {
    /// The warehouse returned no rows at all.
    #[error("Cannot resample an empty series")]
    Empty,

    /// The provider contract guarantees one row per day; a duplicate means the
    /// aggregation query or the provider is broken.
    #[error("Duplicate date in series: {0}")]
    DuplicateDate(NaiveDate),
}

/// A single day's aggregated order total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// Calendar day the orders were placed on.
    pub ds: NaiveDate,
    /// Summed order total for that day. `None` marks a day with no orders,
    /// introduced by [`DailySeries::resample_daily`]; raw warehouse rows always
    /// carry a value.
    pub y: Option<f64>,
}

/// An ordered collection of [`DailyTotal`] rows.
///
/// After [`resample_daily`](DailySeries::resample_daily) the series covers a
/// contiguous calendar range with exactly one row per day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DailySeries {
    pub rows: Vec<DailyTotal>,
}

impl DailySeries {
    pub fn new(rows: Vec<DailyTotal>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|r| r.ds)
    }

    /// Re-indexes the series onto a continuous daily calendar spanning its
    /// minimum and maximum date. Days with no source row get `y: None`; no
    /// imputation is performed.
    pub fn resample_daily(&self) -> Result<DailySeries, SeriesError> {
        let (Some(min), Some(max)) = (
            self.rows.iter().map(|r| r.ds).min(),
            self.rows.iter().map(|r| r.ds).max(),
        ) else {
            return Err(SeriesError::Empty);
        };

        let mut by_date: HashMap<NaiveDate, Option<f64>> = HashMap::with_capacity(self.rows.len());
        for row in &self.rows {
            if by_date.insert(row.ds, row.y).is_some() {
                return Err(SeriesError::DuplicateDate(row.ds));
            }
        }

        let rows = min
            .iter_days()
            .take_while(|d| *d <= max)
            .map(|ds| DailyTotal {
                ds,
                y: by_date.get(&ds).copied().flatten(),
            })
            .collect();

        Ok(DailySeries { rows })
    }

    /// Values as a dense `f64` slice, gaps encoded as NaN. This is the shape
    /// the forecasting model consumes.
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.y.unwrap_or(f64::NAN)).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|r| r.ds).collect()
    }
}

/// A single forecasted day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub ds: NaiveDate,
    pub yhat: f64,
}

/// Point forecasts for a horizon, dates strictly contiguous starting at the
/// day after the last historical date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    /// Attaches contiguous dates to raw forecast values, starting at `start`.
    pub fn from_values(start: NaiveDate, values: &[f64]) -> Self {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &yhat)| ForecastPoint {
                ds: start + Days::new(i as u64),
                yhat,
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.ds).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.yhat).collect()
    }
}
