//! Time-series forecasting for daily order volume.
//!
//! The pipeline fits a single seasonal ARIMA model; the [`Predictor`] trait
//! keeps the fit/predict surface separate from the concrete model so tests can
//! exercise the orchestration with stub models.

pub mod sarima;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    /// A model order or seasonal period is out of its supported range.
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The series is too short for the requested orders.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// The series contains values the model cannot work with.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// `predict` was called before `fit`.
    #[error("Model has not been fitted")]
    NotFitted,
}

/// Common trait for time-series predictors.
pub trait Predictor {
    /// Fit the model to historical observations. Gaps may be encoded as NaN;
    /// how they are handled is up to the implementation.
    fn fit(&mut self, data: &[f64]) -> Result<(), ForecastError>;

    /// Produce point forecasts for the next `steps` periods.
    fn predict(&self, steps: usize) -> Result<Vec<f64>, ForecastError>;

    /// Whether `fit` has completed successfully.
    fn is_fitted(&self) -> bool;
}
