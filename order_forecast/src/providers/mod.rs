//! Provider abstraction for the order warehouse.
//!
//! This module defines the [`WarehouseProvider`] trait, a unified interface
//! for extracting the daily order-total aggregate from whichever warehouse
//! backs the shop (BigQuery in production). The trait is async and supports
//! dynamic dispatch (`dyn WarehouseProvider`) so the pipeline can be driven by
//! a stub in tests.

pub mod bigquery;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

use crate::models::series::DailySeries;

/// Trait for extracting the daily order-total series from a warehouse.
#[async_trait]
pub trait WarehouseProvider {
    /// Runs the fixed aggregation query and returns one row per day that had
    /// orders, ordered by date.
    async fn fetch_daily_totals(&self) -> Result<DailySeries, ProviderError>;
}

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderInitError {
    /// Failed to build the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The access token contains bytes that cannot go into an HTTP header.
    #[snafu(display("Invalid access token format: {source}"))]
    InvalidToken {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },
}

/// Errors that can occur within a `WarehouseProvider` implementation.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[snafu(display("API request failed: {source}"))]
    Reqwest {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The warehouse API returned a specific error message.
    #[snafu(display("API error: {message}"))]
    Api {
        message: String,
        backtrace: Backtrace,
    },

    /// The response rows did not match the expected (day, total) shape.
    #[snafu(display("Malformed warehouse row: {message}"))]
    Malformed {
        message: String,
        backtrace: Backtrace,
    },
}
