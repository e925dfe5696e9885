use thiserror::Error;

/// The unified error type for the `order_forecast` crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An error related to configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// An error while parsing credentials or minting an access token.
    #[error("Authentication error: {0}")]
    Auth(#[from] crate::gcp::AuthError),

    /// An error while constructing the warehouse provider.
    #[error("Provider error: {0}")]
    ProviderInit(#[from] crate::providers::ProviderInitError),

    /// An error originating from the warehouse provider.
    #[error("Provider error: {0}")]
    Provider(#[from] crate::providers::ProviderError),

    /// The extracted series violated a shape invariant.
    #[error("Series error: {0}")]
    Series(#[from] crate::models::series::SeriesError),

    /// An error while fitting or forecasting with the model.
    #[error("Forecast error: {0}")]
    Forecast(#[from] crate::forecast::ForecastError),

    /// An error originating from an artifact sink.
    #[error("Sink error: {0}")]
    Sink(#[from] crate::storage::SinkError),

    /// A generic I/O error.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// An error from the Polars library.
    #[error("Polars operation failed")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A JSON serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
