//! Artifact sinks for run outputs.
//!
//! The [`ArtifactSink`] trait abstracts over where finished artifacts land so
//! the pipeline can be exercised against an in-memory sink in tests; the
//! production implementation is [`gcs::GcsSink`].

pub mod gcs;

use std::path::PathBuf;

use async_trait::async_trait;
use snafu::{Backtrace, Snafu};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum SinkError {
    /// A local artifact could not be read before upload.
    #[snafu(display("Failed to read artifact {path}: {source}"))]
    ReadArtifact {
        path: String,
        source: std::io::Error,
        backtrace: Backtrace,
    },

    /// The upload request failed at the transport level.
    #[snafu(display("Upload request failed: {source}"))]
    Request {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The storage service rejected the upload.
    #[snafu(display("Upload rejected: {message}"))]
    Rejected {
        message: String,
        backtrace: Backtrace,
    },

    /// The access token contains bytes that cannot go into an HTTP header.
    #[snafu(display("Invalid access token format: {source}"))]
    InvalidToken {
        source: reqwest::header::InvalidHeaderValue,
        backtrace: Backtrace,
    },

    /// Failed to build the HTTP client.
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },
}

#[async_trait]
pub trait ArtifactSink {
    /// The type of output returned after a successful store operation.
    ///
    /// A remote sink might return the stored object names, a local sink the
    /// final paths.
    type Output;

    /// Stores the given local artifacts, overwriting existing objects of the
    /// same name.
    async fn store(&self, artifacts: &[PathBuf]) -> Result<Self::Output, SinkError>;
}
