//! Google Cloud Storage sink using the JSON upload API.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{Client, header};
use snafu::ResultExt;

use crate::gcp::AccessToken;
use crate::storage::{
    ArtifactSink, ClientBuildSnafu, InvalidTokenSnafu, ReadArtifactSnafu, RejectedSnafu,
    RequestSnafu, SinkError,
};

const BASE_URL: &str = "https://storage.googleapis.com";

pub struct GcsSink {
    client: Client,
    bucket: String,
    base_url: String,
}

impl GcsSink {
    /// Creates a sink uploading into `bucket` on the production GCS endpoint.
    pub fn new(token: &AccessToken, bucket: &str) -> Result<Self, SinkError> {
        Self::with_base_url(token, bucket, BASE_URL)
    }

    /// Creates a sink against an explicit base URL. Used by tests to point at
    /// a mock server.
    pub fn with_base_url(
        token: &AccessToken,
        bucket: &str,
        base_url: &str,
    ) -> Result<Self, SinkError> {
        let mut auth_value = header::HeaderValue::from_str(&format!("Bearer {}", token.expose()))
            .context(InvalidTokenSnafu)?;
        auth_value.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth_value);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            bucket: bucket.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn upload_url(&self) -> String {
        format!("{}/upload/storage/v1/b/{}/o", self.base_url, self.bucket)
    }
}

#[async_trait]
impl ArtifactSink for GcsSink {
    type Output = Vec<String>;

    async fn store(&self, artifacts: &[PathBuf]) -> Result<Self::Output, SinkError> {
        let mut stored = Vec::with_capacity(artifacts.len());

        for path in artifacts {
            // The object name is the path exactly as the caller supplied it,
            // matching what downstream jobs expect to find in the bucket.
            let name = path.display().to_string();
            let bytes = tokio::fs::read(path).await.context(ReadArtifactSnafu {
                path: name.clone(),
            })?;

            let response = self
                .client
                .post(self.upload_url())
                .query(&[("uploadType", "media"), ("name", name.as_str())])
                .header(header::CONTENT_TYPE, "application/octet-stream")
                .body(bytes)
                .send()
                .await
                .context(RequestSnafu)?;

            if !response.status().is_success() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown storage error".to_string());
                return RejectedSnafu { message }.fail();
            }

            tracing::info!(object = %name, bucket = %self.bucket, "File uploaded");
            stored.push(name);
        }

        Ok(stored)
    }
}
