use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, header};
use serde_json::json;
use snafu::ResultExt;

use crate::{
    gcp::AccessToken,
    models::series::{DailySeries, DailyTotal},
    providers::{
        ApiSnafu, ClientBuildSnafu, InvalidTokenSnafu, MalformedSnafu, ProviderError,
        ProviderInitError, ReqwestSnafu, WarehouseProvider,
    },
};

use super::response::{QueryResponse, TableRow};

const BASE_URL: &str = "https://bigquery.googleapis.com/bigquery/v2";

/// The fixed aggregation: one row per day with the summed order total.
const QUERY: &str = "\
SELECT
  DATE(ordered_at) AS ds,
  SUM(order_total) AS y
FROM
  `geller.dwh.orders`
GROUP BY
  ds
ORDER BY
  ds";

/// How long to wait between `getQueryResults` polls while the job runs.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct BigQueryProvider {
    client: Client,
    project_id: String,
    base_url: String,
}

impl BigQueryProvider {
    /// Creates a provider talking to the production BigQuery endpoint.
    pub fn new(token: &AccessToken, project_id: &str) -> Result<Self, ProviderInitError> {
        Self::with_base_url(token, project_id, BASE_URL)
    }

    /// Creates a provider against an explicit base URL. Used by tests to point
    /// at a mock server.
    pub fn with_base_url(
        token: &AccessToken,
        project_id: &str,
        base_url: &str,
    ) -> Result<Self, ProviderInitError> {
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
            project_id: project_id.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn queries_url(&self) -> String {
        format!("{}/projects/{}/queries", self.base_url, self.project_id)
    }

    fn results_url(&self, job_id: &str) -> String {
        format!("{}/{}", self.queries_url(), job_id)
    }

    async fn decode(response: reqwest::Response) -> Result<QueryResponse, ProviderError> {
        if !response.status().is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return ApiSnafu { message }.fail();
        }
        response.json::<QueryResponse>().await.context(ReqwestSnafu)
    }
}

#[async_trait]
impl WarehouseProvider for BigQueryProvider {
    async fn fetch_daily_totals(&self) -> Result<DailySeries, ProviderError> {
        let body = json!({
            "query": QUERY,
            "useLegacySql": false,
        });

        let response = self
            .client
            .post(self.queries_url())
            .json(&body)
            .send()
            .await
            .context(ReqwestSnafu)?;
        let mut page = Self::decode(response).await?;

        // The initial call may return before the job finishes; block on it the
        // way the official client library does.
        while !page.job_complete {
            let job_id = page
                .job_reference
                .as_ref()
                .map(|r| r.job_id.clone())
                .ok_or_else(|| {
                    ApiSnafu {
                        message: "Incomplete job without a job reference".to_string(),
                    }
                    .build()
                })?;

            tokio::time::sleep(POLL_INTERVAL).await;
            let response = self
                .client
                .get(self.results_url(&job_id))
                .send()
                .await
                .context(ReqwestSnafu)?;
            page = Self::decode(response).await?;
        }

        let mut rows: Vec<DailyTotal> = Vec::new();
        loop {
            for row in &page.rows {
                rows.push(parse_row(row)?);
            }

            // Follow pageToken until the result set is exhausted.
            let Some(token) = page.page_token.clone() else {
                break;
            };
            let job_id = page
                .job_reference
                .as_ref()
                .map(|r| r.job_id.clone())
                .ok_or_else(|| {
                    ApiSnafu {
                        message: "Paged response without a job reference".to_string(),
                    }
                    .build()
                })?;

            let response = self
                .client
                .get(self.results_url(&job_id))
                .query(&[("pageToken", token)])
                .send()
                .await
                .context(ReqwestSnafu)?;
            page = Self::decode(response).await?;
        }

        Ok(DailySeries::new(rows))
    }
}

/// Decodes one BigQuery `f`/`v` row into a [`DailyTotal`].
fn parse_row(row: &TableRow) -> Result<DailyTotal, ProviderError> {
    let [ds_cell, y_cell] = row.f.as_slice() else {
        return MalformedSnafu {
            message: format!("Expected 2 cells per row, got {}", row.f.len()),
        }
        .fail();
    };

    let ds_raw = ds_cell.v.as_ref().and_then(|v| v.as_str()).ok_or_else(|| {
        MalformedSnafu {
            message: "Date cell is not a string".to_string(),
        }
        .build()
    })?;
    let ds = NaiveDate::parse_from_str(ds_raw, "%Y-%m-%d").map_err(|e| {
        MalformedSnafu {
            message: format!("Unparseable date {ds_raw:?}: {e}"),
        }
        .build()
    })?;

    // SUM comes back as a JSON string; a null means every order_total in the
    // group was NULL.
    let y = match y_cell.v.as_ref() {
        None => None,
        Some(v) => {
            let text = v.as_str().ok_or_else(|| {
                MalformedSnafu {
                    message: "Total cell is not a string".to_string(),
                }
                .build()
            })?;
            Some(text.parse::<f64>().map_err(|e| {
                MalformedSnafu {
                    message: format!("Unparseable total {text:?}: {e}"),
                }
                .build()
            })?)
        }
    };

    Ok(DailyTotal { ds, y })
}
