//! Integration tests for `BigQueryProvider` using wiremock HTTP mocks.

use chrono::NaiveDate;
use order_forecast::gcp::AccessToken;
use order_forecast::providers::bigquery::BigQueryProvider;
use order_forecast::providers::{ProviderError, WarehouseProvider};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_provider(base_url: &str) -> BigQueryProvider {
    BigQueryProvider::with_base_url(&AccessToken::new("test-token"), "geller", base_url)
        .expect("provider construction should not fail")
}

fn row(ds: &str, y: &str) -> serde_json::Value {
    serde_json::json!({ "f": [ { "v": ds }, { "v": y } ] })
}

#[tokio::test]
async fn fetch_parses_rows_from_single_page() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "jobComplete": true,
        "jobReference": { "jobId": "job-1" },
        "rows": [ row("2024-01-01", "100.5"), row("2024-01-02", "240") ],
    });

    Mock::given(method("POST"))
        .and(path("/projects/geller/queries"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let series = provider.fetch_daily_totals().await.expect("should fetch");

    assert_eq!(series.len(), 2);
    assert_eq!(
        series.rows[0].ds,
        "2024-01-01".parse::<NaiveDate>().unwrap()
    );
    assert_eq!(series.rows[0].y, Some(100.5));
    assert_eq!(series.rows[1].y, Some(240.0));
}

#[tokio::test]
async fn fetch_follows_page_tokens() {
    let server = MockServer::start().await;

    let first_page = serde_json::json!({
        "jobComplete": true,
        "jobReference": { "jobId": "job-2" },
        "rows": [ row("2024-01-01", "1") ],
        "pageToken": "page-2",
    });
    let second_page = serde_json::json!({
        "jobComplete": true,
        "jobReference": { "jobId": "job-2" },
        "rows": [ row("2024-01-02", "2") ],
    });

    Mock::given(method("POST"))
        .and(path("/projects/geller/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&first_page))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/geller/queries/job-2"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&second_page))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let series = provider.fetch_daily_totals().await.expect("should fetch");

    assert_eq!(series.len(), 2);
    assert_eq!(series.rows[1].y, Some(2.0));
}

#[tokio::test]
async fn fetch_polls_until_job_completes() {
    let server = MockServer::start().await;

    let pending = serde_json::json!({
        "jobComplete": false,
        "jobReference": { "jobId": "job-3" },
    });
    let done = serde_json::json!({
        "jobComplete": true,
        "jobReference": { "jobId": "job-3" },
        "rows": [ row("2024-03-01", "42") ],
    });

    Mock::given(method("POST"))
        .and(path("/projects/geller/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&pending))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/projects/geller/queries/job-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&done))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let series = provider.fetch_daily_totals().await.expect("should fetch");

    assert_eq!(series.len(), 1);
    assert_eq!(series.rows[0].y, Some(42.0));
}

#[tokio::test]
async fn error_status_surfaces_as_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/projects/geller/queries"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access Denied"))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let err = provider.fetch_daily_totals().await.unwrap_err();

    match err {
        ProviderError::Api { message, .. } => assert!(message.contains("Access Denied")),
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_rows_surface_as_malformed_error() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "jobComplete": true,
        "jobReference": { "jobId": "job-4" },
        "rows": [ { "f": [ { "v": "not-a-date" }, { "v": "1" } ] } ],
    });

    Mock::given(method("POST"))
        .and(path("/projects/geller/queries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let provider = test_provider(&server.uri());
    let err = provider.fetch_daily_totals().await.unwrap_err();
    assert!(matches!(err, ProviderError::Malformed { .. }));
}
