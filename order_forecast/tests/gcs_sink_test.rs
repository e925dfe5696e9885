//! Integration tests for `GcsSink` using wiremock HTTP mocks.

use order_forecast::gcp::AccessToken;
use order_forecast::storage::gcs::GcsSink;
use order_forecast::storage::{ArtifactSink, SinkError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_sink(base_url: &str, bucket: &str) -> GcsSink {
    GcsSink::with_base_url(&AccessToken::new("test-token"), bucket, base_url)
        .expect("sink construction should not fail")
}

#[tokio::test]
async fn uploads_each_artifact_under_its_path_name() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let parquet = dir.path().join("forecast.parquet");
    let html = dir.path().join("forecast.html");
    std::fs::write(&parquet, b"parquet-bytes").unwrap();
    std::fs::write(&html, b"<html></html>").unwrap();

    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/kestraio/o"))
        .and(query_param("uploadType", "media"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(2)
        .mount(&server)
        .await;

    let sink = test_sink(&server.uri(), "kestraio");
    let stored = sink
        .store(&[html.clone(), parquet.clone()])
        .await
        .expect("upload should succeed");

    assert_eq!(
        stored,
        vec![html.display().to_string(), parquet.display().to_string()]
    );
}

#[tokio::test]
async fn rejected_upload_surfaces_service_message() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let artifact = dir.path().join("forecast.parquet");
    std::fs::write(&artifact, b"bytes").unwrap();

    Mock::given(method("POST"))
        .and(path("/upload/storage/v1/b/kestraio/o"))
        .respond_with(ResponseTemplate::new(403).set_body_string("bucket is read-only"))
        .mount(&server)
        .await;

    let sink = test_sink(&server.uri(), "kestraio");
    let err = sink.store(&[artifact]).await.unwrap_err();

    match err {
        SinkError::Rejected { message, .. } => assert!(message.contains("read-only")),
        other => panic!("Expected Rejected error, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_local_artifact_fails_before_any_request() {
    let server = MockServer::start().await;

    let sink = test_sink(&server.uri(), "kestraio");
    let err = sink
        .store(&[std::path::PathBuf::from("/does/not/exist.parquet")])
        .await
        .unwrap_err();

    assert!(matches!(err, SinkError::ReadArtifact { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}
