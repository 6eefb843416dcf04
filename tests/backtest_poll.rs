//! Run-status polling: sequential fetches, terminal resolution, error
//! rejection and cancellation.

use portfolio_client::storage::MemoryStorage;
use portfolio_client::stores::BacktestStore;
use portfolio_client::{ClientConfig, ClientError, HttpClient, SessionContext};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> Arc<BacktestStore> {
    let session = Arc::new(SessionContext::new(Box::new(MemoryStorage::new())));
    let config = ClientConfig::new(&server.uri()).unwrap();
    let http = Arc::new(HttpClient::new(&config, session).unwrap());
    Arc::new(BacktestStore::new(http))
}

fn run_envelope(status: &str) -> serde_json::Value {
    json!({
        "data": {
            "id": "r1",
            "configId": "c1",
            "status": status,
            "startedAt": "2024-06-01T10:00:00",
            "finishedAt": if status == "RUNNING" { json!(null) } else { json!("2024-06-01T10:05:00") },
            "errorMessage": null
        },
        "meta": null,
        "error": null
    })
}

#[tokio::test]
async fn polls_until_terminal_status() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    Mock::given(method("GET"))
        .and(path("/v1/backtests/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [run_envelope("RUNNING")["data"]],
            "meta": null,
            "error": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Two RUNNING responses, then SUCCEEDED
    Mock::given(method("GET"))
        .and(path("/v1/backtests/runs/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_envelope("RUNNING")))
        .up_to_n_times(2)
        .with_priority(1)
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/backtests/runs/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_envelope("SUCCEEDED")))
        .with_priority(2)
        .expect(1)
        .mount(&server)
        .await;

    store.fetch_runs(None).await.unwrap();

    let interval = Duration::from_millis(30);
    let started = Instant::now();
    let poll = store.poll_run_status("r1", interval);
    assert!(store.is_polling());

    let run = poll.join().await.unwrap();

    // Two intervening delays separated the three fetches
    assert!(started.elapsed() >= interval * 2);
    assert!(run.status.is_terminal());
    assert!(run.finished_at.is_some());
    assert!(!store.is_polling());

    // Both caches picked up the terminal run
    assert!(store.current_run().unwrap().status.is_terminal());
    let runs = store.runs();
    assert_eq!(runs.len(), 1);
    assert!(runs[0].status.is_terminal());
}

#[tokio::test]
async fn first_fetch_error_rejects_poll() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    Mock::given(method("GET"))
        .and(path("/v1/backtests/runs/r1"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "data": null,
            "meta": null,
            "error": {"code": "INTERNAL_ERROR", "message": "engine crashed"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let poll = store.poll_run_status("r1", Duration::from_millis(10));
    let err = poll.join().await.unwrap_err();

    assert_eq!(err.error_code(), "INTERNAL_ERROR");
    assert!(!store.is_polling());
    let recorded = store.error().unwrap();
    assert!(recorded.contains("engine crashed"));
}

#[tokio::test]
async fn stop_cancels_without_further_fetches() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    Mock::given(method("GET"))
        .and(path("/v1/backtests/runs/r1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_envelope("RUNNING")))
        .expect(1)
        .mount(&server)
        .await;

    // Long interval; the stop must interrupt the sleep
    let poll = store.poll_run_status("r1", Duration::from_secs(60));
    let handle = poll.handle();

    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.stop();
    assert!(handle.is_stopped());

    let err = poll.join().await.unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
    assert!(!store.is_polling());

    // The run observed before the stop is still cached
    assert_eq!(store.current_run().unwrap().id, "r1");
}

#[tokio::test]
async fn stop_before_first_fetch_makes_no_request() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    let poll = store.poll_run_status("r1", Duration::from_secs(60));
    poll.stop();

    let err = poll.join().await.unwrap_err();
    assert!(matches!(err, ClientError::Cancelled));
    assert!(!store.is_polling());
}

#[tokio::test]
async fn run_backtest_prepends_and_sets_current() {
    let server = MockServer::start().await;
    let store = store_for(&server);

    Mock::given(method("POST"))
        .and(path("/v1/backtests/runs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run_envelope("RUNNING")))
        .expect(1)
        .mount(&server)
        .await;

    let request = portfolio_client::api::backtest::RunBacktestRequest::for_config("c1");
    let run = store.run_backtest(&request).await.unwrap();

    assert_eq!(run.id, "r1");
    assert!(!run.status.is_terminal());
    assert_eq!(store.current_run().unwrap().id, "r1");
    assert_eq!(store.runs().len(), 1);
}
