use homework_status_bot::{CycleOutcome, PollLoop, PracticumClient, TelegramNotifier};
use httpmock::prelude::*;
use serde_json::json;
use std::time::Duration;

const PATH: &str = "/api/user_api/homework_statuses/";

fn wire(
    api_server: &MockServer,
    telegram_server: &MockServer,
) -> PollLoop<PracticumClient, TelegramNotifier> {
    let api =
        PracticumClient::new(api_server.url(PATH), "practicum", Duration::from_secs(5)).unwrap();
    let notifier =
        TelegramNotifier::new(telegram_server.base_url(), "123:ABC", Duration::from_secs(5))
            .unwrap();
    PollLoop::new(api, notifier, "42", Duration::from_secs(600)).with_cursor(0)
}

#[tokio::test]
async fn test_status_change_reaches_telegram_once() {
    let api_server = MockServer::start();
    let telegram_server = MockServer::start();

    let api_mock = api_server.mock(|when, then| {
        when.method(GET)
            .path(PATH)
            .header("Authorization", "OAuth practicum");
        then.status(200).json_body(json!({
            "homeworks": [{"id": 1, "homework_name": "hw1", "status": "approved"}],
            "current_date": 1700000000
        }));
    });
    let telegram_mock = telegram_server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:ABC/sendMessage")
            .body_contains("hw1");
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut poll_loop = wire(&api_server, &telegram_server);
    assert_eq!(
        poll_loop.run_cycle().await,
        CycleOutcome::StatusChanged { delivered: true }
    );
    assert_eq!(poll_loop.run_cycle().await, CycleOutcome::StatusUnchanged);

    api_mock.assert_hits(2);
    telegram_mock.assert_hits(1);
    assert_eq!(poll_loop.cursor(), 1700000000);
}

#[tokio::test]
async fn test_server_errors_reach_telegram_once() {
    let api_server = MockServer::start();
    let telegram_server = MockServer::start();

    let api_mock = api_server.mock(|when, then| {
        when.method(GET).path(PATH).query_param("from_date", "0");
        then.status(500);
    });
    let telegram_mock = telegram_server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:ABC/sendMessage")
            .body_contains("HTTP 500");
        then.status(200).json_body(json!({"ok": true}));
    });

    let mut poll_loop = wire(&api_server, &telegram_server);
    for _ in 0..3 {
        assert!(matches!(
            poll_loop.run_cycle().await,
            CycleOutcome::Failed { .. }
        ));
    }

    api_mock.assert_hits(3);
    telegram_mock.assert_hits(1);
    assert_eq!(poll_loop.cursor(), 0);
}

#[tokio::test]
async fn test_telegram_outage_is_survived() {
    let api_server = MockServer::start();
    let telegram_server = MockServer::start();

    api_server.mock(|when, then| {
        when.method(GET).path(PATH);
        then.status(200).json_body(json!({
            "homeworks": [{"homework_name": "hw1", "status": "reviewing"}],
            "current_date": 1700000000
        }));
    });
    telegram_server.mock(|when, then| {
        when.method(POST).path("/bot123:ABC/sendMessage");
        then.status(502).body("Bad Gateway");
    });

    let mut poll_loop = wire(&api_server, &telegram_server);
    assert_eq!(
        poll_loop.run_cycle().await,
        CycleOutcome::StatusChanged { delivered: false }
    );
    assert_eq!(poll_loop.cursor(), 1700000000);
}
