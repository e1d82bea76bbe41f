mod common;

use std::fs;
use std::path::Path;

use common::{USER_TOKEN, client, source};
use serde_json::{Value, json};
use slack_resource::SlackError;
use slack_resource::core::models::GetRequest;
use slack_resource::resource::{self, Command, get};
use tempfile::TempDir;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request(version: Value, regexp: Option<&str>) -> GetRequest {
    serde_json::from_value(json!({"source": source(regexp), "version": version})).unwrap()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

async fn mount_single_message(server: &MockServer, api: &str, message: Value) {
    Mock::given(method("POST"))
        .and(path(format!("/api/{api}")))
        .and(body_string_contains(format!("token={USER_TOKEN}")))
        .and(body_string_contains("limit=1"))
        .and(body_string_contains("inclusive=true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "messages": [message]})),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_writes_message_files_from_history() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/conversations.history"))
        .and(body_string_contains("channel=C1"))
        .and(body_string_contains("oldest=1700000000.000100"))
        .and(body_string_contains("limit=1"))
        .and(body_string_contains("inclusive=true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "messages": [{"ts": "1700000000.000100", "text": "deploy api please", "user": "U42"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dest = TempDir::new().unwrap();
    let version = json!({"channel": "C1", "ts": "1700000000.000100"});
    let returned = get(&client(&server), &request(version.clone(), None), dest.path())
        .await
        .unwrap();

    assert_eq!(serde_json::to_value(&returned).unwrap(), version);
    assert_eq!(read(dest.path(), "message_text"), "deploy api please");
    assert_eq!(read(dest.path(), "user"), "U42");
    assert_eq!(read(dest.path(), "channel"), "C1");
    assert_eq!(read(dest.path(), "ts"), "1700000000.000100");
    assert!(!dest.path().join("message_text_0").exists());
}

#[tokio::test]
async fn test_get_uses_replies_for_thread_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/conversations.replies"))
        .and(body_string_contains("ts=1700000000.000001"))
        .and(body_string_contains("oldest=1700000000.000200"))
        .and(body_string_contains("limit=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "messages": [{"ts": "1700000000.000200", "text": "reply", "user": "U7",
                          "thread_ts": "1700000000.000001"}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/conversations.history"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let dest = TempDir::new().unwrap();
    let version = json!({
        "channel": "C1",
        "ts": "1700000000.000200",
        "thread_ts": "1700000000.000001"
    });
    let output = resource::dispatch(
        &client(&server),
        Command::In,
        &json!({"source": source(None), "version": version}).to_string(),
        &[dest.path().display().to_string()],
    )
    .await
    .unwrap();

    assert_eq!(output, json!({"version": version}));
    assert_eq!(read(dest.path(), "message_text"), "reply");
    assert_eq!(read(dest.path(), "ts"), "1700000000.000200");
}

#[tokio::test]
async fn test_get_writes_capture_groups() {
    let server = MockServer::start().await;
    mount_single_message(
        &server,
        "conversations.history",
        json!({"ts": "5", "text": "deploy api to prod", "user": "U1"}),
    )
    .await;

    let dest = TempDir::new().unwrap();
    get(
        &client(&server),
        &request(
            json!({"channel": "C1", "ts": "5"}),
            Some(r"deploy (\w+) to (\w+)"),
        ),
        dest.path(),
    )
    .await
    .unwrap();

    assert_eq!(read(dest.path(), "message_text_0"), "api");
    assert_eq!(read(dest.path(), "message_text_1"), "prod");
    assert_eq!(read(dest.path(), "message_text"), "deploy api to prod");
}

#[tokio::test]
async fn test_get_falls_back_to_username() {
    let server = MockServer::start().await;
    mount_single_message(
        &server,
        "conversations.history",
        json!({"ts": "5", "text": "built", "username": "ci-bot", "subtype": "bot_message"}),
    )
    .await;

    let dest = TempDir::new().unwrap();
    get(
        &client(&server),
        &request(json!({"channel": "C1", "ts": "5"}), None),
        dest.path(),
    )
    .await
    .unwrap();

    assert_eq!(read(dest.path(), "user"), "ci-bot");
}

#[tokio::test]
async fn test_get_fails_when_regexp_does_not_match() {
    let server = MockServer::start().await;
    mount_single_message(
        &server,
        "conversations.history",
        json!({"ts": "5", "text": "lunch?", "user": "U1"}),
    )
    .await;

    let dest = TempDir::new().unwrap();
    let err = get(
        &client(&server),
        &request(json!({"channel": "C1", "ts": "5"}), Some("deploy (\\w+)")),
        dest.path(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, SlackError::NoMatch(_)));
    assert!(!dest.path().join("message_text").exists());
}

#[tokio::test]
async fn test_get_fails_when_no_message_returned() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/conversations.history"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "messages": []})),
        )
        .mount(&server)
        .await;

    let dest = TempDir::new().unwrap();
    let err = get(
        &client(&server),
        &request(json!({"channel": "C1", "ts": "5"}), None),
        dest.path(),
    )
    .await
    .unwrap_err();

    match err {
        SlackError::ResponseError(msg) => assert!(msg.contains("messages[0]")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_in_requires_destination_argument() {
    let server = MockServer::start().await;
    let body = json!({"source": source(None), "version": {"channel": "C1", "ts": "5"}});

    let err = resource::dispatch(&client(&server), Command::In, &body.to_string(), &[])
        .await
        .unwrap_err();

    assert!(matches!(err, SlackError::ParseError(_)));
}

#[tokio::test]
async fn test_in_requires_version() {
    let server = MockServer::start().await;
    let dest = TempDir::new().unwrap();
    let body = json!({"source": source(None)});

    let err = resource::dispatch(
        &client(&server),
        Command::In,
        &body.to_string(),
        &[dest.path().display().to_string()],
    )
    .await
    .unwrap_err();

    match err {
        SlackError::ParseError(msg) => assert!(msg.contains("version")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_fails_without_author() {
    let server = MockServer::start().await;
    mount_single_message(
        &server,
        "conversations.history",
        json!({"ts": "5", "text": "orphan", "subtype": "channel_topic"}),
    )
    .await;

    let dest = TempDir::new().unwrap();
    let err = get(
        &client(&server),
        &request(json!({"channel": "C1", "ts": "5"}), None),
        dest.path(),
    )
    .await
    .unwrap_err();

    match err {
        SlackError::ResponseError(msg) => {
            assert_eq!(msg, "message 5: missing field `user` or `username`");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!dest.path().join("user").exists());
}
