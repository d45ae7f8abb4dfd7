// Integration tests for `SyncthingClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use syndash_api::{Error, SyncthingClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, SyncthingClient) {
    let server = MockServer::start().await;
    let client = SyncthingClient::from_api_key(
        &server.uri(),
        &SecretString::from("test-key"),
        &TransportConfig::default(),
    )
    .expect("client should build");
    (server, client)
}

// ── Happy-path tests ────────────────────────────────────────────────

#[tokio::test]
async fn test_system_status_sends_auth_headers() {
    let (server, client) = setup().await;

    let body = json!({
        "myID": "LOCAL77-AAAAAAA",
        "version": "v1.27.6",
        "os": "linux",
        "arch": "amd64",
        "uptime": 93784,
        "connectionServiceStatus": {
            "tcp://0.0.0.0:22000": { "error": null },
            "quic://0.0.0.0:22000": { "error": "bind failed" }
        },
        "discoveryStatus": {
            "global@https://discovery.syncthing.net/v2/": { "error": null }
        }
    });

    Mock::given(method("GET"))
        .and(path("/rest/system/status"))
        .and(header("X-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let status = client.system_status().await.expect("status should decode");

    assert_eq!(status.my_id, "LOCAL77-AAAAAAA");
    assert_eq!(status.version.as_deref(), Some("v1.27.6"));
    assert_eq!(status.uptime, 93784);
    assert_eq!(status.connection_service_status.len(), 2);
    let healthy = status
        .connection_service_status
        .values()
        .filter(|s| s.is_healthy())
        .count();
    assert_eq!(healthy, 1);
}

#[tokio::test]
async fn test_devices_and_folders() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/config/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "deviceID": "AAA", "name": "laptop" },
            { "deviceID": "BBB" },
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/config/folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "photos",
                "label": "Photos",
                "path": "/home/me/photos",
                "devices": [ { "deviceID": "AAA" }, { "deviceID": "BBB" } ]
            },
        ])))
        .mount(&server)
        .await;

    let devices = client.devices().await.expect("devices should decode");
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].name.as_deref(), Some("laptop"));
    assert!(devices[1].name.is_none());

    let folders = client.folders().await.expect("folders should decode");
    assert_eq!(folders[0].display_label(), "Photos");
    assert_eq!(folders[0].devices.len(), 2);
}

#[tokio::test]
async fn test_completion_with_and_without_folder_filter() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/db/completion"))
        .and(query_param("device", "AAA"))
        .and(query_param("folder", "photos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "completion": 82.5, "needItems": 12, "needBytes": 4096
        })))
        .expect(1)
        .mount(&server)
        .await;

    let comp = client
        .completion("AAA", Some("photos"))
        .await
        .expect("completion should decode");
    assert!((comp.completion - 82.5).abs() < f64::EPSILON);
    assert_eq!(comp.need_items, 12);
    assert!(!comp.is_complete());

    server.reset().await;

    Mock::given(method("GET"))
        .and(path("/rest/db/completion"))
        .and(query_param("device", "AAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "completion": 100.0, "needItems": 0, "needBytes": 0
        })))
        .expect(1)
        .mount(&server)
        .await;

    let comp = client
        .completion("AAA", None)
        .await
        .expect("completion should decode");
    assert!(comp.is_complete());
}

// ── Error taxonomy ──────────────────────────────────────────────────

#[tokio::test]
async fn test_non_2xx_is_api_error_with_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/system/connections"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Forbidden"))
        .mount(&server)
        .await;

    let err = client.connections().await.expect_err("should fail");
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 403);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/rest/config/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client.devices().await.expect_err("should fail");
    assert!(matches!(err, Error::Deserialization { .. }));
}

#[tokio::test]
async fn test_connect_refused_is_transport_error() {
    // Nothing listens on this port; connection is refused immediately.
    let client = SyncthingClient::from_api_key(
        "http://127.0.0.1:1",
        &SecretString::from("test-key"),
        &TransportConfig::default(),
    )
    .expect("client should build");

    let err = client.system_status().await.expect_err("should fail");
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.status().is_none());
}

#[tokio::test]
async fn test_trailing_slash_base_url() {
    let server = MockServer::start().await;
    let client = SyncthingClient::from_reqwest(
        &format!("{}/", server.uri()),
        reqwest::Client::new(),
    )
    .expect("client should build");

    Mock::given(method("GET"))
        .and(path("/rest/system/connections"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total": { "inBytesTotal": 10, "outBytesTotal": 20 },
            "connections": {}
        })))
        .mount(&server)
        .await;

    let conns = client.connections().await.expect("should decode");
    assert_eq!(conns.total.in_bytes_total, 10);
    assert_eq!(conns.total.out_bytes_total, 20);
}
