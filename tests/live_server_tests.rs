//! Smoke test against a real listening socket, using the bundled fixtures.

use mock_dashboard_api::commands::prepare_state;
use mock_dashboard_api::server::serve;
use mock_dashboard_api::utils::config::ServerConfig;
use reqwest::blocking::Client;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::thread;

const NOW: i64 = 1_700_000_000_000;

/// Start the server on an ephemeral port in a background thread
fn spawn_server() -> SocketAddr {
    let mut config = ServerConfig::default();
    config.fixtures.data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let state = prepare_state(&config, NOW).unwrap().shared();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    listener.set_nonblocking(true).unwrap();

    thread::spawn(move || {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::from_std(listener).unwrap();
            serve(listener, state, std::future::pending()).await.unwrap();
        });
    });

    addr
}

#[test]
fn test_login_query_logout_roundtrip() {
    let addr = spawn_server();
    let base = format!("http://{}", addr);
    let client = Client::new();

    let health: Value = client
        .get(format!("{}/health", base))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(health["status"], "ok");

    let auth = client
        .post(format!("{}/auth", base))
        .json(&json!({"identifiant": "urtoob", "password": "ToobRU"}))
        .send()
        .unwrap();
    assert!(auth.status().is_success());
    let token = auth.json::<Value>().unwrap()["session_token"]
        .as_str()
        .unwrap()
        .to_string();

    // The last bundled sample lands exactly on NOW
    let points: Value = client
        .post(format!("{}/bandwidth", base))
        .json(&json!({"session_token": token, "from": NOW, "to": NOW}))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert_eq!(points["cdn"].as_array().unwrap().len(), 1);
    assert_eq!(points["cdn"][0][0], json!(NOW));
    assert_eq!(points["p2p"][0][0], json!(NOW));

    let totals: Value = client
        .post(format!("{}/bandwidth", base))
        .json(&json!({"session_token": token, "from": 0, "to": NOW, "aggregate": "max"}))
        .send()
        .unwrap()
        .json()
        .unwrap();
    assert!(totals["cdn"].as_f64().unwrap() > 0.0);
    assert!(totals["p2p"].as_f64().unwrap() > 0.0);

    let logout = client
        .post(format!("{}/logout", base))
        .json(&json!({"session_token": token}))
        .send()
        .unwrap();
    assert!(logout.status().is_success());

    let denied = client
        .post(format!("{}/streams", base))
        .json(&json!({"session_token": token}))
        .send()
        .unwrap();
    assert_eq!(denied.status().as_u16(), 403);
}
