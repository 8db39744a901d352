//! Tests for application wiring.

#![allow(clippy::unwrap_used)] // Tests can unwrap
#![allow(clippy::expect_used)] // Tests can expect

use axum::http::StatusCode;
use axum_test::TestServer;
use event_api_core::memory::InMemoryEventRepository;
use event_api_server::{Config, build_app, serve};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn config(pairs: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    Config::from_source(|key| vars.get(key).cloned())
}

fn event_body(name: &str) -> Value {
    json!({
        "name": name,
        "beginEnrollmentDateTime": "2020-03-10T04:02:02",
        "closeEnrollmentDateTime": "2020-03-11T04:02:02",
        "beginEventDateTime": "2020-03-12T04:02:02",
        "endEventDateTime": "2020-03-13T04:02:02",
        "basePrice": 100,
        "maxPrice": 200,
        "limitOfEnrollment": 100
    })
}

#[tokio::test]
async fn links_use_configured_base_url() {
    let config = config(&[("PUBLIC_BASE_URL", "https://events.example.com/")]);
    let server = TestServer::new(build_app(&config, Arc::new(InMemoryEventRepository::new())))
        .unwrap();

    let index = server.get("/api").await.json::<Value>();
    assert_eq!(
        index["_links"]["events"]["href"],
        "https://events.example.com/api/events"
    );

    let created = server.post("/api/events").json(&event_body("Rust")).await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    assert_eq!(
        created.json::<Value>()["_links"]["self"]["href"],
        "https://events.example.com/api/events/1"
    );
}

#[tokio::test]
async fn listing_uses_configured_page_sizes() {
    let config = config(&[("DEFAULT_PAGE_SIZE", "2"), ("MAX_PAGE_SIZE", "3")]);
    let server = TestServer::new(build_app(&config, Arc::new(InMemoryEventRepository::new())))
        .unwrap();
    for i in 0..5 {
        server
            .post("/api/events")
            .json(&event_body(&format!("event {i}")))
            .await;
    }

    let default_page = server.get("/api/events").await.json::<Value>();
    assert_eq!(default_page["page"]["size"], 2);
    assert_eq!(default_page["page"]["totalPages"], 3);

    let capped = server
        .get("/api/events")
        .add_query_param("size", 100)
        .await
        .json::<Value>();
    assert_eq!(capped["page"]["size"], 3);
}

#[tokio::test]
async fn serve_stops_on_shutdown() {
    let config = config(&[]);
    let app = build_app(&config, Arc::new(InMemoryEventRepository::new()));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(serve(
        listener,
        app,
        async move {
            let _ = rx.await;
        },
        Duration::from_secs(5),
    ));

    tx.send(()).unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server should stop promptly")
        .unwrap();
    assert!(result.is_ok());
}
