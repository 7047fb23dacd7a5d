//! End-to-end tests against a live server through the client SDK.

use hubs_api::{AppConfig, MemoryStore};
use hubs_sdk::{HubsClient, SdkError};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use std::time::Duration;

mod common;

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[tokio::test]
async fn test_crud_over_the_wire() {
    let server = common::spawn_server(AppConfig::default(), Arc::new(MemoryStore::new())).await;
    let client = HubsClient::new(&server.url());

    assert_eq!(client.greeting().await.unwrap(), "Hello World!");
    assert!(client.now().await.unwrap().ends_with('Z'));

    let hub = client.create(&fields(json!({"name": "edge"}))).await.unwrap();
    let id = hub["id"].as_u64().unwrap();
    assert_eq!(hub["name"], "edge");

    assert_eq!(client.list().await.unwrap().len(), 1);
    assert_eq!(client.get(id).await.unwrap().unwrap()["name"], "edge");

    let updated = client
        .update(id, &fields(json!({"name": "core"})))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated["name"], "core");

    assert!(client.delete(id).await.unwrap());
    assert!(!client.delete(id).await.unwrap());
    assert!(client.get(id).await.unwrap().is_none());
    assert!(client.update(id, &Map::new()).await.unwrap().is_none());

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_store_errors_reach_client() {
    let server = common::spawn_server(AppConfig::default(), Arc::new(common::FailingStore)).await;
    let client = HubsClient::new(&server.url());

    match client.list().await {
        Err(SdkError::Status { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert!(body.contains("database is locked"));
        }
        other => panic!("expected status error, got {other:?}"),
    }

    server.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_and_restart_with_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hubs.json");

    let server = common::spawn_server(
        AppConfig::default(),
        Arc::new(MemoryStore::open(&path).unwrap()),
    )
    .await;
    let client = HubsClient::new(&server.url());
    client.create(&fields(json!({"name": "kept"}))).await.unwrap();

    server.shutdown.trigger();
    let stopped = tokio::time::timeout(Duration::from_secs(5), server.handle)
        .await
        .expect("server did not stop");
    assert!(stopped.unwrap().is_ok());

    let restarted = common::spawn_server(
        AppConfig::default(),
        Arc::new(MemoryStore::open(&path).unwrap()),
    )
    .await;
    let client = HubsClient::new(&restarted.url());
    let hubs = client.list().await.unwrap();
    assert_eq!(hubs.len(), 1);
    assert_eq!(hubs[0]["name"], "kept");

    let next = client.create(&Map::new()).await.unwrap();
    assert_eq!(next["id"], 2);

    restarted.shutdown.trigger();
}
