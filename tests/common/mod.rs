//! Shared utilities for integration testing.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use hubs_api::hubs::{Hub, HubFields, HubId};
use hubs_api::{AppConfig, HttpServer, HubStore, MemoryStore, Shutdown, StoreError};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// A store whose every operation fails.
pub struct FailingStore;

impl FailingStore {
    fn error() -> StoreError {
        StoreError::Unavailable("database is locked".into())
    }
}

#[async_trait]
impl HubStore for FailingStore {
    async fn find(&self) -> Result<Vec<Hub>, StoreError> {
        Err(Self::error())
    }

    async fn find_by_id(&self, _id: HubId) -> Result<Option<Hub>, StoreError> {
        Err(Self::error())
    }

    async fn add(&self, _info: HubFields) -> Result<Hub, StoreError> {
        Err(Self::error())
    }

    async fn update(&self, _id: HubId, _changes: HubFields) -> Result<Option<Hub>, StoreError> {
        Err(Self::error())
    }

    async fn remove(&self, _id: HubId) -> Result<bool, StoreError> {
        Err(Self::error())
    }
}

/// A memory store whose `find` takes `delay` and records peak concurrency.
pub struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }
    }

    /// Most `find` calls ever running at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HubStore for SlowStore {
    async fn find(&self) -> Result<Vec<Hub>, StoreError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.inner.find().await
    }

    async fn find_by_id(&self, id: HubId) -> Result<Option<Hub>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn add(&self, info: HubFields) -> Result<Hub, StoreError> {
        self.inner.add(info).await
    }

    async fn update(&self, id: HubId, changes: HubFields) -> Result<Option<Hub>, StoreError> {
        self.inner.update(id, changes).await
    }

    async fn remove(&self, id: HubId) -> Result<bool, StoreError> {
        self.inner.remove(id).await
    }
}

/// Router over a fresh in-memory store with default config.
pub fn memory_app() -> Router {
    app_with(AppConfig::default(), Arc::new(MemoryStore::new()))
}

pub fn app_with(config: AppConfig, store: Arc<dyn HubStore>) -> Router {
    HttpServer::new(config, store).router()
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }
}

/// Send one request through the router in-process.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    send_request(app, builder.body(body).unwrap()).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();
    TestResponse {
        status,
        headers,
        body,
    }
}

pub struct RunningServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl RunningServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start a real server on an ephemeral port.
pub async fn spawn_server(mut config: AppConfig, store: Arc<dyn HubStore>) -> RunningServer {
    config.listener.bind_address = "127.0.0.1:0".into();
    let listener = tokio::net::TcpListener::bind(&config.listener.bind_address)
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));

    RunningServer {
        addr,
        shutdown,
        handle,
    }
}
