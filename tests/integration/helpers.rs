//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use hungr_api::AppState;
use hungr_core::config::AppConfig;
use hungr_database::{MemoryStore, Stores};
use hungr_service::extraction::Extractor;
use hungr_service::ExtractionService;
use hungr_storage::{LocalStorageProvider, StorageManager};

/// Multipart boundary used by [`TestApp::upload`].
const BOUNDARY: &str = "hungr-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores behind the router, for direct inspection
    pub stores: Stores,
    /// Blob storage behind the router
    pub storage: Arc<StorageManager>,
    _blobs: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: axum::http::HeaderMap,
    /// Raw body
    pub bytes: Vec<u8>,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
}

impl TestResponse {
    /// The `error` field of an error body.
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}

/// One multipart part.
pub struct Part<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl TestApp {
    /// Application on the in-memory store without extraction configured.
    pub async fn new() -> Self {
        Self::build(None).await
    }

    /// Application whose extraction calls go to `extractor`.
    pub async fn with_extractor(extractor: Arc<dyn Extractor>) -> Self {
        Self::build(Some(extractor)).await
    }

    async fn build(extractor: Option<Arc<dyn Extractor>>) -> Self {
        let blobs = TempDir::new().expect("Failed to create temp dir");
        let provider = LocalStorageProvider::new(blobs.path())
            .await
            .expect("Failed to init storage");
        let storage = Arc::new(StorageManager::from_provider(Arc::new(provider)));
        let stores = Stores::memory(MemoryStore::new());

        let config = AppConfig::default();
        let extraction = ExtractionService::new(
            extractor,
            config.extraction.max_content_chars,
            Duration::from_secs(5),
        )
        .expect("Failed to build extraction service");

        let state = AppState::with_extraction(config, stores.clone(), Arc::clone(&storage), extraction);

        Self {
            router: hungr_api::build_router(state),
            stores,
            storage,
            _blobs: blobs,
        }
    }

    /// Make a JSON (or bodiless) request.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);
        let body = match body {
            Some(value) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&value).expect("Failed to serialize body"))
            }
            None => Body::empty(),
        };
        self.send(req.body(body).expect("Failed to build request")).await
    }

    /// Send a raw body with the given content type.
    pub async fn raw(&self, method: &str, path: &str, content_type: &str, body: &str) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");
        self.send(req).await
    }

    /// POST a multipart form.
    pub async fn upload(&self, path: &str, parts: &[Part<'_>]) -> TestResponse {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    part.field, part.file_name
                )
                .as_bytes(),
            );
            if let Some(ct) = part.content_type {
                body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
            }
            body.extend_from_slice(b"\r\n");
            body.extend_from_slice(part.data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");
        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }

    /// Log in and return the user JSON.
    pub async fn login(&self, email: &str) -> Value {
        let response = self
            .request("POST", "/api/auth/login", Some(serde_json::json!({ "email": email })))
            .await;
        assert_eq!(response.status, StatusCode::OK, "Login failed: {:?}", response.body);
        response.body["user"].clone()
    }

    /// Create a recipe without files and return the response body.
    pub async fn create_recipe(&self, email: &str, name: &str, tags: &str) -> Value {
        let path = format!(
            "/api/recipes?email={}&name={}&tagString={}",
            encode(email),
            encode(name),
            encode(tags)
        );
        let response = self.request("POST", &path, None).await;
        assert_eq!(response.status, StatusCode::OK, "Create failed: {:?}", response.body);
        response.body
    }
}

/// Percent-encode a query value.
pub fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => out.push(b as char),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
