//! Integration test harness for AvukatAjanda.
//!
//! Builds the real router in-process and drives it with
//! `tower::ServiceExt::oneshot`; no socket is bound.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p avukat-ajanda-integration-tests
//! ```
//!
//! Every test runs against both storage backends: the in-process store
//! (`memory://`) and an in-memory `SQLite` database (`sqlite::memory:`).

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use avukat_ajanda_server::app::build_app;
use avukat_ajanda_server::config::{ConfigError, ServerConfig};
use avukat_ajanda_server::db::{self, RepositoryError};
use avukat_ajanda_server::state::AppState;

/// Storage backends the suite runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    Sqlite,
}

impl Backend {
    pub const ALL: [Self; 2] = [Self::Memory, Self::Sqlite];

    const fn database_url(self) -> &'static str {
        match self {
            Self::Memory => "memory://",
            Self::Sqlite => "sqlite::memory:",
        }
    }
}

/// Errors raised while building a test application.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    #[error("storage: {0}")]
    Storage(#[from] RepositoryError),
}

/// A fully wired application with fresh, empty storage.
#[derive(Clone)]
pub struct TestApp {
    pub backend: Backend,
    router: Router,
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON body, or `Value::Null` if the body is not JSON.
    pub body: Value,
}

impl TestApp {
    /// Build an app for `backend` with extra environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or storage setup fails.
    pub async fn with_env(backend: Backend, extra: &[(&str, &str)]) -> Result<Self, HarnessError> {
        let mut vars: HashMap<String, String> = HashMap::from([
            ("AJANDA_DATABASE_URL".to_owned(), backend.database_url().to_owned()),
            ("AJANDA_ENV".to_owned(), "test".to_owned()),
        ]);
        vars.extend(extra.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())));

        let config = ServerConfig::from_lookup(|key| vars.get(key).cloned())?;
        let store = db::open_store(&config.database).await?;
        let state = AppState::new(config, Arc::clone(&store));

        Ok(Self {
            backend,
            router: build_app(state),
        })
    }

    /// Build an app for `backend` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if storage setup fails.
    pub async fn new(backend: Backend) -> Result<Self, HarnessError> {
        Self::with_env(backend, &[]).await
    }

    /// Send a request and buffer the response.
    ///
    /// # Panics
    ///
    /// Panics if the router fails, which axum routers never do.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|never| match never {});

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// `GET path`.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.send(build_request(Method::GET, path, Body::empty(), &[]))
            .await
    }

    /// `POST path` with a JSON body.
    pub async fn post_json(&self, path: &str, body: &Value) -> TestResponse {
        self.post_raw(path, &body.to_string()).await
    }

    /// `POST path` with an arbitrary body labelled as JSON.
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        self.send(build_request(
            Method::POST,
            path,
            Body::from(body.to_owned()),
            &[(header::CONTENT_TYPE.as_str(), "application/json")],
        ))
        .await
    }
}

/// Build a request with the given headers.
///
/// # Panics
///
/// Panics if `path` or a header is not a valid HTTP value.
#[must_use]
pub fn build_request(
    method: Method,
    path: &str,
    body: Body,
    headers: &[(&str, &str)],
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    builder.body(body).expect("valid test request")
}
