//! Common test utilities: a local mock of the upstream REST API.
//!
//! The mock binds `127.0.0.1:0`, serves canned JSON per endpoint and records
//! every request it receives so tests can assert on upstream traffic.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::header::CACHE_CONTROL;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use pokedex_lib::ServiceConfig;
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// Request observed by the mock.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct Hit {
    /// Endpoint relative to the API root, including the query string.
    pub endpoint: String,
    pub cache_control: Option<String>,
}

#[derive(Debug, Clone)]
enum Reply {
    Json(Value),
    Status(u16),
    Raw(String),
}

#[derive(Clone)]
struct Upstream {
    base_url: String,
    routes: Arc<HashMap<String, Reply>>,
    catalog: Arc<Vec<String>>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

/// Builder for [`MockUpstream`].
#[derive(Default)]
pub struct MockBuilder {
    routes: HashMap<String, Reply>,
    catalog: Vec<String>,
}

#[allow(dead_code)]
impl MockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `endpoint` (e.g. `/pokemon-species/25`).
    pub fn json(mut self, endpoint: &str, body: Value) -> Self {
        self.routes.insert(endpoint.to_string(), Reply::Json(body));
        self
    }

    pub fn status(mut self, endpoint: &str, status: u16) -> Self {
        self.routes
            .insert(endpoint.to_string(), Reply::Status(status));
        self
    }

    /// Serve a non-JSON body with status 200.
    pub fn raw(mut self, endpoint: &str, body: &str) -> Self {
        self.routes
            .insert(endpoint.to_string(), Reply::Raw(body.to_string()));
        self
    }

    /// Answer any `/pokemon?offset=&limit=` query from `names`, where the
    /// n-th name has id n + 1. Explicit routes take precedence.
    pub fn catalog<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.catalog = names.iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    pub async fn start(self) -> MockUpstream {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream address");
        let base_url = format!("http://{addr}/api/v2");
        let hits = Arc::new(Mutex::new(Vec::new()));

        let state = Upstream {
            base_url: base_url.clone(),
            routes: Arc::new(self.routes),
            catalog: Arc::new(self.catalog),
            hits: Arc::clone(&hits),
        };
        let app = Router::new().fallback(handle).with_state(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock upstream serve");
        });

        MockUpstream { base_url, hits }
    }
}

/// Running mock upstream.
pub struct MockUpstream {
    pub base_url: String,
    hits: Arc<Mutex<Vec<Hit>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn config(&self) -> ServiceConfig {
        ServiceConfig::default().with_base_url(self.base_url.clone())
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().expect("hits lock").clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.hits().into_iter().map(|hit| hit.endpoint).collect()
    }

    /// Number of requests whose endpoint starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.endpoints()
            .iter()
            .filter(|endpoint| endpoint.starts_with(prefix))
            .count()
    }
}

async fn handle(State(upstream): State<Upstream>, headers: HeaderMap, uri: Uri) -> Response {
    let full = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default();
    let endpoint = full
        .strip_prefix("/api/v2")
        .unwrap_or(&full)
        .to_string();

    upstream.hits.lock().expect("hits lock").push(Hit {
        endpoint: endpoint.clone(),
        cache_control: headers
            .get(CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    });

    if let Some(reply) = upstream.routes.get(&endpoint) {
        return match reply {
            Reply::Json(body) => Json(body.clone()).into_response(),
            Reply::Status(status) => StatusCode::from_u16(*status)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            Reply::Raw(body) => (StatusCode::OK, body.clone()).into_response(),
        };
    }

    if uri.path() == "/api/v2/pokemon" && !upstream.catalog.is_empty() {
        return Json(catalog_page(&upstream, uri.query().unwrap_or(""))).into_response();
    }

    StatusCode::NOT_FOUND.into_response()
}

fn catalog_page(upstream: &Upstream, query: &str) -> Value {
    let mut offset = 0usize;
    let mut limit = 20usize;
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some(("offset", value)) => offset = value.parse().unwrap_or(0),
            Some(("limit", value)) => limit = value.parse().unwrap_or(20),
            _ => {}
        }
    }

    let total = upstream.catalog.len();
    let end = (offset + limit).min(total);
    let start = offset.min(end);
    let results: Vec<Value> = upstream.catalog[start..end]
        .iter()
        .enumerate()
        .map(|(i, name)| pokemon_entry(&upstream.base_url, (start + i + 1) as u32, name))
        .collect();
    let next = (end < total)
        .then(|| format!("{}/pokemon?offset={end}&limit={limit}", upstream.base_url));

    json!({ "count": total, "next": next, "previous": null, "results": results })
}

#[allow(dead_code)]
pub fn pokemon_entry(base_url: &str, id: u32, name: &str) -> Value {
    json!({ "name": name, "url": format!("{base_url}/pokemon/{id}/") })
}

#[allow(dead_code)]
pub fn species_entry(base_url: &str, id: u32, name: &str) -> Value {
    json!({ "name": name, "url": format!("{base_url}/pokemon-species/{id}/") })
}

#[allow(dead_code)]
pub fn generated_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("mon-{i:04}")).collect()
}
