// Test-only helpers for `pokedex-lib` unit tests.
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::client::{resolve_url, ApiClient};
use crate::config::DEFAULT_BASE_URL;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
enum StubResponse {
    Json(Value),
    Status(u16),
}

/// In-memory [`ApiClient`] serving canned JSON per endpoint.
///
/// Every call is recorded, and each call yields to the scheduler once before
/// answering so concurrent callers interleave the way real I/O would.
/// Unregistered endpoints answer 404.
pub struct StubApiClient {
    base_url: String,
    routes: HashMap<String, StubResponse>,
    requests: Mutex<Vec<String>>,
}

impl StubApiClient {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            routes: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_json(mut self, endpoint: &str, body: Value) -> Self {
        self.routes
            .insert(endpoint.to_string(), StubResponse::Json(body));
        self
    }

    pub fn with_status(mut self, endpoint: &str, status: u16) -> Self {
        self.routes
            .insert(endpoint.to_string(), StubResponse::Status(status));
        self
    }

    /// Register the paginated walk `/pokemon?limit={page_size}` followed by
    /// `next` links over `names`, where the n-th name has id n + 1.
    pub fn with_catalog(mut self, names: &[&str], page_size: usize) -> Self {
        let mut offset = 0;
        loop {
            let endpoint = if offset == 0 {
                format!("/pokemon?limit={page_size}")
            } else {
                format!("/pokemon?offset={offset}&limit={page_size}")
            };
            let end = (offset + page_size).min(names.len());
            let next = (end < names.len()).then(|| {
                format!(
                    "{}/pokemon?offset={end}&limit={page_size}",
                    self.base_url
                )
            });
            let entries: Vec<Value> = names[offset..end]
                .iter()
                .enumerate()
                .map(|(i, name)| pokemon_entry(&self.base_url, (offset + i + 1) as u32, name))
                .collect();
            self = self.with_json(&endpoint, list_page(names.len(), entries, next));

            if end >= names.len() {
                break;
            }
            offset = end;
        }
        self
    }

    /// Register `/pokemon?offset={offset}&limit={limit}` as a window over
    /// `names`, reporting `names.len()` as the catalog count.
    pub fn with_list_page(self, names: &[&str], offset: usize, limit: usize) -> Self {
        let end = (offset + limit).min(names.len());
        let start = offset.min(end);
        let next = (end < names.len())
            .then(|| format!("{}/pokemon?offset={end}&limit={limit}", self.base_url));
        let entries: Vec<Value> = names[start..end]
            .iter()
            .enumerate()
            .map(|(i, name)| pokemon_entry(&self.base_url, (start + i + 1) as u32, name))
            .collect();
        let endpoint = format!("/pokemon?offset={offset}&limit={limit}");
        self.with_json(&endpoint, list_page(names.len(), entries, next))
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of recorded requests whose endpoint starts with `prefix`.
    pub fn request_count(&self, prefix: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|endpoint| endpoint.starts_with(prefix))
            .count()
    }
}

impl Default for StubApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiClient for StubApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(endpoint.to_string());
        tokio::task::yield_now().await;

        match self.routes.get(endpoint) {
            Some(StubResponse::Json(body)) => Ok(body.clone()),
            Some(StubResponse::Status(status)) => Err(Error::Transport {
                status: *status,
                url: resolve_url(&self.base_url, endpoint),
            }),
            None => Err(Error::Transport {
                status: 404,
                url: resolve_url(&self.base_url, endpoint),
            }),
        }
    }
}

/// Raw list entry `{name, url}` for `id`.
pub fn pokemon_entry(base_url: &str, id: u32, name: &str) -> Value {
    json!({ "name": name, "url": format!("{base_url}/pokemon/{id}/") })
}

/// Raw species entry `{name, url}` for `id`.
pub fn species_entry(base_url: &str, id: u32, name: &str) -> Value {
    json!({ "name": name, "url": format!("{base_url}/pokemon-species/{id}/") })
}

/// Raw `/pokemon` list response.
pub fn list_page(count: usize, results: Vec<Value>, next: Option<String>) -> Value {
    json!({
        "count": count,
        "next": next,
        "previous": null,
        "results": results,
    })
}

/// Generated names `mon-0001`, `mon-0002`, ...
pub fn generated_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("mon-{i:04}")).collect()
}
