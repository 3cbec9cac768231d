use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::error::{Error, Result};

/// Read-only access to the upstream REST API.
///
/// Implementations issue exactly one attempt per call: no retry, no backoff
/// and no timeout beyond what the transport imposes.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Root every relative endpoint is appended to.
    fn base_url(&self) -> &str;

    /// GET `endpoint` and return the parsed JSON body.
    ///
    /// `endpoint` is either a path relative to [`ApiClient::base_url`]
    /// (`/pokemon/25`) or an absolute `http(s)://` URL.
    async fn get(&self, endpoint: &str) -> Result<Value>;
}

/// GET `endpoint` and decode the body into `T`.
pub async fn get_json<T: DeserializeOwned>(client: &dyn ApiClient, endpoint: &str) -> Result<T> {
    let body = client.get(endpoint).await?;
    serde_json::from_value(body).map_err(|err| Error::Decode {
        url: resolve_url(client.base_url(), endpoint),
        message: err.to_string(),
    })
}

/// Join `endpoint` onto `base_url` unless it is already absolute.
pub fn resolve_url(base_url: &str, endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else {
        format!("{}{}", base_url, endpoint)
    }
}

/// Turn an absolute link returned by the API back into an endpoint relative
/// to `base_url`. Links to a different root are returned unchanged.
pub fn relative_endpoint(base_url: &str, link: &str) -> String {
    link.strip_prefix(base_url).unwrap_or(link).to_string()
}

/// [`ApiClient`] backed by an async `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    http: Client,
    base_url: String,
    revalidate: Duration,
}

impl HttpApiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(user_agent())
            .build()
            .map_err(|err| Error::from_reqwest(&config.base_url, err))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            revalidate: config.revalidate,
        })
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, endpoint: &str) -> Result<Value> {
        let url = resolve_url(&self.base_url, endpoint);
        debug!(url = %url, "GET");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(
                CACHE_CONTROL,
                format!("max-age={}", self.revalidate.as_secs()),
            )
            .send()
            .await
            .map_err(|err| Error::from_reqwest(&url, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Transport {
                status: status.as_u16(),
                url,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| Error::from_reqwest(&url, err))?;
        serde_json::from_slice(&bytes).map_err(|err| Error::Decode {
            url,
            message: err.to_string(),
        })
    }
}

fn user_agent() -> String {
    format!("pokedex-lib/{version}", version = env!("CARGO_PKG_VERSION"))
}
