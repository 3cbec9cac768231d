//! Runtime configuration for the data service and its HTTP client.

use std::env;
use std::time::Duration;

/// Upstream REST API root.
pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
/// Page size used while walking the full catalog.
pub const DEFAULT_CATALOG_PAGE_SIZE: usize = 100;
/// Cache size above which the catalog is treated as already loaded.
pub const DEFAULT_CACHE_THRESHOLD: usize = 500;
/// Max-age hint passed to the upstream transport.
pub const DEFAULT_REVALIDATE_SECS: u64 = 3600;
/// Number of summaries shown per UI page.
pub const ITEMS_PER_PAGE: usize = 20;
/// Maximum number of autocomplete suggestions.
pub const SUGGESTION_LIMIT: usize = 5;

/// Environment variable that overrides the upstream base URL.
pub const BASE_URL_ENV: &str = "POKEDEX_API_BASE_URL";

/// Settings shared by [`crate::HttpApiClient`] and [`crate::PokemonService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub base_url: String,
    pub catalog_page_size: usize,
    pub cache_threshold: usize,
    pub revalidate: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog_page_size: DEFAULT_CATALOG_PAGE_SIZE,
            cache_threshold: DEFAULT_CACHE_THRESHOLD,
            revalidate: Duration::from_secs(DEFAULT_REVALIDATE_SECS),
        }
    }
}

impl ServiceConfig {
    /// Defaults, with the base URL taken from `POKEDEX_API_BASE_URL` when set.
    pub fn from_env() -> Self {
        let config = Self::default();
        match env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => config.with_base_url(url.trim()),
            _ => config,
        }
    }

    /// Replace the base URL. A trailing slash is dropped so endpoints can be
    /// appended verbatim.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_threshold(mut self, threshold: usize) -> Self {
        self.cache_threshold = threshold;
        self
    }

    pub fn with_catalog_page_size(mut self, page_size: usize) -> Self {
        self.catalog_page_size = page_size.max(1);
        self
    }
}
