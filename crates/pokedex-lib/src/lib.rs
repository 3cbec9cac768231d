//! Pokédex library entry points.
//!
//! This crate wraps the public PokeAPI: an HTTP client, a process-lifetime
//! summary cache, the data service that pages, searches and joins upstream
//! records, and the state controller a front end drives. Higher-level
//! consumers (the CLI) should only depend on the items exported here.
//!

pub mod cache;
pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod habitat;
pub mod model;
pub mod pagination;
pub mod service;
pub mod url_state;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use cache::{Cache, CatalogFetch, KeyedCache, PokemonCache};
pub use client::{get_json, ApiClient, HttpApiClient};
pub use config::{ServiceConfig, ITEMS_PER_PAGE, SUGGESTION_LIMIT};
pub use controller::{SearchController, SearchState, SearchView};
pub use error::{Error, Result};
pub use habitat::HabitatName;
pub use model::{
    extract_id_from_url, Ability, EvolutionChain, PokemonDetails, PokemonId, PokemonPage,
    PokemonSpecies, PokemonSummary,
};
pub use pagination::{page_items, total_pages, PageItem};
pub use service::PokemonService;
pub use url_state::{HistoryNavigator, Navigator, UrlState};
