//! Data service: paged listing, full-catalog fetch with single-flight
//! de-duplication, substring search, habitat filtering, and the ability and
//! evolution joins.
//!
//! Listing and search report failures: `fetch_page` as an error string on an
//! empty page, the others as `Err`. The detail joins swallow every failure
//! into an empty value and only log it.

use std::sync::Arc;

use futures::future::{try_join_all, FutureExt};
use tracing::{debug, info, warn};

use crate::cache::{Cache, PokemonCache};
use crate::client::{get_json, relative_endpoint, ApiClient, HttpApiClient};
use crate::config::{ServiceConfig, ITEMS_PER_PAGE};
use crate::error::Result;
use crate::habitat::HabitatName;
use crate::model::{
    extract_id_from_url, filter_by_name, Ability, AbilityResponse, EvolutionChain,
    PokemonDetails, PokemonHabitat, PokemonId, PokemonListResponse, PokemonPage,
    PokemonSpecies, PokemonSummary,
};

/// Orchestrates the [`ApiClient`] and the shared [`PokemonCache`].
///
/// Cloning is cheap; clones share the same client and cache.
#[derive(Clone)]
pub struct PokemonService {
    client: Arc<dyn ApiClient>,
    cache: Arc<PokemonCache>,
    config: ServiceConfig,
}

impl PokemonService {
    pub fn new(client: Arc<dyn ApiClient>, cache: Arc<PokemonCache>, config: ServiceConfig) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    /// Wire an [`HttpApiClient`] and an empty cache from `config`.
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let client = HttpApiClient::new(&config)?;
        let cache = PokemonCache::new(config.cache_threshold);
        Ok(Self::new(Arc::new(client), Arc::new(cache), config))
    }

    pub fn cache(&self) -> &PokemonCache {
        &self.cache
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub async fn fetch_pokemon_details(&self, id: PokemonId) -> Result<PokemonDetails> {
        get_json(self.client.as_ref(), &format!("/pokemon/{id}")).await
    }

    /// Fetch one catalog page and cache every entry on it.
    ///
    /// Never fails: on error the page is empty and `error` carries the
    /// message for display.
    pub async fn fetch_page(&self, offset: usize, limit: usize) -> PokemonPage {
        let endpoint = format!("/pokemon?offset={offset}&limit={limit}");
        match get_json::<PokemonListResponse>(self.client.as_ref(), &endpoint).await {
            Ok(data) => {
                let pokemons = data
                    .results
                    .iter()
                    .map(|result| {
                        let pokemon = PokemonSummary::from_resource(result);
                        self.cache.add_pokemon(pokemon.clone());
                        pokemon
                    })
                    .collect();

                PokemonPage {
                    pokemons,
                    count: data.count,
                    next: data.next,
                    previous: data.previous,
                    error: None,
                }
            }
            Err(err) => {
                warn!(offset, limit, error = %err, "failed to fetch pokemon page");
                PokemonPage::failed(err.to_string())
            }
        }
    }

    /// Return the full catalog.
    ///
    /// Joins a walk already in flight; otherwise answers from the cache once
    /// it is well populated; otherwise walks the catalog page by page,
    /// publishing the walk so concurrent callers share it.
    pub async fn fetch_all_pokemon(&self) -> Result<Vec<PokemonSummary>> {
        if self.cache.is_fetch_in_progress() {
            if let Some(pending) = self.cache.fetch_promise() {
                debug!("joining catalog fetch already in flight");
                return pending.await;
            }
        }

        if self.cache.is_well_populated() {
            debug!(size = self.cache.size(), "serving catalog from cache");
            return Ok(self.cached_catalog());
        }

        self.cache.set_fetch_in_progress(true);
        let fetch = walk_catalog(
            Arc::clone(&self.client),
            Arc::clone(&self.cache),
            self.config.catalog_page_size,
        )
        .boxed()
        .shared();
        self.cache.set_fetch_promise(Some(fetch.clone()));

        fetch.await
    }

    /// Case-insensitive substring search over names.
    ///
    /// An empty query returns the first UI page of the catalog.
    pub async fn search_pokemon(&self, query: &str) -> Result<Vec<PokemonSummary>> {
        if query.is_empty() {
            return Ok(self.fetch_page(0, ITEMS_PER_PAGE).await.pokemons);
        }

        let catalog = if self.cache.is_well_populated() {
            self.cached_catalog()
        } else {
            self.fetch_all_pokemon().await?
        };

        Ok(filter_by_name(&catalog, query))
    }

    /// Species living in `habitat`, as summaries. Not added to the cache.
    pub async fn fetch_pokemon_habitat(&self, habitat: HabitatName) -> Result<Vec<PokemonSummary>> {
        let data: PokemonHabitat =
            get_json(self.client.as_ref(), &format!("/pokemon-habitat/{habitat}")).await?;

        Ok(data
            .pokemon_species
            .iter()
            .map(PokemonSummary::from_resource)
            .collect())
    }

    pub async fn fetch_ability_details(&self, name: &str) -> Result<Ability> {
        let response: AbilityResponse =
            get_json(self.client.as_ref(), &format!("/ability/{name}")).await?;
        Ok(Ability::from(response))
    }

    /// Abilities of `id` with English effect text, in the order the details
    /// record lists them. Any failure yields an empty list.
    pub async fn fetch_pokemon_abilities(&self, id: PokemonId) -> Vec<Ability> {
        let details = match self.fetch_pokemon_details(id).await {
            Ok(details) => details,
            Err(err) => {
                warn!(id, error = %err, "failed to fetch pokemon details for abilities");
                return Vec::new();
            }
        };

        let lookups = details
            .abilities
            .iter()
            .map(|entry| self.fetch_ability_details(&entry.ability.name));

        match try_join_all(lookups).await {
            Ok(abilities) => abilities,
            Err(err) => {
                warn!(id, error = %err, "failed to fetch ability details");
                Vec::new()
            }
        }
    }

    pub async fn fetch_pokemon_species(&self, id: PokemonId) -> Result<PokemonSpecies> {
        get_json(self.client.as_ref(), &format!("/pokemon-species/{id}")).await
    }

    /// Evolution chain for `id` via its species record.
    ///
    /// Returns [`EvolutionChain::empty`] when the species cannot be fetched,
    /// has no chain reference, or the chain itself cannot be fetched.
    pub async fn fetch_pokemon_evolutions(&self, id: PokemonId) -> EvolutionChain {
        let species = match self.fetch_pokemon_species(id).await {
            Ok(species) => species,
            Err(err) => {
                warn!(id, error = %err, "no species data found");
                return EvolutionChain::empty();
            }
        };

        let Some(chain_ref) = species.evolution_chain.filter(|r| !r.url.is_empty()) else {
            debug!(id, "species has no evolution chain");
            return EvolutionChain::empty();
        };

        let chain_id = extract_id_from_url(&chain_ref.url);
        match get_json(self.client.as_ref(), &format!("/evolution-chain/{chain_id}")).await {
            Ok(chain) => chain,
            Err(err) => {
                warn!(id, chain_id, error = %err, "failed to fetch evolution chain");
                EvolutionChain::empty()
            }
        }
    }

    fn cached_catalog(&self) -> Vec<PokemonSummary> {
        let mut pokemons = self.cache.get_all();
        pokemons.sort_by(|a, b| a.id.cmp(&b.id).then_with(|| a.name.cmp(&b.name)));
        pokemons
    }
}

/// Clears the in-flight markers when the walk finishes, fails or is dropped.
struct FetchGuard(Arc<PokemonCache>);

impl Drop for FetchGuard {
    fn drop(&mut self) {
        self.0.finish_fetch();
    }
}

async fn walk_catalog(
    client: Arc<dyn ApiClient>,
    cache: Arc<PokemonCache>,
    page_size: usize,
) -> Result<Vec<PokemonSummary>> {
    let _guard = FetchGuard(Arc::clone(&cache));
    let mut all = Vec::new();
    let mut endpoint = Some(format!("/pokemon?limit={page_size}"));

    while let Some(current) = endpoint.take() {
        let page: PokemonListResponse = get_json(client.as_ref(), &current).await?;
        for result in &page.results {
            let pokemon = PokemonSummary::from_resource(result);
            cache.add_pokemon(pokemon.clone());
            all.push(pokemon);
        }
        endpoint = page
            .next
            .filter(|next| !next.is_empty())
            .map(|next| relative_endpoint(client.base_url(), &next));
    }

    info!(count = all.len(), "catalog walk complete");
    Ok(all)
}
