//! Application state controller.
//!
//! Holds what a front end renders (query, page, habitat filter, visible
//! results, loading flag, error message, suggestions) and turns user intent
//! into [`PokemonService`] calls. Every action that moves the query or page
//! pushes the new [`UrlState`] to the [`Navigator`].
//!
//! Actions take `&mut self`, so one action always runs to completion before
//! the next begins on the same controller.

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{ITEMS_PER_PAGE, SUGGESTION_LIMIT};
use crate::habitat::HabitatName;
use crate::model::{filter_by_name, PokemonPage, PokemonSummary};
use crate::pagination::{page_items, page_slice, total_pages, PageItem};
use crate::service::PokemonService;
use crate::url_state::{HistoryNavigator, Navigator, UrlState};

const HABITAT_ERROR: &str = "Error fetching habitat Pokémon";

/// UI-facing state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub current_page: usize,
    pub selected_habitat: Option<HabitatName>,
    /// Summaries visible on the current page.
    pub pokemons: Vec<PokemonSummary>,
    pub loading: bool,
    pub error: Option<String>,
    pub suggestions: Vec<PokemonSummary>,
}

impl SearchState {
    fn from_url(url: &UrlState) -> Self {
        Self {
            query: url.query.clone(),
            current_page: url.page.max(1),
            selected_habitat: None,
            pokemons: Vec::new(),
            loading: false,
            error: None,
            suggestions: Vec::new(),
        }
    }
}

/// Snapshot of the state plus the derived totals, for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchView {
    #[serde(flatten)]
    pub state: SearchState,
    pub total_results: usize,
    pub total_pages: usize,
    pub page_items: Vec<PageItem>,
    pub summary: String,
}

pub struct SearchController<N: Navigator = HistoryNavigator> {
    service: PokemonService,
    navigator: N,
    state: SearchState,
    /// Full catalog held locally for suggestions.
    all_pokemons: Vec<PokemonSummary>,
    habitat_pokemons: Vec<PokemonSummary>,
    /// Active client-side result set (search hits or habitat members).
    filtered_pokemons: Vec<PokemonSummary>,
    /// Server-reported or search-derived total when no habitat is active.
    total_results: usize,
}

impl<N: Navigator> SearchController<N> {
    /// Controller starting from the navigable state `url`.
    pub fn new(service: PokemonService, navigator: N, url: UrlState) -> Self {
        Self {
            service,
            navigator,
            state: SearchState::from_url(&url),
            all_pokemons: Vec::new(),
            habitat_pokemons: Vec::new(),
            filtered_pokemons: Vec::new(),
            total_results: 0,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn service(&self) -> &PokemonService {
        &self.service
    }

    pub fn habitat_pokemons(&self) -> &[PokemonSummary] {
        &self.habitat_pokemons
    }

    /// Preload the catalog for suggestions, then load the view the URL
    /// state describes.
    pub async fn initialize(&mut self) {
        self.preload_catalog().await;
        self.reload().await;
    }

    /// Fetch the full catalog into the local suggestion list. Failures are
    /// logged only.
    pub async fn preload_catalog(&mut self) {
        match self.service.fetch_all_pokemon().await {
            Ok(all) => {
                debug!(count = all.len(), "catalog loaded for suggestions");
                self.all_pokemons = all;
            }
            Err(err) => warn!(error = %err, "error loading initial pokemon data"),
        }
    }

    /// Re-derive the visible page from the current query, page and habitat.
    pub async fn reload(&mut self) {
        self.state.loading = true;

        if self.state.selected_habitat.is_some() {
            self.show_filtered_page();
        } else if self.state.query.is_empty() {
            let offset = self.page_offset();
            let page = self.service.fetch_page(offset, ITEMS_PER_PAGE).await;
            self.apply_server_page(page);
        } else {
            match self.service.search_pokemon(&self.state.query).await {
                Ok(results) => {
                    self.total_results = results.len();
                    self.state.suggestions = first_suggestions(&results);
                    self.filtered_pokemons = results;
                    self.show_filtered_page();
                }
                Err(err) => self.fail(err.to_string()),
            }
        }

        self.state.loading = false;
    }

    /// Submit `query` as a search and return to page 1.
    pub async fn submit_search(&mut self, query: &str) {
        self.state.loading = true;
        self.state.error = None;

        let habitat_active = self.state.selected_habitat.is_some();
        let results = if query.is_empty() {
            if habitat_active {
                self.filtered_pokemons = self.habitat_pokemons.clone();
                self.habitat_pokemons.clone()
            } else {
                let page = self.service.fetch_page(0, ITEMS_PER_PAGE).await;
                self.filtered_pokemons.clear();
                self.total_results = page.count;
                self.state.error = page.error;
                page.pokemons
            }
        } else if habitat_active {
            let results = filter_by_name(&self.habitat_pokemons, query);
            self.filtered_pokemons = results.clone();
            results
        } else {
            match self.service.search_pokemon(query).await {
                Ok(results) => {
                    self.filtered_pokemons = results.clone();
                    results
                }
                Err(err) => {
                    warn!(query, error = %err, "error fetching pokemons");
                    self.fail(err.to_string());
                    self.state.suggestions.clear();
                    self.state.loading = false;
                    return;
                }
            }
        };

        if !query.is_empty() || habitat_active {
            self.total_results = results.len();
        }
        self.state.pokemons = page_slice(&results, 1, ITEMS_PER_PAGE);
        self.state.query = query.to_string();
        self.state.current_page = 1;
        self.navigator.push(UrlState::new(query, 1));
        self.state.suggestions = first_suggestions(&results);
        self.state.loading = false;
    }

    /// Move to `page`. The unfiltered catalog paginates on the server; an
    /// active search or habitat paginates the held result set.
    pub async fn change_page(&mut self, page: usize) {
        self.state.current_page = page.max(1);
        self.navigator
            .push(UrlState::new(self.state.query.clone(), self.state.current_page));

        if self.state.selected_habitat.is_none() && self.state.query.is_empty() {
            self.state.loading = true;
            self.state.error = None;
            let offset = self.page_offset();
            let page = self.service.fetch_page(offset, ITEMS_PER_PAGE).await;
            self.apply_server_page(page);
            self.state.loading = false;
        } else {
            self.show_filtered_page();
        }
    }

    /// Filter by `habitat`, or clear the filter with `None`.
    pub async fn select_habitat(&mut self, habitat: Option<HabitatName>) {
        self.state.loading = true;
        self.state.error = None;

        match habitat {
            Some(habitat) => match self.service.fetch_pokemon_habitat(habitat).await {
                Ok(results) => {
                    self.state.pokemons = page_slice(&results, 1, ITEMS_PER_PAGE);
                    self.total_results = results.len();
                    self.habitat_pokemons = results.clone();
                    self.filtered_pokemons = results;
                    self.state.selected_habitat = Some(habitat);
                }
                Err(err) => {
                    warn!(%habitat, error = %err, "error fetching habitat pokemon");
                    self.fail(HABITAT_ERROR.to_string());
                }
            },
            None => {
                self.habitat_pokemons.clear();
                self.filtered_pokemons.clear();
                self.state.selected_habitat = None;
                self.state.query.clear();
                self.state.suggestions.clear();
                let page = self.service.fetch_page(0, ITEMS_PER_PAGE).await;
                self.apply_server_page(page);
            }
        }

        self.state.current_page = 1;
        self.navigator
            .push(UrlState::new(self.state.query.clone(), 1));
        self.state.loading = false;
    }

    /// Recompute suggestions for text typed but not yet submitted. Never
    /// touches the network.
    pub fn update_suggestions(&mut self, text: &str) {
        if text.trim().is_empty() {
            self.state.suggestions.clear();
            return;
        }

        let pool = if self.state.selected_habitat.is_some() {
            &self.habitat_pokemons
        } else {
            &self.all_pokemons
        };
        self.state.suggestions = first_suggestions(&filter_by_name(pool, text));
    }

    pub fn total_results(&self) -> usize {
        if self.state.selected_habitat.is_some() {
            self.filtered_pokemons.len()
        } else {
            self.total_results
        }
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_results(), ITEMS_PER_PAGE)
    }

    /// Human-readable result count line.
    pub fn results_summary(&self) -> String {
        let total = self.total_results();
        let mut summary = if total > 0 {
            format!("Found {total} Pokemon")
        } else {
            "No Pokemon found".to_string()
        };
        if !self.state.query.is_empty() {
            summary.push_str(&format!(" matching \"{}\"", self.state.query));
        }
        if total > 0 {
            if let Some(habitat) = self.state.selected_habitat {
                summary.push_str(&format!(" in {} habitat", habitat.label()));
            }
        }
        summary
    }

    pub fn view(&self) -> SearchView {
        SearchView {
            state: self.state.clone(),
            total_results: self.total_results(),
            total_pages: self.total_pages(),
            page_items: page_items(self.state.current_page, self.total_pages()),
            summary: self.results_summary(),
        }
    }

    fn page_offset(&self) -> usize {
        self.state
            .current_page
            .saturating_sub(1)
            .saturating_mul(ITEMS_PER_PAGE)
    }

    fn show_filtered_page(&mut self) {
        self.state.pokemons = page_slice(
            &self.filtered_pokemons,
            self.state.current_page,
            ITEMS_PER_PAGE,
        );
    }

    fn apply_server_page(&mut self, page: PokemonPage) {
        self.state.pokemons = page.pokemons;
        self.total_results = page.count;
        self.state.error = page.error;
    }

    fn fail(&mut self, message: String) {
        self.state.error = Some(message);
        self.state.pokemons.clear();
    }
}

fn first_suggestions(results: &[PokemonSummary]) -> Vec<PokemonSummary> {
    results.iter().take(SUGGESTION_LIMIT).cloned().collect()
}
