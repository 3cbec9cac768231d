//! End-to-end tests of the data service and controller over real HTTP.

mod common;

use common::{generated_names, species_entry, MockBuilder};
use pokedex_lib::{
    HabitatName, HistoryNavigator, PokemonService, SearchController, UrlState,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn forest_habitat(base_url: &str) -> Value {
    json!({
        "id": 2,
        "name": "forest",
        "pokemon_species": [
            species_entry(base_url, 10, "caterpie"),
            species_entry(base_url, 25, "pikachu"),
            species_entry(base_url, 172, "pichu"),
        ]
    })
}

#[tokio::test]
async fn catalog_walk_follows_absolute_next_links() {
    let names = generated_names(250);
    let mock = MockBuilder::new().catalog(&names).start().await;
    let service = PokemonService::from_config(mock.config()).expect("service builds");

    let all = service.fetch_all_pokemon().await.expect("walk succeeds");

    assert_eq!(all.len(), 250);
    assert_eq!(all[0].id, 1);
    assert_eq!(all[249].name, "mon-0250");
    assert_eq!(
        mock.endpoints(),
        vec![
            "/pokemon?limit=100",
            "/pokemon?offset=100&limit=100",
            "/pokemon?offset=200&limit=100",
        ]
    );
    assert!(!service.cache().is_fetch_in_progress());
}

#[tokio::test]
async fn concurrent_catalog_requests_share_one_walk() {
    let names = generated_names(250);
    let mock = MockBuilder::new().catalog(&names).start().await;
    let service = PokemonService::from_config(mock.config()).expect("service builds");
    let other = service.clone();

    let (first, second) = tokio::join!(service.fetch_all_pokemon(), other.fetch_all_pokemon());

    assert_eq!(first.expect("first caller").len(), 250);
    assert_eq!(second.expect("second caller").len(), 250);
    assert_eq!(mock.count("/pokemon"), 3);
}

#[tokio::test]
async fn populated_cache_serves_search_without_network() {
    let names = generated_names(600);
    let mock = MockBuilder::new().catalog(&names).start().await;
    let service = PokemonService::from_config(mock.config()).expect("service builds");

    service.fetch_all_pokemon().await.expect("warm up");
    let walked = mock.hits().len();

    let hits = service.search_pokemon("MON-05").await.expect("search");

    assert_eq!(hits.len(), 100);
    assert_eq!(hits[0].name, "mon-0500");
    assert_eq!(mock.hits().len(), walked);
}

#[tokio::test]
async fn page_fetch_reports_error_inline() {
    let mock = MockBuilder::new()
        .status("/pokemon?offset=0&limit=20", 500)
        .start()
        .await;
    let service = PokemonService::from_config(mock.config()).expect("service builds");

    let page = service.fetch_page(0, 20).await;

    assert!(page.pokemons.is_empty());
    assert_eq!(page.count, 0);
    let message = page.error.expect("error message");
    assert!(message.starts_with("HTTP error! Status: 500"), "{message}");
}

#[tokio::test]
async fn evolutions_resolve_through_species() {
    let base = "http://unused";
    let mock = MockBuilder::new()
        .json(
            "/pokemon-species/25",
            json!({
                "id": 25,
                "name": "pikachu",
                "evolution_chain": { "url": format!("{base}/evolution-chain/10/") }
            }),
        )
        .json(
            "/evolution-chain/10",
            json!({
                "id": 10,
                "chain": {
                    "species": species_entry(base, 172, "pichu"),
                    "evolves_to": [{
                        "species": species_entry(base, 25, "pikachu"),
                        "evolves_to": [{
                            "species": species_entry(base, 26, "raichu"),
                            "evolves_to": []
                        }]
                    }]
                }
            }),
        )
        .start()
        .await;
    let service = PokemonService::from_config(mock.config()).expect("service builds");

    let chain = service.fetch_pokemon_evolutions(25).await;

    assert_eq!(chain.id, 10);
    assert_eq!(chain.species_names(), vec!["pichu", "pikachu", "raichu"]);
}

#[tokio::test]
async fn missing_species_yields_empty_chain() {
    let mock = MockBuilder::new().start().await;
    let service = PokemonService::from_config(mock.config()).expect("service builds");

    let chain = service.fetch_pokemon_evolutions(99999).await;

    assert!(chain.is_empty());
    assert_eq!(chain.id, 0);
    assert_eq!(mock.endpoints(), vec!["/pokemon-species/99999"]);
}

#[tokio::test]
async fn controller_habitat_flow_over_http() {
    let names = generated_names(45);
    let mock = MockBuilder::new()
        .catalog(&names)
        .json("/pokemon-habitat/forest", forest_habitat("http://unused"))
        .start()
        .await;
    let service = PokemonService::from_config(mock.config()).expect("service builds");
    let mut controller = SearchController::new(service, HistoryNavigator::new(), UrlState::default());

    controller.select_habitat(Some(HabitatName::Forest)).await;
    let after_habitat = mock.hits().len();
    controller.submit_search("chu").await;

    let shown: Vec<_> = controller
        .state()
        .pokemons
        .iter()
        .map(|p| (p.id, p.name.clone()))
        .collect();
    assert_eq!(
        shown,
        vec![(25, "pikachu".to_string()), (172, "pichu".to_string())]
    );
    assert_eq!(mock.hits().len(), after_habitat);

    controller.select_habitat(None).await;

    assert_eq!(controller.state().selected_habitat, None);
    assert_eq!(controller.state().pokemons.len(), 20);
    assert_eq!(controller.total_results(), 45);
    assert_eq!(controller.total_pages(), 3);
    assert_eq!(
        mock.endpoints().last().map(String::as_str),
        Some("/pokemon?offset=0&limit=20")
    );
}
