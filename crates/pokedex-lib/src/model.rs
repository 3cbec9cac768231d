//! Entity model: the records the rest of the crate passes around, plus the
//! raw upstream response shapes they are derived from.
//!
//! Identifiers are never read from a response body for list views; they are
//! parsed from the trailing numeric segment of the resource URL, and image
//! URLs are built from that id.

use serde::{Deserialize, Serialize};

/// Official-artwork CDN root used for every summary image.
pub const IMAGE_BASE_URL: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/other/official-artwork";

/// Numeric upstream identifier. `0` means "not derivable".
pub type PokemonId = u32;

/// Parse the trailing numeric path segment of a resource URL.
///
/// `".../pokemon/25/"` yields `25`; a URL without a numeric tail yields `0`.
pub fn extract_id_from_url(url: &str) -> PokemonId {
    url.split('/')
        .filter(|segment| !segment.is_empty())
        .next_back()
        .and_then(|segment| segment.parse().ok())
        .unwrap_or(0)
}

/// Image URL for a given id.
pub fn image_url(id: PokemonId) -> String {
    format!("{}/{}.png", IMAGE_BASE_URL, id)
}

/// `{name, url}` reference as returned throughout the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// Minimal record used for listing and search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PokemonSummary {
    pub id: PokemonId,
    pub name: String,
    pub image: String,
}

impl PokemonSummary {
    pub fn new(id: PokemonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image_url(id),
        }
    }

    /// Build a summary from a raw list entry.
    pub fn from_resource(resource: &NamedResource) -> Self {
        Self::new(extract_id_from_url(&resource.url), resource.name.clone())
    }

    /// Case-insensitive substring match against an already lowercased needle.
    pub fn name_contains(&self, normalized_query: &str) -> bool {
        self.name.to_lowercase().contains(normalized_query)
    }
}

/// Filter `pokemons` by case-insensitive substring on name.
pub fn filter_by_name(pokemons: &[PokemonSummary], query: &str) -> Vec<PokemonSummary> {
    let needle = query.trim().to_lowercase();
    pokemons
        .iter()
        .filter(|p| p.name_contains(&needle))
        .cloned()
        .collect()
}

/// `GET /pokemon?offset=&limit=`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PokemonListResponse {
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// One page of the catalog as handed to the controller.
///
/// Never produced from an error: a failed fetch yields an empty page with
/// `error` populated.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PokemonPage {
    pub pokemons: Vec<PokemonSummary>,
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub error: Option<String>,
}

impl PokemonPage {
    pub(crate) fn failed(message: String) -> Self {
        Self {
            error: Some(message),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Artwork {
    #[serde(default)]
    pub front_default: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    pub official_artwork: Artwork,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: OtherSprites,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonTypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatName {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: StatName,
}

/// Raw ability reference carried by [`PokemonDetails`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityRef {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u32,
}

/// `GET /pokemon/{id}`, scoped to a single detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonDetails {
    pub id: PokemonId,
    pub name: String,
    pub height: u32,
    pub weight: u32,
    #[serde(default)]
    pub sprites: Sprites,
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub abilities: Vec<AbilityRef>,
}

impl PokemonDetails {
    pub fn type_names(&self) -> Vec<&str> {
        self.types.iter().map(|t| t.kind.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EffectEntry {
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub short_effect: String,
    pub language: NamedResource,
}

/// `GET /ability/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AbilityResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub effect_entries: Vec<EffectEntry>,
}

/// Ability joined with its English effect text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub id: u32,
    pub name: String,
    pub effect: String,
    pub short_effect: String,
}

impl From<AbilityResponse> for Ability {
    fn from(response: AbilityResponse) -> Self {
        let english = response
            .effect_entries
            .into_iter()
            .find(|entry| entry.language.name == "en");
        let (effect, short_effect) = english
            .map(|entry| (entry.effect, entry.short_effect))
            .unwrap_or_default();

        Self {
            id: response.id,
            name: response.name,
            effect,
            short_effect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResource {
    pub url: String,
}

/// `GET /pokemon-species/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub id: PokemonId,
    pub name: String,
    #[serde(default)]
    pub evolution_chain: Option<ApiResource>,
}

/// One node of an evolution chain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChainLink {
    pub species: NamedResource,
    #[serde(default)]
    pub evolves_to: Vec<ChainLink>,
}

/// `GET /evolution-chain/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionChain {
    pub id: u32,
    pub chain: ChainLink,
}

impl EvolutionChain {
    /// The "no data" value: id 0 and a root species with an empty name.
    pub fn empty() -> Self {
        Self {
            id: 0,
            chain: ChainLink::default(),
        }
    }

    /// Callers treat an empty root species name as "no data".
    pub fn is_empty(&self) -> bool {
        self.chain.species.name.is_empty()
    }

    /// Species names in depth-first order, root first.
    pub fn species_names(&self) -> Vec<&str> {
        fn walk<'a>(link: &'a ChainLink, out: &mut Vec<&'a str>) {
            out.push(link.species.name.as_str());
            for next in &link.evolves_to {
                walk(next, out);
            }
        }

        if self.is_empty() {
            return Vec::new();
        }
        let mut names = Vec::new();
        walk(&self.chain, &mut names);
        names
    }
}

/// `GET /pokemon-habitat/{name}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PokemonHabitat {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub pokemon_species: Vec<NamedResource>,
}
