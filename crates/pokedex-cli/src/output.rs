//! Output formatting for command results.
//!
//! Every formatter returns a `String` so command handlers decide where it
//! goes and tests can assert on the rendered text.

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use pokedex_lib::{Ability, EvolutionChain, HabitatName, PageItem, PokemonDetails, PokemonSummary, SearchView};

/// Message printed when a Pokémon has no resolvable abilities.
pub const NO_ABILITIES: &str = "No ability information available";
/// Message printed when a Pokémon has no evolution chain.
pub const NO_EVOLUTIONS: &str = "No evolution data available";

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminals.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Serialize `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// One line per summary: `#id name`.
pub fn format_summaries(pokemons: &[PokemonSummary]) -> String {
    let mut out = String::new();
    for pokemon in pokemons {
        let _ = writeln!(out, "#{:<5} {}", pokemon.id, pokemon.name);
    }
    out
}

/// Page window such as `1 ... 8 9 [10] 11 12 ... 56`.
pub fn format_page_window(items: &[PageItem], current: usize) -> String {
    items
        .iter()
        .map(|item| match item {
            PageItem::Page(page) if *page == current => format!("[{page}]"),
            PageItem::Page(page) => page.to_string(),
            PageItem::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result list view: summary line, visible page and the page window.
pub fn format_search_view(view: &SearchView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.summary);
    if let Some(habitat) = view.state.selected_habitat {
        let _ = writeln!(out, "Habitat: {}", habitat.label());
    }
    out.push_str(&format_summaries(&view.state.pokemons));

    if view.total_pages > 1 {
        let _ = writeln!(
            out,
            "Page {} of {}: {}",
            view.state.current_page,
            view.total_pages,
            format_page_window(&view.page_items, view.state.current_page)
        );
    }
    out
}

pub fn format_suggestions(suggestions: &[PokemonSummary]) -> String {
    if suggestions.is_empty() {
        return "No suggestions\n".to_string();
    }
    format_summaries(suggestions)
}

/// `name  label` per habitat.
pub fn format_habitats(habitats: &[HabitatName]) -> String {
    let mut out = String::new();
    for habitat in habitats {
        let _ = writeln!(out, "{:<14} {}", habitat.as_str(), habitat.label());
    }
    out
}

pub fn format_details(details: &PokemonDetails) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", details.id, details.name);
    let _ = writeln!(out, "Height: {}", details.height);
    let _ = writeln!(out, "Weight: {}", details.weight);
    let _ = writeln!(out, "Types: {}", details.type_names().join(", "));

    if !details.stats.is_empty() {
        let _ = writeln!(out, "Stats:");
        for stat in &details.stats {
            let _ = writeln!(out, "  {:<16} {:>3}", stat.stat.name, stat.base_stat);
        }
    }

    if let Some(artwork) = details.sprites.other.official_artwork.front_default.as_deref() {
        let _ = writeln!(out, "Artwork: {artwork}");
    }
    out
}

pub fn format_abilities(abilities: &[Ability]) -> String {
    if abilities.is_empty() {
        return format!("{NO_ABILITIES}\n");
    }

    let mut out = String::new();
    for ability in abilities {
        let _ = writeln!(out, "{}", ability.name);
        if !ability.short_effect.is_empty() {
            let _ = writeln!(out, "  {}", ability.short_effect);
        }
    }
    out
}

/// Depth-first species list joined by arrows.
pub fn format_evolutions(chain: &EvolutionChain) -> String {
    if chain.is_empty() {
        return format!("{NO_EVOLUTIONS}\n");
    }
    format!("{}\n", chain.species_names().join(" -> "))
}
