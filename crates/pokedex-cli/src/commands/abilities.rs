//! `abilities`: abilities of one Pokémon with their English effect text.

use anyhow::Result;
use clap::Args;

use pokedex_lib::{PokemonId, PokemonService};

use super::emit;
use crate::output::{format_abilities, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct AbilitiesArgs {
    /// National Pokédex id.
    pub id: PokemonId,
}

/// Lookup failures print the neutral "no information" message.
pub async fn handle_abilities(
    service: &PokemonService,
    args: &AbilitiesArgs,
    format: OutputFormat,
) -> Result<()> {
    let abilities = service.fetch_pokemon_abilities(args.id).await;
    emit(format, &abilities, format_abilities(&abilities))
}
