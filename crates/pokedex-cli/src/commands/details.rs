//! `details`: full record for one Pokémon.

use anyhow::{Context, Result};
use clap::Args;

use pokedex_lib::{PokemonId, PokemonService};

use super::emit;
use crate::output::{format_details, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct DetailsArgs {
    /// National Pokédex id.
    pub id: PokemonId,
}

pub async fn handle_details(
    service: &PokemonService,
    args: &DetailsArgs,
    format: OutputFormat,
) -> Result<()> {
    let details = service
        .fetch_pokemon_details(args.id)
        .await
        .with_context(|| format!("failed to fetch details for Pokémon {}", args.id))?;

    emit(format, &details, format_details(&details))
}
