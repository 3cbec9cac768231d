//! `evolutions`: evolution chain of one Pokémon's species.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use pokedex_lib::{PokemonId, PokemonService};

use super::emit;
use crate::output::{format_evolutions, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct EvolutionsArgs {
    /// National Pokédex id.
    pub id: PokemonId,
}

#[derive(Debug, Serialize)]
struct EvolutionsOutput<'a> {
    chain_id: u32,
    species: Vec<&'a str>,
}

pub async fn handle_evolutions(
    service: &PokemonService,
    args: &EvolutionsArgs,
    format: OutputFormat,
) -> Result<()> {
    let chain = service.fetch_pokemon_evolutions(args.id).await;
    let output = EvolutionsOutput {
        chain_id: chain.id,
        species: chain.species_names(),
    };
    emit(format, &output, format_evolutions(&chain))
}
