//! `suggest`: autocomplete candidates for partially typed text.

use anyhow::Result;
use clap::Args;

use pokedex_lib::{HabitatName, PokemonService};

use super::{controller, emit, ensure_no_error};
use crate::output::{format_suggestions, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// Text typed so far.
    pub text: String,

    /// Suggest only from this habitat's members.
    #[arg(long)]
    pub habitat: Option<HabitatName>,
}

pub async fn handle_suggest(
    service: &PokemonService,
    args: &SuggestArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut controller = controller(service);

    match args.habitat {
        Some(habitat) => {
            controller.select_habitat(Some(habitat)).await;
            ensure_no_error(&controller)?;
        }
        None => controller.preload_catalog().await,
    }

    controller.update_suggestions(&args.text);
    let suggestions = &controller.state().suggestions;
    emit(format, suggestions, format_suggestions(suggestions))
}
