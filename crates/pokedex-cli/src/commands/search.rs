//! `search`: name search, optionally scoped to a habitat.

use anyhow::Result;
use clap::Args;

use pokedex_lib::{HabitatName, PokemonService};

use super::{controller, emit, ensure_no_error};
use crate::output::{format_search_view, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Case-insensitive name fragment. Empty lists everything.
    #[arg(default_value = "")]
    pub query: String,

    /// Restrict results to one habitat (e.g. `forest`, `waters-edge`).
    #[arg(long)]
    pub habitat: Option<HabitatName>,

    /// 1-based page of the result set.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

pub async fn handle_search(
    service: &PokemonService,
    args: &SearchArgs,
    format: OutputFormat,
) -> Result<()> {
    let mut controller = controller(service);

    if let Some(habitat) = args.habitat {
        controller.select_habitat(Some(habitat)).await;
        ensure_no_error(&controller)?;
    }

    controller.submit_search(args.query.trim()).await;
    ensure_no_error(&controller)?;

    if args.page > 1 {
        controller.change_page(args.page).await;
        ensure_no_error(&controller)?;
    }

    let view = controller.view();
    emit(format, &view, format_search_view(&view))
}
