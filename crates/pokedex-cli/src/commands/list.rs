//! `list`: browse the unfiltered catalog one server page at a time.

use anyhow::Result;
use clap::Args;

use pokedex_lib::PokemonService;

use super::{controller, emit, ensure_no_error};
use crate::output::{format_search_view, OutputFormat};

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: usize,
}

pub async fn handle_list(service: &PokemonService, args: &ListArgs, format: OutputFormat) -> Result<()> {
    let mut controller = controller(service);
    controller.change_page(args.page).await;
    ensure_no_error(&controller)?;

    let view = controller.view();
    emit(format, &view, format_search_view(&view))
}
