//! Subcommand handlers.
//!
//! Each module owns one subcommand: its clap arguments and an async
//! handler that drives [`pokedex_lib::PokemonService`] or a
//! [`pokedex_lib::SearchController`] and prints the result.

pub mod abilities;
pub mod details;
pub mod evolutions;
pub mod habitats;
pub mod list;
pub mod search;
pub mod suggest;

use anyhow::{bail, Result};
use serde::Serialize;

use pokedex_lib::{HistoryNavigator, PokemonService, SearchController, UrlState};

use crate::output::{to_json, OutputFormat};

/// Print `text` or the JSON form of `value`, depending on `format`.
pub(crate) fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, text: String) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", to_json(value)?),
        OutputFormat::Text => print!("{text}"),
    }
    Ok(())
}

pub(crate) fn controller(service: &PokemonService) -> SearchController {
    SearchController::new(service.clone(), HistoryNavigator::new(), UrlState::default())
}

/// Turn an error message left on the controller state into a failure.
pub(crate) fn ensure_no_error(controller: &SearchController) -> Result<()> {
    if let Some(message) = controller.state().error.as_deref() {
        bail!("{message}");
    }
    Ok(())
}
