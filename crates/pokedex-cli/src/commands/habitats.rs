//! `habitats`: list the habitat filter values.

use anyhow::Result;
use serde::Serialize;

use pokedex_lib::HabitatName;

use super::emit;
use crate::output::{format_habitats, OutputFormat};

#[derive(Debug, Clone, Serialize)]
struct HabitatEntry {
    name: HabitatName,
    label: String,
}

pub fn handle_habitats(format: OutputFormat) -> Result<()> {
    let entries: Vec<HabitatEntry> = HabitatName::ALL
        .iter()
        .map(|habitat| HabitatEntry {
            name: *habitat,
            label: habitat.label(),
        })
        .collect();

    emit(format, &entries, format_habitats(&HabitatName::ALL))
}
