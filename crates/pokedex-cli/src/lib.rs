//! Pokédex CLI library.
//!
//! Subcommand handlers, output formatting and tracing setup for the
//! `pokedex` binary.

pub mod commands;
pub mod logging;
pub mod output;
