use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pokedex_cli::commands::abilities::{handle_abilities, AbilitiesArgs};
use pokedex_cli::commands::details::{handle_details, DetailsArgs};
use pokedex_cli::commands::evolutions::{handle_evolutions, EvolutionsArgs};
use pokedex_cli::commands::habitats::handle_habitats;
use pokedex_cli::commands::list::{handle_list, ListArgs};
use pokedex_cli::commands::search::{handle_search, SearchArgs};
use pokedex_cli::commands::suggest::{handle_suggest, SuggestArgs};
use pokedex_cli::logging::{init_tracing, LogFormat};
use pokedex_cli::output::OutputFormat;
use pokedex_lib::config::{BASE_URL_ENV, DEFAULT_BASE_URL};
use pokedex_lib::{PokemonService, ServiceConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse, search and filter the Pokédex")]
struct Cli {
    /// Root of the upstream REST API.
    #[arg(long, global = true, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Result output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log output format (logs are written to stderr).
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog one page at a time.
    List(ListArgs),
    /// Search by name, optionally within a habitat.
    Search(SearchArgs),
    /// Autocomplete suggestions for partially typed text.
    Suggest(SuggestArgs),
    /// List the habitats available as filters.
    Habitats,
    /// Show the full record for one Pokémon.
    Details(DetailsArgs),
    /// Show the abilities of one Pokémon.
    Abilities(AbilitiesArgs),
    /// Show the evolution chain of one Pokémon.
    Evolutions(EvolutionsArgs),
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = ServiceConfig::default().with_base_url(cli.base_url.clone());
    let service = PokemonService::from_config(config)
        .with_context(|| format!("failed to initialise client for {}", cli.base_url))?;

    match &cli.command {
        Command::List(args) => handle_list(&service, args, cli.format).await,
        Command::Search(args) => handle_search(&service, args, cli.format).await,
        Command::Suggest(args) => handle_suggest(&service, args, cli.format).await,
        Command::Habitats => handle_habitats(cli.format),
        Command::Details(args) => handle_details(&service, args, cli.format).await,
        Command::Abilities(args) => handle_abilities(&service, args, cli.format).await,
        Command::Evolutions(args) => handle_evolutions(&service, args, cli.format).await,
    }
}
