use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, config, listing, movie, watchlist};

mod commands;
mod logging;
mod output;
mod render;

#[derive(Parser)]
#[command(name = "filmhorizon")]
#[command(about = "FilmHorizon - Browse popular movies, search the catalog and keep a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List popular movies
    #[command(long_about = "Fetch one page of the popular movies listing. Without --page the last page you visited is used, and the page you pick is remembered for next time.")]
    Popular {
        /// Page to show (1-based)
        #[arg(long)]
        page: Option<u32>,
    },
    /// Search the catalog by title
    Search {
        /// Title text to search for
        query: String,

        /// Page of results to show (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show details and cast for one movie
    Movie {
        /// Catalog movie id
        id: u64,

        /// Add the movie to the watchlist, or remove it if already there
        #[arg(long, action = ArgAction::SetTrue)]
        toggle: bool,
    },
    /// Show or edit the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: Option<WatchlistCommands>,
    },
    /// Interactive browser: type to search, use :commands to navigate
    #[command(long_about = "Start an interactive session. Plain text sets the search query (debounced like typing in a search box); lines starting with ':' navigate pages, open movies and edit the watchlist. Type :help for the full list.")]
    Browse,
    /// Manage configuration and the catalog API key
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List saved movies
    List,
    /// Remove a movie from the watchlist
    Remove {
        /// Catalog movie id
        id: u64,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default config file and store the catalog API key
    Init {
        /// Catalog API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = commands::configured_log_file(matches!(cli.command, Commands::Browse));
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Popular { page } => listing::run_popular(page, &output).await,
        Commands::Search { query, page } => listing::run_search(query, page, &output).await,
        Commands::Movie { id, toggle } => movie::run_movie(id, toggle, &output).await,
        Commands::Watchlist { cmd } => {
            let cmd = cmd.unwrap_or(WatchlistCommands::List);
            watchlist::run_watchlist(cmd, &output).await
        }
        Commands::Browse => browse::run_browse(&output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
