use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, clear, config, lookup, watched};
use logging::LogTarget;
use popcorn_config::PathManager;

mod commands;
mod logging;
mod output;
mod view;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "usePopcorn - search movies, rate them, and keep a list of what you've watched")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search, details, rating and watched list (default)
    #[command(long_about = "Start the interactive browser: search the catalog, open a result, rate it and add it to your watched list. Press Esc in the movie view to close it.")]
    Browse,

    /// Search the catalog by title
    Search {
        /// Title text (at least 3 characters)
        query: String,
    },

    /// Show details for one catalog id
    Show {
        /// Catalog id, e.g. tt0468569
        id: String,
    },

    /// Rate a movie and add it to your watched list
    Add {
        /// Catalog id, e.g. tt0468569
        id: String,

        /// Your rating (1 to the configured maximum, 10 by default)
        #[arg(short, long)]
        rating: u8,
    },

    /// Remove a movie from your watched list
    Remove {
        /// Catalog id of the watched entry
        id: String,
    },

    /// Show your watched list and its averages
    Watched,

    /// View or change settings
    #[command(long_about = "Manage popcorn configuration. The catalog API key can also be supplied through the POPCORN_API_KEY environment variable.")]
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },

    /// Delete stored data
    Clear {
        /// Clear the watched list and logs
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watched: bool,

        /// Clear log files
        #[arg(long, action = ArgAction::SetTrue)]
        logs: bool,

        /// Don't ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure the movie catalog (prompts when no flags are given)
    Catalog {
        /// OMDb API key
        #[arg(long)]
        api_key: Option<String>,

        /// Catalog endpoint URL
        #[arg(long)]
        base_url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Configure the rating scale
    Rating {
        /// Number of rating steps
        #[arg(long)]
        max: u8,
    },

    /// Configure the interface
    Ui {
        /// Terminal title when no movie is open
        #[arg(long)]
        title: Option<String>,

        /// Shortest query that is sent to the catalog
        #[arg(long)]
        min_query_len: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let paths = PathManager::default();
    paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create popcorn directories: {}", e))?;
    let command = cli.command.unwrap_or(Commands::Browse);

    // The interactive browser owns the screen, so its logs go to a file
    let session_log = paths.session_log_file();
    let target = match command {
        Commands::Browse => LogTarget::File(&session_log),
        _ => LogTarget::Stderr,
    };
    logging::init_logging(cli.verbose, cli.quiet, target).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match command {
        Commands::Browse => browse::run_browse(&paths, &output).await,
        Commands::Search { query } => lookup::run_search(&query, &paths, &output).await,
        Commands::Show { id } => lookup::run_show(&id, &paths, &output).await,
        Commands::Add { id, rating } => lookup::run_add(&id, rating, &paths, &output).await,
        Commands::Remove { id } => watched::run_remove(&id, &paths, &output),
        Commands::Watched => watched::run_watched(&paths, &output),
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &paths, &output)
        }
        Commands::Clear { all, watched, logs, yes } => clear::run_clear(all, watched, logs, yes, &paths, &output),
    }
}
