use clap::{ArgAction, Parser, Subcommand};
use commands::{clear, config, interactive, rate, search, show, watched, AppContext};

mod commands;
mod logging;
mod output;
mod progress;
mod render;
mod title;

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "usePopcorn - search movies, rate them, keep a watched list")]
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

    /// Starts an interactive session when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search movies by title
    #[command(long_about = "Search OMDb for titles containing QUERY. Queries shorter than the configured minimum (3 characters by default) are not sent.")]
    Search {
        query: String,
    },
    /// Show the details of one movie
    Show {
        /// IMDb id, e.g. tt0372784
        id: String,
    },
    /// Rate a movie and add it to the watched list
    #[command(long_about = "Fetch the movie's details and add it to the watched list with RATING (1-10). Movies already in the watched list cannot be rated again.")]
    Rate {
        /// IMDb id, e.g. tt0372784
        id: String,

        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// Inspect or edit the watched list
    Watched {
        #[command(subcommand)]
        cmd: Option<WatchedCommands>,
    },
    /// Interactive search and rating session
    #[command(long_about = "Start an interactive session. Type a title to search, then use :open, :rate and :add to rate movies. Type :help for the list of commands.")]
    Interactive,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
    /// Clear stored data
    Clear {
        /// Remove every movie from the watched list
        #[arg(long, action = ArgAction::SetTrue)]
        watched: bool,

        /// Do not ask for confirmation
        #[arg(short, long, action = ArgAction::SetTrue)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum WatchedCommands {
    /// List watched movies (default)
    List,
    /// Remove a movie from the watched list
    Remove {
        id: String,
    },
    /// Averages over the watched list
    Summary,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show {
        /// Show the API key unmasked
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },
    /// Write a default configuration file
    #[command(long_about = "Create the configuration file with default settings. Prompts for the OMDb API key when run from a terminal.")]
    Init {
        /// Overwrite an existing configuration file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
    /// Store the OMDb API key in the configuration file
    SetApiKey {
        key: String,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Interactive);

    // `config` must still run against a broken file, it is how the file gets fixed
    let (ctx, load_error) = match command {
        Commands::Config { .. } => AppContext::load_lenient(),
        _ => (AppContext::load()?, None),
    };

    logging::init_logging_with_file(cli.verbose, cli.quiet, &ctx.config.logging.level, ctx.config.logging.file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);
    if let Some(e) = load_error {
        output.warn(format!("{:#}", e));
        output.info("Using default settings");
    }

    match command {
        Commands::Search { query } => search::run_search(&ctx, &query, &output).await,
        Commands::Show { id } => show::run_show(&ctx, &id, &output).await,
        Commands::Rate { id, rating } => rate::run_rate(&ctx, &id, rating, &output).await,
        Commands::Watched { cmd } => watched::run_watched(&ctx, cmd.unwrap_or(WatchedCommands::List), &output),
        Commands::Interactive => interactive::run_interactive(&ctx, &output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(&ctx, cmd, &output)
        }
        Commands::Clear { watched, yes } => clear::run_clear(&ctx, watched, yes, &output),
    }
}
