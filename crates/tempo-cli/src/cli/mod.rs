//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use tempo_core::config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tempo")]
#[command(version)]
#[command(about = "Terminal stopwatch and world clock")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start the stopwatch in verbose mode (prints the lap table on quit)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Run the interactive stopwatch (the default when no command is given)
    Stopwatch {
        /// Print the full lap table on quit
        #[arg(short, long)]
        verbose: bool,
    },

    /// Display city times and time zones
    Clock {
        /// Display every known city, west to east
        #[arg(short = 'a', long = "all")]
        all: bool,

        /// City ids to display (overrides the configured list)
        #[arg(short = 'c', long = "cities", value_name = "ID", num_args = 1..)]
        cities: Option<Vec<u32>>,

        /// The id of your home city (first displayed)
        #[arg(long, value_name = "ID")]
        home_city: Option<u32>,

        /// Minimum width of the city column
        #[arg(short = 'w', long, value_name = "COLS")]
        column_width: Option<u16>,

        /// Add country, state, coordinate, and id columns
        #[arg(short, long)]
        verbose: bool,
    },

    /// Search for cities by name
    Search {
        /// City name or partial name to look for
        #[arg(value_name = "QUERY")]
        query: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Set the default home city
    SetHome {
        /// City id to set as home city
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Add a city id to the default display list
    AddCity {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Remove a city id from the default display list
    RemoveCity {
        #[arg(value_name = "ID")]
        id: u32,
    },
    /// Delete the configuration file
    Reset,
    /// Show the effective configuration
    Show,
    /// Show the path to the config file
    Path,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let stopwatch_mode = matches!(&cli.command, None | Some(Commands::Stopwatch { .. }));
    // Keep the non-blocking writer alive for the whole run.
    let _log_guard = init_tracing(stopwatch_mode);

    let config = config::Config::load().context("load config")?;
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        None => commands::stopwatch::run(cli.verbose),
        Some(Commands::Stopwatch { verbose }) => commands::stopwatch::run(verbose || cli.verbose),
        Some(Commands::Clock {
            all,
            cities,
            home_city,
            column_width,
            verbose,
        }) => commands::clock::run(
            &commands::clock::ClockOptions {
                all,
                cities,
                home_city,
                column_width,
                verbose,
            },
            &config,
        ),
        Some(Commands::Search { query }) => commands::search::run(&query),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::SetHome { id } => commands::config::set_home(id),
            ConfigCommands::AddCity { id } => commands::config::add_city(id),
            ConfigCommands::RemoveCity { id } => commands::config::remove_city(id),
            ConfigCommands::Reset => commands::config::reset(),
            ConfigCommands::Show => commands::config::show(),
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
        },
    }
}

/// Initializes tracing.
///
/// The stopwatch owns the terminal, so its diagnostics go to a file under
/// ${TEMPO_HOME}/logs; line-oriented commands log to stderr. Uses try_init
/// to avoid a panic if a subscriber is already installed (e.g. in tests).
fn init_tracing(to_file: bool) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if to_file {
        let logs_dir = config::paths::logs_dir();
        if std::fs::create_dir_all(&logs_dir).is_err() {
            return None;
        }
        let appender = tracing_appender::rolling::never(logs_dir, "stopwatch.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .try_init();
        Some(guard)
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        None
    }
}
