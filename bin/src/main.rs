//! transit CLI - delivery estimates from postal-code tables.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "transit")]
#[command(about = "Delivery estimates from postal-code tables and holiday calendars", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output and logs)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate delivery days for one request
    Estimate {
        /// Engine configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Request file (JSON)
        request: PathBuf,
    },

    /// Estimate delivery days for many requests
    Batch {
        /// Engine configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Requests file, one JSON request per line
        requests: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,

        /// Output file path. Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Load every configured table and print their sizes
    Check {
        /// Engine configuration file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Query a country's holiday calendar
    Calendar {
        /// Engine configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Country id or code (e.g., 1, US, AU)
        #[arg(long)]
        country: String,

        /// Day to query (YYYY-MM-DD)
        date: String,

        /// Working-day bitmask, Sunday = 0x40 down to Saturday = 0x01
        #[arg(long, default_value = "62")]
        working_days: u8,
    },

    /// Normalize a postal code
    Postal {
        /// Country id or code (e.g., 1, US, UK)
        #[arg(long)]
        country: String,

        /// Raw postal code
        code: String,
    },
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Estimate { config, request } => commands::estimate::estimate(&config, &request),
        Commands::Batch {
            config,
            requests,
            format,
            output,
        } => commands::batch::batch(&config, &requests, format, output.as_deref(), cli.quiet),
        Commands::Check { config } => commands::check::check(&config),
        Commands::Calendar {
            config,
            country,
            date,
            working_days,
        } => commands::calendar::calendar(&config, &country, &date, working_days),
        Commands::Postal { country, code } => commands::postal::postal(&country, &code),
    }
}
