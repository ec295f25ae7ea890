use clap::{Parser, Subcommand};
use kurse::core::log::init_logging;
use kurse::providers::SourceMode;
use kurse::{AppCommand, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the portfolio file
    #[arg(short, long, global = true)]
    portfolio: Option<PathBuf>,

    /// Use the built-in sample quotes and rates instead of the remote providers
    #[arg(long, global = true)]
    offline: bool,

    /// Always fetch fresh data, bypassing the disk cache
    #[arg(long, global = true)]
    no_cache: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an example portfolio file
    Setup,
    /// Display the portfolio valuation (default)
    Summary,
    /// Display the details of one holding
    Show {
        /// Symbol of the holding
        symbol: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let options = RunOptions {
        portfolio_path: cli.portfolio,
        mode: if cli.offline {
            SourceMode::Fixture
        } else {
            SourceMode::Remote
        },
        use_cache: !cli.no_cache,
    };

    let result = match cli.command {
        Some(Commands::Setup) => kurse::cli::setup::setup(),
        Some(Commands::Show { symbol }) => {
            kurse::run_command(AppCommand::Show(symbol), &options).await
        }
        Some(Commands::Summary) | None => kurse::run_command(AppCommand::Summary, &options).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = ?e, "Application failed");
            eprintln!("kurse: {e:#}");
            ExitCode::FAILURE
        }
    }
}
