use clap::Parser;
use genesis_cli::commands::{Cmd, Command};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Genesis CLI
///
/// Reorders the genesis metadata into a publicly verifiable token order derived from a
/// block hash, and writes the plan, the intermediate orderings and the final metadata.
#[derive(Parser)]
#[command(name = "genesis")]
#[command(about = "Genesis: block-hash seeded token reorder")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

/// Runs the Genesis CLI with the provided arguments.
fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_ansi(false)
        .without_time()
        .init();

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            e.exit_code()
        }
    }
}
