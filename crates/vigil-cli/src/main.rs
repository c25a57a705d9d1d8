//! Vigil CLI: identity and consent gate for authorized-use tooling.
//!
//! Verify the operator's declarations, then launch the gated tool only
//! when every check passes.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use vigil_gate::GateConfig;

/// Vigil: identity and consent gate for authorized-use tooling.
///
/// Reads `identity.txt` and `consent.txt`, reports every problem found in
/// them at once, and refuses to launch the gated command until they pass.
#[derive(Parser)]
#[command(name = "vigil", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (repeat for more detail: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output logs as JSON (for machine consumption).
    #[arg(long, global = true)]
    json_logs: bool,

    /// Gate configuration file (default: ./vigil.toml, then the user config dir).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Verify the declarations, print the summary, and exit.
    Verify(commands::verify::VerifyArgs),
    /// Verify the declarations, then run a command only if they pass.
    Run(commands::run::RunArgs),
    /// Write template declaration files to fill in.
    Init(commands::init::InitArgs),
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    let config = GateConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Verify(args) => commands::verify::execute(args, config),
        Commands::Run(args) => commands::run::execute(args, config),
        Commands::Init(args) => commands::init::execute(&args, &config),
    }
}
