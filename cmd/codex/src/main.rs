//! CODEX CLI - offline tools around the analysis dispatch layer.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{ConfigCommand, HashCommand, RelabelCommand};

/// CODEX CLI - offline tools around the analysis dispatch layer.
///
/// Relabel a clustering against a previous one, compute the cache identity
/// of an array, or inspect the effective configuration.
///
/// Configuration is read from ~/.codex/config.yaml unless --config is given.
#[derive(Parser)]
#[command(name = "codex")]
#[command(about = "CODEX analysis tools")]
#[command(version)]
pub struct Cli {
    /// Config file (default is ~/.codex/config.yaml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long, global = true)]
    pub output: Option<String>,

    /// Output as JSON instead of YAML
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align cluster ids with a reference labeling
    Relabel(RelabelCommand),
    /// Print the cache identity of an array
    Hash(HashCommand),
    /// Show the effective configuration
    Config(ConfigCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins unless --verbose is given.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Relabel(cmd) => cmd.run(&cli),
        Commands::Hash(cmd) => cmd.run(&cli),
        Commands::Config(cmd) => cmd.run(&cli),
    }
}
