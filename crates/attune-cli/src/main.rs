use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use attune::config::Config;
use attune_cli::commands::{FixturesCommand, ReplayCommand, StatsCommand, WipeCommand};
use attune_cli::error::CliResult;
use attune_cli::output::OutputFormat;

#[derive(Parser)]
#[command(name = "attune")]
#[command(about = "Attune - learning engine for code-exploration behavior")]
#[command(version)]
pub struct Cli {
    #[clap(long, short, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[clap(long, short = 'c', global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Replay an observation event stream into the learner")]
    Replay(ReplayCommand),

    #[clap(about = "Generate fixture event streams and state snapshots")]
    Fixtures(FixturesCommand),

    #[clap(about = "Show learner statistics")]
    Stats(StatsCommand),

    #[clap(about = "Reset the learner state")]
    Wipe(WipeCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> CliResult<()> {
    init_logging();

    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Table
    };

    let config = Config::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Replay(cmd) => cmd.execute(&config, format),
        Command::Fixtures(cmd) => cmd.execute(&config, format),
        Command::Stats(cmd) => cmd.execute(&config, format),
        Command::Wipe(cmd) => cmd.execute(&config, format),
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,attune=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
