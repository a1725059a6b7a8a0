//! Records Replay CLI
//!
//! Replays a directory of command files against an empty collection and
//! prints the result of every command.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use school_records::{ConsoleSink, DeletePolicy, DirectorySource, Replay, ReplayConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "records-replay")]
#[command(about = "Replay create/read/update/delete command files")]
struct Cli {
    /// Config file (layered over records.toml and RECORDS__* variables)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay every command file in the sequence directory
    Run {
        /// Sequence directory (overrides source.dir)
        #[arg(short, long)]
        sequence: Option<PathBuf>,

        /// Do not print the collection after each command
        #[arg(long)]
        no_snapshot: bool,

        /// Treat delete of an absent ID as a no-op
        #[arg(long)]
        ignore_missing_delete: bool,
    },

    /// Inspect or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write the default configuration
    Init {
        /// Output file
        #[arg(short, long, default_value = "records.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ReplayConfig> {
    let path = path.map(|p| p.to_string_lossy().into_owned());
    ReplayConfig::load_from(path.as_deref()).context("failed to load configuration")
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Run {
            sequence,
            no_snapshot,
            ignore_missing_delete,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(dir) = sequence {
                config.source.dir = dir;
            }
            if no_snapshot {
                config.report.snapshot = false;
            }
            if ignore_missing_delete {
                config.policy.missing_delete = DeletePolicy::Ignore;
            }

            let dir = config.sequence_dir();
            let source = DirectorySource::open(dir, config.source.order, config.source.recursive)
                .with_context(|| format!("cannot read sequence directory {}", dir.display()))?;

            let mut replay = Replay::from_config(&config);
            let mut sink = ConsoleSink::stdout(config.report.snapshot);
            replay.run(source, &mut sink)?;
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let config = load_config(cli.config.as_ref())?;
                print!("{}", config.to_toml()?);
                Ok(())
            }
            ConfigAction::Init { output, force } => {
                if output.exists() && !force {
                    bail!("{} already exists (use --force to overwrite)", output.display());
                }
                ReplayConfig::default().save(&output.to_string_lossy())?;
                println!("Wrote {}", output.display());
                Ok(())
            }
        },
    }
}
