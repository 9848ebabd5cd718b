//! Playoff Odds CLI
//!
//! teams.csv + games.csv → Monte Carlo 플레이오프 확률 리포트

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "playoff_cli")]
#[command(about = "Estimate playoff and draft odds by simulating the rest of a season", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Simulate the remaining schedule and report per-team odds
    Simulate {
        /// Teams CSV (name,conference,division,wins,losses,ties,rating,opponent_strength)
        #[arg(long)]
        teams: PathBuf,

        /// Games CSV (home,away,week,result,neutral), weeks start at 1
        #[arg(long)]
        games: PathBuf,

        /// YAML or JSON simulation config
        #[arg(long)]
        config: Option<PathBuf>,

        /// Number of trials (overrides config)
        #[arg(long)]
        trials: Option<u64>,

        /// Base seed (overrides config)
        #[arg(long)]
        seed: Option<u64>,

        /// Worker threads (overrides config)
        #[arg(long)]
        workers: Option<usize>,

        /// Report format: csv, markdown, json
        #[arg(long, default_value = "markdown")]
        format: String,

        /// Write the report here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Output run metadata JSON file (seed, fingerprint)
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Load and validate inputs without simulating
    Check {
        #[arg(long)]
        teams: PathBuf,

        #[arg(long)]
        games: PathBuf,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn load_config(path: Option<&PathBuf>) -> Result<playoff_core::SimulationConfig> {
    match path {
        Some(path) => playoff_cli::load_config(path),
        None => Ok(playoff_core::SimulationConfig::default()),
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            teams,
            games,
            config,
            trials,
            seed,
            workers,
            format,
            out,
            metadata,
        } => {
            let format: playoff_cli::ReportFormat = format.parse()?;
            let league = playoff_cli::load_league(&teams, &games)?;

            let mut config = load_config(config.as_ref())?;
            if let Some(trials) = trials {
                config = config.with_trials(trials);
            }
            if let Some(seed) = seed {
                config = config.with_seed(seed);
            }
            if let Some(workers) = workers {
                config = config.with_workers(workers);
            }

            let summary = playoff_core::simulate_season(&league, &config)?;
            let report = playoff_cli::render(&summary, format)?;

            match out {
                Some(path) => {
                    playoff_cli::write_output(&path, &report)?;
                    tracing::info!(path = %path.display(), "Report written");
                }
                None => print!("{}", report),
            }

            if let Some(path) = metadata {
                let meta = playoff_cli::RunMetadata::for_summary(&summary)?;
                playoff_cli::write_output(&path, &serde_json::to_string_pretty(&meta)?)?;
                tracing::info!(
                    path = %path.display(),
                    fingerprint = %meta.fingerprint,
                    "Metadata written"
                );
            }
        }

        Commands::Check {
            teams,
            games,
            config,
        } => {
            let league = playoff_cli::load_league(&teams, &games)?;
            let config = load_config(config.as_ref())?;
            config.validate()?;
            config.seeding.validate_for(&league)?;
            playoff_core::StrengthModel::new(config.model.clone())?;
            println!(
                "OK: {} teams, {} completed, {} scheduled",
                league.team_count(),
                league.completed_games().len(),
                league.scheduled_games().len()
            );
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("playoff_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
