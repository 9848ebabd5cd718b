//! # playoff_core - Monte Carlo Playoff Odds Engine
//!
//! Estimates, for every team in a two-conference league, the probability of
//! making the playoffs, winning its division, and landing in each draft slot,
//! given a partially played schedule.
//!
//! ## Features
//! - Pluggable win-probability model ([`WinProbability`])
//! - Deterministic seeding with a configurable tie-break chain
//! - Parallel trials that stay bit-reproducible for a given seed
//!
//! ```
//! use playoff_core::{simulate_season, Conference, Game, League, SimulationConfig, Team, Week};
//!
//! let teams = vec![
//!     Team::new("Hawks", Conference::A, "North").with_record(3, 1, 0),
//!     Team::new("Owls", Conference::A, "South").with_record(2, 2, 0),
//!     Team::new("Bears", Conference::B, "North").with_record(1, 3, 0),
//!     Team::new("Wolves", Conference::B, "South").with_record(2, 2, 0),
//! ];
//! let games = vec![Game::scheduled("Hawks", "Owls", Week::new(4))];
//! let league = League::new(teams, games).unwrap();
//!
//! let mut config = SimulationConfig::quick().with_seed(7);
//! config.seeding.wildcard_slots = 0;
//! let summary = simulate_season(&league, &config).unwrap();
//! assert_eq!(summary.team("Hawks").unwrap().playoff_pct, 100.0);
//! ```

pub mod engine;
pub mod error;
pub mod models;

pub use engine::{
    derive_trial_seed, CancelToken, DraftScope, FixedOdds, GameOdds, MatchupOverrides,
    ModelConfig, MonteCarloDriver, SeedingConfig, SeedingResolver, SeedingResult,
    SimulationConfig, SimulationSummary, StrengthModel, TeamSummary, TieBreaker, Venue,
    WinProbability,
};
pub use error::{ConfigError, Result, SimError};
pub use models::{Conference, Game, GameStatus, League, Outcome, Record, Team, TeamId, Week};

/// Runs a full simulation with the built-in [`StrengthModel`].
pub fn simulate_season(league: &League, config: &SimulationConfig) -> Result<SimulationSummary> {
    let model = StrengthModel::new(config.model.clone())?;
    MonteCarloDriver::new(league, &model, config)?.run()
}
