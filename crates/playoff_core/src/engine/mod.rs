pub mod aggregate;
pub mod config;
pub mod monte_carlo; // 병렬 trial 실행 + 결정론적 seed 파생
pub mod seeding;
pub mod trial;
pub mod win_prob;

pub use aggregate::{SimulationSummary, Tally, TeamSummary};
pub use config::{DraftScope, ModelConfig, SeedingConfig, SimulationConfig};
pub use monte_carlo::{derive_trial_seed, CancelToken, MonteCarloDriver};
pub use seeding::{SeedingResolver, SeedingResult, TieBreaker};
pub use trial::{TrialSimulator, TrialStandings};
pub use win_prob::{FixedOdds, GameOdds, MatchupOverrides, StrengthModel, Venue, WinProbability};
