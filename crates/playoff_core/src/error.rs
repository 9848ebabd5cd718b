use thiserror::Error;

use crate::models::Conference;

/// Problems detected while validating inputs, before any trial runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("game #{game} (week {week}) references unknown team '{team}'")]
    UnknownTeam {
        game: usize,
        week: u16,
        team: String,
    },

    #[error("game #{game} (week {week}) has '{team}' playing itself")]
    SelfMatch { game: usize, week: u16, team: String },

    #[error("duplicate team name '{0}'")]
    DuplicateTeam(String),

    #[error("team '{team}' has an empty division name")]
    EmptyDivision { team: String },

    #[error("trial count must be positive, got {0}")]
    InvalidTrialCount(u64),

    #[error("worker count must be positive when set, got 0")]
    InvalidWorkerCount,

    #[error(
        "conference {conference}: {teams} teams cannot fill a playoff field of {divisions} division winners + {wildcard_slots} wildcards"
    )]
    PlayoffFieldMismatch {
        conference: Conference,
        teams: usize,
        divisions: usize,
        wildcard_slots: usize,
    },

    #[error("conference {0} has no teams")]
    EmptyConference(Conference),

    #[error("tie-break chain is empty")]
    EmptyTieBreakChain,

    #[error("invalid model parameter {name}: {value}")]
    InvalidModelParameter { name: &'static str, value: f64 },

    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("matchup override {home} vs {away} is not a probability: {probability}")]
    InvalidOverride {
        home: String,
        away: String,
        probability: f64,
    },
}

/// Run-time failures. Every variant aborts the whole run; no partial summary survives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("trial {trial}, conference {conference}: {detail}")]
    InvariantViolation {
        trial: u64,
        conference: Conference,
        detail: String,
    },

    #[error(
        "game #{game}: model returned invalid odds for {home} vs {away} (home {home_win}, away {away_win}, tie {tie})"
    )]
    InvalidOdds {
        game: usize,
        home: String,
        away: String,
        home_win: f64,
        away_win: f64,
        tie: f64,
    },

    #[error("run cancelled after dispatch stopped")]
    Cancelled,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl SimError {
    /// Whether the error is a logic defect in seeding (as opposed to bad input).
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, SimError::InvariantViolation { .. })
    }
}

impl From<rayon::ThreadPoolBuildError> for SimError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        SimError::ThreadPool(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
