//! Win-probability model
//!
//! Turns two team states into the odds of a single game. The trait is the
//! seam tests substitute; [`StrengthModel`] is the production model.
//!
//! The home edge and the schedule adjustment are added to the strength
//! *differential* before it goes through the logistic curve, so the output
//! stays strictly increasing in strength no matter the venue.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::{ModelConfig, StrengthBasis};
use crate::error::ConfigError;
use crate::models::Team;

const SUM_TOLERANCE: f64 = 1e-9;

/// Where the first team plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    Home,
    Away,
    Neutral,
}

impl Venue {
    fn sign(self) -> f64 {
        match self {
            Venue::Home => 1.0,
            Venue::Away => -1.0,
            Venue::Neutral => 0.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
            Venue::Neutral => Venue::Neutral,
        }
    }
}

/// Outcome probabilities from the first team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOdds {
    pub win: f64,
    pub loss: f64,
    pub tie: f64,
}

impl GameOdds {
    pub fn reversed(self) -> Self {
        Self {
            win: self.loss,
            loss: self.win,
            tie: self.tie,
        }
    }

    /// Each component in [0, 1] and the three summing to 1.
    pub fn is_valid(&self) -> bool {
        let parts = [self.win, self.loss, self.tie];
        parts.iter().all(|p| p.is_finite() && (0.0..=1.0).contains(p))
            && (parts.iter().sum::<f64>() - 1.0).abs() < SUM_TOLERANCE
    }
}

pub trait WinProbability: Send + Sync {
    /// Odds that `team` beats `opponent`, playing at `venue`.
    fn odds(&self, team: &Team, opponent: &Team, venue: Venue) -> GameOdds;

    fn win_probability(&self, team: &Team, opponent: &Team, venue: Venue) -> f64 {
        self.odds(team, opponent, venue).win
    }
}

/// Logistic model over a strength differential.
#[derive(Debug, Clone, PartialEq)]
pub struct StrengthModel {
    config: ModelConfig,
}

impl StrengthModel {
    pub fn new(config: ModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Team strength in basis units (rating points or logits), schedule-adjusted.
    pub fn strength(&self, team: &Team) -> f64 {
        let base = match self.config.basis {
            StrengthBasis::Rating { .. } => team.rating,
            StrengthBasis::WinPct { prior_games } => {
                let record = team.record;
                let games = record.games() as f64 + prior_games;
                let pct = if games > 0.0 {
                    (record.wins as f64 + 0.5 * record.ties as f64 + 0.5 * prior_games) / games
                } else {
                    0.5
                };
                logit(pct.clamp(0.01, 0.99))
            }
        };
        base + self.config.sos_weight * (team.opponent_strength - 0.5)
    }

    /// Converts a differential in basis units into logits.
    fn to_logit(&self, diff: f64) -> f64 {
        match self.config.basis {
            StrengthBasis::Rating { scale } => diff * std::f64::consts::LN_10 / scale,
            StrengthBasis::WinPct { .. } => diff,
        }
    }

    /// Probability the first team wins given a decision, before ties are carved out.
    pub fn decisive_probability(&self, team: &Team, opponent: &Team, venue: Venue) -> f64 {
        let diff = self.strength(team) - self.strength(opponent)
            + venue.sign() * self.config.home_field.effective_bonus();
        logistic(self.to_logit(diff))
    }
}

impl WinProbability for StrengthModel {
    fn odds(&self, team: &Team, opponent: &Team, venue: Venue) -> GameOdds {
        let p = self.decisive_probability(team, opponent, venue);
        let decided = 1.0 - self.config.tie_rate;
        GameOdds {
            win: decided * p,
            loss: decided * (1.0 - p),
            tie: self.config.tie_rate,
        }
    }
}

/// Same odds for every game, regardless of teams or venue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedOdds {
    odds: GameOdds,
}

impl FixedOdds {
    pub fn new(win: f64, tie: f64) -> Result<Self, ConfigError> {
        let odds = GameOdds {
            win,
            loss: 1.0 - win - tie,
            tie,
        };
        if !odds.is_valid() {
            return Err(ConfigError::InvalidModelParameter {
                name: "fixed_odds.win",
                value: win,
            });
        }
        Ok(Self { odds })
    }

    pub fn coin_flip() -> Self {
        Self {
            odds: GameOdds {
                win: 0.5,
                loss: 0.5,
                tie: 0.0,
            },
        }
    }
}

impl WinProbability for FixedOdds {
    fn odds(&self, _team: &Team, _opponent: &Team, _venue: Venue) -> GameOdds {
        self.odds
    }
}

/// Pins specific matchups to a known home-win probability and defers the rest.
#[derive(Debug, Clone)]
pub struct MatchupOverrides<M> {
    inner: M,
    overrides: FxHashMap<(String, String), f64>,
}

impl<M: WinProbability> MatchupOverrides<M> {
    pub fn new(inner: M) -> Self {
        Self {
            inner,
            overrides: FxHashMap::default(),
        }
    }

    /// `probability` is the chance `home` beats `away` at `home`'s venue.
    pub fn insert(
        &mut self,
        home: impl Into<String>,
        away: impl Into<String>,
        probability: f64,
    ) -> Result<(), ConfigError> {
        let (home, away) = (home.into(), away.into());
        if !(probability.is_finite() && (0.0..=1.0).contains(&probability)) {
            return Err(ConfigError::InvalidOverride {
                home,
                away,
                probability,
            });
        }
        self.overrides.insert((home, away), probability);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    fn lookup(&self, team: &str, opponent: &str) -> Option<f64> {
        self.overrides
            .get(&(team.to_string(), opponent.to_string()))
            .copied()
    }
}

impl<M: WinProbability> WinProbability for MatchupOverrides<M> {
    fn odds(&self, team: &Team, opponent: &Team, venue: Venue) -> GameOdds {
        let pinned = match venue {
            Venue::Away => self.lookup(&opponent.name, &team.name).map(|p| 1.0 - p),
            Venue::Home | Venue::Neutral => self.lookup(&team.name, &opponent.name),
        };
        match pinned {
            Some(win) => GameOdds {
                win,
                loss: 1.0 - win,
                tie: 0.0,
            },
            None => self.inner.odds(team, opponent, venue),
        }
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}
