use serde::{Deserialize, Serialize};
use std::fmt;

/// Baseline rating for teams that carry no explicit strength figure.
pub const DEFAULT_RATING: f64 = 1500.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Conference {
    #[serde(alias = "AFC", alias = "a")]
    A,
    #[serde(alias = "NFC", alias = "b")]
    B,
}

impl Conference {
    pub const ALL: [Conference; 2] = [Conference::A, Conference::B];

    pub fn index(self) -> usize {
        match self {
            Conference::A => 0,
            Conference::B => 1,
        }
    }

    /// Accepts the short names as well as the NFL labels.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" | "AFC" => Some(Conference::A),
            "B" | "NFC" => Some(Conference::B),
            _ => None,
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Conference::A => write!(f, "A"),
            Conference::B => write!(f, "B"),
        }
    }
}

/// Win/loss/tie counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Ties count as half a win. A team with no games sits at 0.0.
    ///
    /// Equal records always produce bit-identical values, so standings compare
    /// win percentages with `==`.
    pub fn win_pct(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / games as f64
    }

    pub fn add_win(&mut self) {
        self.wins += 1;
    }

    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    pub fn add_tie(&mut self) {
        self.ties += 1;
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.ties > 0 {
            write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
        } else {
            write!(f, "{}-{}", self.wins, self.losses)
        }
    }
}

/// Static team record as handed over by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub conference: Conference,
    pub division: String,
    #[serde(flatten)]
    pub record: Record,
    /// Elo-style rating (only read by rating-based models)
    #[serde(default = "default_rating")]
    pub rating: f64,
    /// Precomputed opponent win percentage, 0.5 = average schedule
    #[serde(default = "default_opponent_strength")]
    pub opponent_strength: f64,
}

fn default_rating() -> f64 {
    DEFAULT_RATING
}

fn default_opponent_strength() -> f64 {
    0.5
}

impl Team {
    pub fn new(name: impl Into<String>, conference: Conference, division: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            conference,
            division: division.into(),
            record: Record::default(),
            rating: DEFAULT_RATING,
            opponent_strength: 0.5,
        }
    }

    pub fn with_record(mut self, wins: u32, losses: u32, ties: u32) -> Self {
        self.record = Record::new(wins, losses, ties);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    pub fn with_opponent_strength(mut self, opponent_strength: f64) -> Self {
        self.opponent_strength = opponent_strength;
        self
    }

    pub fn win_pct(&self) -> f64 {
        self.record.win_pct()
    }
}
