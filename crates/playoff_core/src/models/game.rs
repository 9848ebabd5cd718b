use serde::{Deserialize, Serialize};
use std::fmt;

/// Week of the season, stored 0-based.
///
/// `Display` and [`Week::display_number`] are the only places the 1-based
/// presentation number appears; ordering and comparisons use the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Week(u16);

impl Week {
    pub fn new(index: u16) -> Self {
        Self(index)
    }

    /// Converts a 1-based week number (as printed on schedules) into a `Week`.
    pub fn from_display(number: u16) -> Option<Self> {
        number.checked_sub(1).map(Self)
    }

    pub fn index(self) -> u16 {
        self.0
    }

    pub fn display_number(self) -> u16 {
        self.0 + 1
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Tie,
}

impl Outcome {
    /// Outcome seen from the away side.
    pub fn flipped(self) -> Self {
        match self {
            Outcome::HomeWin => Outcome::AwayWin,
            Outcome::AwayWin => Outcome::HomeWin,
            Outcome::Tie => Outcome::Tie,
        }
    }
}

/// A completed game always carries its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Scheduled,
    Final(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub home: String,
    pub away: String,
    pub week: Week,
    pub status: GameStatus,
    /// No home-field adjustment for either side
    #[serde(default)]
    pub neutral_site: bool,
}

impl Game {
    pub fn scheduled(home: impl Into<String>, away: impl Into<String>, week: Week) -> Self {
        Self {
            home: home.into(),
            away: away.into(),
            week,
            status: GameStatus::Scheduled,
            neutral_site: false,
        }
    }

    pub fn completed(
        home: impl Into<String>,
        away: impl Into<String>,
        week: Week,
        outcome: Outcome,
    ) -> Self {
        Self {
            status: GameStatus::Final(outcome),
            ..Self::scheduled(home, away, week)
        }
    }

    pub fn at_neutral_site(mut self) -> Self {
        self.neutral_site = true;
        self
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.status, GameStatus::Final(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            GameStatus::Final(outcome) => Some(outcome),
            GameStatus::Scheduled => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_display_is_one_based() {
        let week = Week::new(0);
        assert_eq!(week.to_string(), "1");
        assert_eq!(Week::from_display(1), Some(week));
        assert_eq!(Week::from_display(0), None);
        assert_eq!(Week::from_display(18).map(Week::index), Some(17));
    }

    #[test]
    fn test_game_status_serde() {
        let game = Game::completed("KC", "DEN", Week::new(3), Outcome::AwayWin);
        let json = serde_json::to_value(&game).unwrap();
        assert_eq!(json["status"]["final"], "away_win");
        assert_eq!(json["week"], 3);

        let back: Game = serde_json::from_value(json).unwrap();
        assert_eq!(back, game);
    }

    #[test]
    fn test_scheduled_status_is_plain_string() {
        let json = serde_json::to_value(Game::scheduled("KC", "DEN", Week::new(0))).unwrap();
        assert_eq!(json["status"], "scheduled");
        assert_eq!(json["neutral_site"], false);
    }

    #[test]
    fn test_scheduled_game_has_no_outcome() {
        let game = Game::scheduled("KC", "DEN", Week::new(10));
        assert!(!game.is_completed());
        assert_eq!(game.outcome(), None);
        assert_eq!(Outcome::HomeWin.flipped(), Outcome::AwayWin);
    }
}
