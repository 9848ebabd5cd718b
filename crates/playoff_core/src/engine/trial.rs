//! Trial simulator: one stochastic realization of the remaining schedule.
//!
//! Odds for every scheduled game are computed once per run (team strength is
//! fixed for the whole run). A trial clones the baseline standings and then
//! walks the scheduled games in [`League::scheduled_games`] order, consuming
//! exactly one uniform draw per game.

use rand::Rng;

use super::win_prob::{GameOdds, Venue, WinProbability};
use crate::error::{Result, SimError};
use crate::models::{League, Outcome, Record, TeamId};

/// Per-team standing for one trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrialRecord {
    pub overall: Record,
    pub division: Record,
    pub conference: Record,
}

impl TrialRecord {
    pub fn win_pct(&self) -> f64 {
        self.overall.win_pct()
    }
}

/// All team records of one trial plus the head-to-head table.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialStandings {
    records: Vec<TrialRecord>,
    /// Row team's record against column team, `n * n`
    head_to_head: Vec<Record>,
    teams: usize,
}

impl TrialStandings {
    /// Static records plus the splits implied by completed games.
    ///
    /// Overall W/L/T come from the team list; completed games only feed the
    /// division, conference and head-to-head splits, so they are never counted
    /// twice.
    pub fn baseline(league: &League) -> Self {
        let teams = league.team_count();
        let mut standings = Self {
            records: league
                .teams()
                .iter()
                .map(|t| TrialRecord {
                    overall: t.record,
                    ..TrialRecord::default()
                })
                .collect(),
            head_to_head: vec![Record::default(); teams * teams],
            teams,
        };
        for game in league.completed_games() {
            standings.record_splits(league, game.home, game.away, game.outcome);
        }
        standings
    }

    pub fn record(&self, team: TeamId) -> &TrialRecord {
        &self.records[team]
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn head_to_head(&self, team: TeamId, opponent: TeamId) -> Record {
        self.head_to_head[team * self.teams + opponent]
    }

    /// Applies a simulated result to overall record and splits.
    pub fn apply(&mut self, league: &League, home: TeamId, away: TeamId, outcome: Outcome) {
        apply_outcome(&mut self.records[home].overall, outcome);
        apply_outcome(&mut self.records[away].overall, outcome.flipped());
        self.record_splits(league, home, away, outcome);
    }

    fn record_splits(&mut self, league: &League, home: TeamId, away: TeamId, outcome: Outcome) {
        if league.same_division(home, away) {
            apply_outcome(&mut self.records[home].division, outcome);
            apply_outcome(&mut self.records[away].division, outcome.flipped());
        }
        if league.same_conference(home, away) {
            apply_outcome(&mut self.records[home].conference, outcome);
            apply_outcome(&mut self.records[away].conference, outcome.flipped());
        }
        apply_outcome(&mut self.head_to_head[home * self.teams + away], outcome);
        apply_outcome(
            &mut self.head_to_head[away * self.teams + home],
            outcome.flipped(),
        );
    }
}

/// `outcome` is seen from the side that owns `record`, home-perspective naming.
fn apply_outcome(record: &mut Record, outcome: Outcome) {
    match outcome {
        Outcome::HomeWin => record.add_win(),
        Outcome::AwayWin => record.add_loss(),
        Outcome::Tie => record.add_tie(),
    }
}

/// Maps one uniform draw in [0, 1) to an outcome: home win, then tie, then away win.
pub fn draw_outcome(odds: &GameOdds, u: f64) -> Outcome {
    if u < odds.win {
        Outcome::HomeWin
    } else if u < odds.win + odds.tie {
        Outcome::Tie
    } else {
        Outcome::AwayWin
    }
}

pub struct TrialSimulator<'a> {
    league: &'a League,
    baseline: TrialStandings,
    /// Home-perspective odds, aligned with `league.scheduled_games()`
    odds: Vec<GameOdds>,
}

impl<'a> TrialSimulator<'a> {
    pub fn new<M: WinProbability + ?Sized>(league: &'a League, model: &M) -> Result<Self> {
        let odds = league
            .scheduled_games()
            .iter()
            .map(|game| {
                let (home, away) = (league.team(game.home), league.team(game.away));
                let venue = if game.neutral_site {
                    Venue::Neutral
                } else {
                    Venue::Home
                };
                let odds = model.odds(home, away, venue);
                if odds.is_valid() {
                    Ok(odds)
                } else {
                    Err(SimError::InvalidOdds {
                        game: game.index,
                        home: home.name.clone(),
                        away: away.name.clone(),
                        home_win: odds.win,
                        away_win: odds.loss,
                        tie: odds.tie,
                    })
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            league,
            baseline: TrialStandings::baseline(league),
            odds,
        })
    }

    pub fn baseline(&self) -> &TrialStandings {
        &self.baseline
    }

    /// Home-perspective odds per scheduled game, in draw order.
    pub fn odds(&self) -> &[GameOdds] {
        &self.odds
    }

    pub fn simulate<R: Rng>(&self, rng: &mut R) -> TrialStandings {
        let mut standings = self.baseline.clone();
        for (game, odds) in self.league.scheduled_games().iter().zip(&self.odds) {
            let u: f64 = rng.gen();
            standings.apply(self.league, game.home, game.away, draw_outcome(odds, u));
        }
        standings
    }
}
