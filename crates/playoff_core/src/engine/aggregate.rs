//! Aggregator
//!
//! Per-team counters folded in once per trial. Memory is O(teams): nothing
//! about an individual trial survives [`Tally::record`]. Partial tallies from
//! different workers combine with [`Tally::merge`], which is plain integer
//! addition, so the merge order never changes the result.

use serde::{Deserialize, Serialize};

use super::config::DraftScope;
use super::seeding::{SeedingResolver, SeedingResult};
use crate::models::{Conference, League, Record, TeamId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct TeamTally {
    playoffs: u64,
    division_titles: u64,
    eliminated: u64,
    /// index = seed - 1
    seeds: Vec<u64>,
    /// index = wildcard rank - 1
    wildcard_ranks: Vec<u64>,
    /// index = draft slot - 1
    draft_slots: Vec<u64>,
    draft_pick_sum: u64,
}

impl TeamTally {
    fn merge(&mut self, other: &TeamTally) {
        self.playoffs += other.playoffs;
        self.division_titles += other.division_titles;
        self.eliminated += other.eliminated;
        add_counts(&mut self.seeds, &other.seeds);
        add_counts(&mut self.wildcard_ranks, &other.wildcard_ranks);
        add_counts(&mut self.draft_slots, &other.draft_slots);
        self.draft_pick_sum += other.draft_pick_sum;
    }
}

fn bump(counts: &mut Vec<u64>, index: usize) {
    if counts.len() <= index {
        counts.resize(index + 1, 0);
    }
    counts[index] += 1;
}

fn add_counts(into: &mut Vec<u64>, from: &[u64]) {
    if into.len() < from.len() {
        into.resize(from.len(), 0);
    }
    for (a, b) in into.iter_mut().zip(from) {
        *a += b;
    }
}

/// Running counters for a whole run (or one worker's share of it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally {
    trials: u64,
    fallback_trials: u64,
    teams: Vec<TeamTally>,
}

impl Tally {
    pub fn new(team_count: usize, seed_slots: usize, wildcard_slots: usize, draft_slots: usize) -> Self {
        let team = TeamTally {
            seeds: vec![0; seed_slots],
            wildcard_ranks: vec![0; wildcard_slots],
            draft_slots: vec![0; draft_slots],
            ..TeamTally::default()
        };
        Self {
            trials: 0,
            fallback_trials: 0,
            teams: vec![team; team_count],
        }
    }

    /// Sized for the league's format so every distribution has a fixed length.
    pub fn for_league(
        league: &League,
        resolver: &SeedingResolver<'_>,
        wildcard_slots: usize,
        scope: DraftScope,
    ) -> Self {
        let per_conference: Vec<(usize, usize)> = Conference::ALL
            .iter()
            .map(|&c| {
                let field = resolver.field_size(c);
                (field, league.conference_teams(c).len().saturating_sub(field))
            })
            .collect();
        let seed_slots = per_conference.iter().map(|&(f, _)| f).max().unwrap_or(0);
        let draft_slots = match scope {
            DraftScope::League => per_conference.iter().map(|&(_, e)| e).sum(),
            DraftScope::Conference => per_conference.iter().map(|&(_, e)| e).max().unwrap_or(0),
        };
        Self::new(league.team_count(), seed_slots, wildcard_slots, draft_slots)
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Folds one trial in.
    ///
    /// `league_draft` is the league-wide order (worst first); `None` uses each
    /// conference's own draft order.
    pub fn record(
        &mut self,
        results: &[SeedingResult],
        league_draft: Option<&[TeamId]>,
        fallback_used: bool,
    ) {
        self.trials += 1;
        if fallback_used {
            self.fallback_trials += 1;
        }

        for result in results {
            let winners = result.division_winners.len();
            for (i, &team) in result.division_winners.iter().enumerate() {
                let tally = &mut self.teams[team];
                tally.playoffs += 1;
                tally.division_titles += 1;
                bump(&mut tally.seeds, i);
            }
            for (j, &team) in result.wildcards.iter().enumerate() {
                let tally = &mut self.teams[team];
                tally.playoffs += 1;
                bump(&mut tally.wildcard_ranks, j);
                bump(&mut tally.seeds, winners + j);
            }
            for &team in &result.eliminated {
                self.teams[team].eliminated += 1;
            }
            if league_draft.is_none() {
                self.record_draft(&result.draft_order);
            }
        }
        if let Some(order) = league_draft {
            self.record_draft(order);
        }
    }

    fn record_draft(&mut self, order: &[TeamId]) {
        for (slot, &team) in order.iter().enumerate() {
            let tally = &mut self.teams[team];
            bump(&mut tally.draft_slots, slot);
            tally.draft_pick_sum += slot as u64 + 1;
        }
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        self.trials += other.trials;
        self.fallback_trials += other.fallback_trials;
        if self.teams.len() < other.teams.len() {
            self.teams.resize(other.teams.len(), TeamTally::default());
        }
        for (mine, theirs) in self.teams.iter_mut().zip(&other.teams) {
            mine.merge(theirs);
        }
        self
    }

    /// Converts counters into percentages of the trial count.
    pub fn finalize(self, league: &League, seed: u64) -> SimulationSummary {
        let n = self.trials;
        let pct = |count: u64| {
            if n == 0 {
                0.0
            } else {
                count as f64 * 100.0 / n as f64
            }
        };

        let teams = league
            .teams()
            .iter()
            .zip(&self.teams)
            .map(|(team, tally)| TeamSummary {
                name: team.name.clone(),
                conference: team.conference,
                division: team.division.clone(),
                record: team.record,
                playoff_pct: pct(tally.playoffs),
                division_title_pct: pct(tally.division_titles),
                eliminated_pct: pct(tally.eliminated),
                seed_pct: tally.seeds.iter().map(|&c| pct(c)).collect(),
                wildcard_pct: tally.wildcard_ranks.iter().map(|&c| pct(c)).collect(),
                draft_pick_pct: tally.draft_slots.iter().map(|&c| pct(c)).collect(),
                expected_draft_pick: if tally.eliminated == 0 {
                    None
                } else {
                    Some(tally.draft_pick_sum as f64 / tally.eliminated as f64)
                },
                playoff_trials: tally.playoffs,
                eliminated_trials: tally.eliminated,
            })
            .collect();

        SimulationSummary {
            trials: n,
            seed,
            fallback_trials: self.fallback_trials,
            teams,
        }
    }
}

/// Per-team result handed to the reporting side. Percentages are 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    pub conference: Conference,
    pub division: String,
    /// Record going into the simulation
    pub record: Record,
    pub playoff_pct: f64,
    pub division_title_pct: f64,
    pub eliminated_pct: f64,
    /// index 0 = seed 1
    pub seed_pct: Vec<f64>,
    /// index 0 = first wildcard
    pub wildcard_pct: Vec<f64>,
    /// index 0 = first overall pick
    pub draft_pick_pct: Vec<f64>,
    /// Mean pick over trials where the team missed the playoffs
    pub expected_draft_pick: Option<f64>,
    pub playoff_trials: u64,
    pub eliminated_trials: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub trials: u64,
    /// Base seed; replaying with it reproduces this summary exactly
    pub seed: u64,
    /// Trials in which the name fallback decided at least one placement
    pub fallback_trials: u64,
    pub teams: Vec<TeamSummary>,
}

impl SimulationSummary {
    pub fn team(&self, name: &str) -> Option<&TeamSummary> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn fallback_pct(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.fallback_trials as f64 * 100.0 / self.trials as f64
        }
    }
}
