//! Tie-break chain
//!
//! Each link is a pure function over a *group* of teams tied on win
//! percentage: it returns the subset that is best under that rule. Links that
//! cannot separate (or do not apply to) the group return it unchanged. The
//! ranking loop restarts the chain whenever a link shrinks the group, and the
//! chain always ends with [`TieBreaker::Alphabetical`], which separates any
//! group because team names are unique.

use serde::{Deserialize, Serialize};

use crate::engine::trial::TrialStandings;
use crate::models::{League, Record, TeamId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Win percentage in games among the tied teams; only when every pair met
    HeadToHead,
    /// Win percentage in division games; only when all tied teams share a division
    DivisionRecord,
    /// Win percentage in conference games
    ConferenceRecord,
    /// Static strength rating, higher first
    Rating,
    /// Team name, A before Z. Not league policy.
    Alphabetical,
}

impl TieBreaker {
    /// False for the placeholder name-order fallback.
    pub fn is_authoritative(self) -> bool {
        !matches!(self, TieBreaker::Alphabetical)
    }

    pub fn label(self) -> &'static str {
        match self {
            TieBreaker::HeadToHead => "head-to-head",
            TieBreaker::DivisionRecord => "division record",
            TieBreaker::ConferenceRecord => "conference record",
            TieBreaker::Rating => "rating",
            TieBreaker::Alphabetical => "alphabetical",
        }
    }

    /// Best subset of `group` under this rule. Never empty for a non-empty group.
    pub fn narrow(self, group: &[TeamId], ctx: &RankContext<'_>) -> Vec<TeamId> {
        match self {
            TieBreaker::HeadToHead => {
                if !every_pair_met(group, ctx.standings) {
                    return group.to_vec();
                }
                keep_best(group, |team| head_to_head_record(team, group, ctx.standings).win_pct())
            }
            TieBreaker::DivisionRecord => {
                let division = ctx.league.division_index(group[0]);
                if group
                    .iter()
                    .any(|&t| ctx.league.division_index(t) != division)
                {
                    return group.to_vec();
                }
                keep_best(group, |team| ctx.standings.record(team).division.win_pct())
            }
            TieBreaker::ConferenceRecord => {
                keep_best(group, |team| ctx.standings.record(team).conference.win_pct())
            }
            TieBreaker::Rating => keep_best(group, |team| ctx.league.team(team).rating),
            TieBreaker::Alphabetical => group
                .iter()
                .copied()
                .min_by(|&a, &b| ctx.league.team(a).name.cmp(&ctx.league.team(b).name))
                .into_iter()
                .collect(),
        }
    }
}

/// Read-only inputs shared by every link of the chain during one resolution.
#[derive(Clone, Copy)]
pub struct RankContext<'a> {
    pub league: &'a League,
    pub standings: &'a TrialStandings,
    pub chain: &'a [TieBreaker],
}

/// Outcome of ranking a pool of teams.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ranking {
    /// Best first
    pub order: Vec<TeamId>,
    /// A placement was decided by a non-authoritative link
    pub fallback_used: bool,
}

impl<'a> RankContext<'a> {
    pub fn new(league: &'a League, standings: &'a TrialStandings, chain: &'a [TieBreaker]) -> Self {
        Self {
            league,
            standings,
            chain,
        }
    }

    /// Orders `pool` best to worst: win percentage first, ties through the chain.
    ///
    /// One team is placed at a time; after each placement the remaining teams
    /// are regrouped from scratch.
    pub fn rank(&self, pool: &[TeamId]) -> Ranking {
        let mut remaining = pool.to_vec();
        let mut ranking = Ranking {
            order: Vec::with_capacity(pool.len()),
            fallback_used: false,
        };

        while !remaining.is_empty() {
            let best = remaining
                .iter()
                .map(|&t| self.standings.record(t).win_pct())
                .fold(f64::NEG_INFINITY, f64::max);
            let tied: Vec<TeamId> = remaining
                .iter()
                .copied()
                .filter(|&t| self.standings.record(t).win_pct() == best)
                .collect();

            let pick = if tied.len() == 1 {
                tied[0]
            } else {
                self.break_tie(tied, &mut ranking.fallback_used)
            };
            ranking.order.push(pick);
            remaining.retain(|&t| t != pick);
        }
        ranking
    }

    fn break_tie(&self, mut group: Vec<TeamId>, fallback_used: &mut bool) -> TeamId {
        'restart: while group.len() > 1 {
            for &link in self.chain {
                let narrowed = link.narrow(&group, self);
                if narrowed.len() < group.len() {
                    if !link.is_authoritative() {
                        *fallback_used = true;
                    }
                    group = narrowed;
                    continue 'restart;
                }
            }
            // chain exhausted without the name fallback
            *fallback_used = true;
            group = TieBreaker::Alphabetical.narrow(&group, self);
        }
        group[0]
    }
}

fn keep_best(group: &[TeamId], score: impl Fn(TeamId) -> f64) -> Vec<TeamId> {
    let scores: Vec<f64> = group.iter().map(|&t| score(t)).collect();
    let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let kept: Vec<TeamId> = group
        .iter()
        .zip(&scores)
        .filter(|&(_, &s)| s == best)
        .map(|(&t, _)| t)
        .collect();
    // all-NaN scores separate nobody
    if kept.is_empty() {
        group.to_vec()
    } else {
        kept
    }
}

fn every_pair_met(group: &[TeamId], standings: &TrialStandings) -> bool {
    group.iter().enumerate().all(|(i, &a)| {
        group[i + 1..]
            .iter()
            .all(|&b| standings.head_to_head(a, b).games() > 0)
    })
}

fn head_to_head_record(team: TeamId, group: &[TeamId], standings: &TrialStandings) -> Record {
    group
        .iter()
        .filter(|&&other| other != team)
        .fold(Record::default(), |acc, &other| {
            let r = standings.head_to_head(team, other);
            Record::new(acc.wins + r.wins, acc.losses + r.losses, acc.ties + r.ties)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Conference, Game, Outcome, Team, Week};

    const CHAIN: [TieBreaker; 4] = [
        TieBreaker::HeadToHead,
        TieBreaker::DivisionRecord,
        TieBreaker::ConferenceRecord,
        TieBreaker::Alphabetical,
    ];

    fn names(league: &League, order: &[TeamId]) -> Vec<String> {
        order.iter().map(|&t| league.team(t).name.clone()).collect()
    }

    #[test]
    fn test_win_pct_orders_without_tie_breaks() {
        let teams = vec![
            Team::new("A", Conference::A, "East").with_record(5, 5, 0),
            Team::new("B", Conference::A, "East").with_record(8, 2, 0),
            Team::new("C", Conference::A, "East").with_record(2, 8, 0),
        ];
        let league = League::new(teams, vec![]).unwrap();
        let standings = TrialStandings::baseline(&league);
        let ctx = RankContext::new(&league, &standings, &CHAIN);

        let ranking = ctx.rank(&[0, 1, 2]);
        assert_eq!(names(&league, &ranking.order), vec!["B", "A", "C"]);
        assert!(!ranking.fallback_used);
    }

    #[test]
    fn test_head_to_head_beats_name_order() {
        let teams = vec![
            Team::new("Alpha", Conference::A, "East").with_record(6, 4, 0),
            Team::new("Zulu", Conference::A, "East").with_record(6, 4, 0),
        ];
        let games = vec![Game::completed("Alpha", "Zulu", Week::new(2), Outcome::AwayWin)];
        let league = League::new(teams, games).unwrap();
        let standings = TrialStandings::baseline(&league);
        let ctx = RankContext::new(&league, &standings, &CHAIN);

        let ranking = ctx.rank(&[0, 1]);
        assert_eq!(names(&league, &ranking.order), vec!["Zulu", "Alpha"]);
        assert!(!ranking.fallback_used);
    }

    #[test]
    fn test_split_series_falls_through_to_division_record() {
        let teams = vec![
            Team::new("A", Conference::A, "East").with_record(6, 4, 0),
            Team::new("B", Conference::A, "East").with_record(6, 4, 0),
            Team::new("C", Conference::A, "East").with_record(3, 7, 0),
        ];
        let games = vec![
            Game::completed("A", "B", Week::new(0), Outcome::HomeWin),
            Game::completed("B", "A", Week::new(5), Outcome::HomeWin),
            Game::completed("B", "C", Week::new(6), Outcome::HomeWin),
        ];
        let league = League::new(teams, games).unwrap();
        let standings = TrialStandings::baseline(&league);
        let ctx = RankContext::new(&league, &standings, &CHAIN);

        // A and B split 1-1; B also beat C in the division
        let ranking = ctx.rank(&[0, 1]);
        assert_eq!(names(&league, &ranking.order), vec!["B", "A"]);
        assert!(!ranking.fallback_used);
    }

    #[test]
    fn test_head_to_head_skipped_when_not_all_met() {
        let teams = vec![
            Team::new("A", Conference::A, "East").with_record(6, 4, 0),
            Team::new("B", Conference::A, "East").with_record(6, 4, 0),
            Team::new("C", Conference::A, "West").with_record(6, 4, 0),
        ];
        // B beat A but nobody played C
        let games = vec![Game::completed("A", "B", Week::new(0), Outcome::AwayWin)];
        let league = League::new(teams, games).unwrap();
        let standings = TrialStandings::baseline(&league);

        let group = vec![0, 1, 2];
        let ctx = RankContext::new(&league, &standings, &CHAIN);
        assert_eq!(TieBreaker::HeadToHead.narrow(&group, &ctx), group);
        // mixed divisions: division record does not apply either
        assert_eq!(TieBreaker::DivisionRecord.narrow(&group, &ctx), group);
    }

    #[test]
    fn test_restart_after_group_shrinks() {
        let teams = vec![
            Team::new("A", Conference::A, "East").with_record(6, 4, 0),
            Team::new("B", Conference::A, "East").with_record(6, 4, 0),
            Team::new("C", Conference::A, "West").with_record(6, 4, 0),
        ];
        // three-way head-to-head picks B, then the chain restarts for A vs C
        let games = vec![
            Game::completed("A", "B", Week::new(0), Outcome::AwayWin),
            Game::completed("C", "A", Week::new(1), Outcome::HomeWin),
            Game::completed("B", "C", Week::new(2), Outcome::AwayWin),
            Game::completed("C", "B", Week::new(3), Outcome::AwayWin),
            Game::completed("B", "C", Week::new(4), Outcome::HomeWin),
        ];
        let league = League::new(teams, games).unwrap();
        let standings = TrialStandings::baseline(&league);
        let ctx = RankContext::new(&league, &standings, &CHAIN);

        // h2h: A 0-2, B 3-1, C 2-2 (all pairs met) -> B first
        let ranking = ctx.rank(&[0, 1, 2]);
        assert_eq!(names(&league, &ranking.order)[0], "B");
        // then A vs C: C beat A
        assert_eq!(names(&league, &ranking.order), vec!["B", "C", "A"]);
        assert!(!ranking.fallback_used);
    }

    #[test]
    fn test_alphabetical_fallback_is_flagged() {
        let teams = vec![
            Team::new("Jets", Conference::A, "East").with_record(4, 4, 0),
            Team::new("Bills", Conference::A, "East").with_record(4, 4, 0),
        ];
        let league = League::new(teams, vec![]).unwrap();
        let standings = TrialStandings::baseline(&league);
        let ctx = RankContext::new(&league, &standings, &CHAIN);

        let ranking = ctx.rank(&[0, 1]);
        assert_eq!(names(&league, &ranking.order), vec!["Bills", "Jets"]);
        assert!(ranking.fallback_used);
        assert!(!TieBreaker::Alphabetical.is_authoritative());
    }

    #[test]
    fn test_chain_without_fallback_still_terminates() {
        let teams = vec![
            Team::new("B", Conference::A, "East").with_record(4, 4, 0),
            Team::new("A", Conference::A, "East").with_record(4, 4, 0),
        ];
        let league = League::new(teams, vec![]).unwrap();
        let standings = TrialStandings::baseline(&league);
        let chain = [TieBreaker::ConferenceRecord];
        let ctx = RankContext::new(&league, &standings, &chain);

        let ranking = ctx.rank(&[0, 1]);
        assert_eq!(names(&league, &ranking.order), vec!["A", "B"]);
        assert!(ranking.fallback_used);
    }

    #[test]
    fn test_rating_link() {
        let teams = vec![
            Team::new("A", Conference::A, "East").with_record(4, 4, 0).with_rating(1450.0),
            Team::new("B", Conference::A, "East").with_record(4, 4, 0).with_rating(1620.0),
        ];
        let league = League::new(teams, vec![]).unwrap();
        let standings = TrialStandings::baseline(&league);
        let chain = [TieBreaker::Rating, TieBreaker::Alphabetical];
        let ctx = RankContext::new(&league, &standings, &chain);

        let ranking = ctx.rank(&[0, 1]);
        assert_eq!(names(&league, &ranking.order), vec!["B", "A"]);
        assert!(!ranking.fallback_used);
    }
}
