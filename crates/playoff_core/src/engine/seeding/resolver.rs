//! Seeding resolver: final records of one conference → playoff field.

use crate::engine::config::SeedingConfig;
use crate::engine::trial::TrialStandings;
use crate::error::{ConfigError, Result, SimError};
use crate::models::{Conference, League, TeamId};

use super::tiebreak::{RankContext, Ranking, TieBreaker};

/// Playoff field and draft order of one conference for one trial.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedingResult {
    pub conference: Conference,
    /// Seeds 1..=D, best first
    pub division_winners: Vec<TeamId>,
    /// Seeds D+1..=D+K
    pub wildcards: Vec<TeamId>,
    /// Non-playoff teams, best record first
    pub eliminated: Vec<TeamId>,
    /// `eliminated` reversed: worst record picks first
    pub draft_order: Vec<TeamId>,
    /// A placement came down to the non-authoritative fallback
    pub fallback_used: bool,
}

impl SeedingResult {
    /// Division winners then wildcards, in seed order.
    pub fn playoff_field(&self) -> impl Iterator<Item = TeamId> + '_ {
        self.division_winners
            .iter()
            .chain(self.wildcards.iter())
            .copied()
    }

    pub fn field_size(&self) -> usize {
        self.division_winners.len() + self.wildcards.len()
    }

    /// 1-based playoff seed.
    pub fn seed_of(&self, team: TeamId) -> Option<usize> {
        self.playoff_field()
            .position(|t| t == team)
            .map(|p| p + 1)
    }

    /// 1-based pick among this conference's eliminated teams.
    pub fn draft_rank(&self, team: TeamId) -> Option<usize> {
        self.draft_order
            .iter()
            .position(|&t| t == team)
            .map(|p| p + 1)
    }
}

pub struct SeedingResolver<'a> {
    league: &'a League,
    chain: Vec<TieBreaker>,
    wildcard_slots: usize,
}

impl<'a> SeedingResolver<'a> {
    pub fn new(league: &'a League, config: &SeedingConfig) -> std::result::Result<Self, ConfigError> {
        config.validate_for(league)?;
        Ok(Self {
            league,
            chain: config.effective_chain(),
            wildcard_slots: config.wildcard_slots,
        })
    }

    pub fn chain(&self) -> &[TieBreaker] {
        &self.chain
    }

    pub fn field_size(&self, conference: Conference) -> usize {
        self.league.conference_divisions(conference).count() + self.wildcard_slots
    }

    pub fn resolve(
        &self,
        conference: Conference,
        standings: &TrialStandings,
        trial: u64,
    ) -> Result<SeedingResult> {
        let ctx = RankContext::new(self.league, standings, &self.chain);
        let mut fallback_used = false;

        let mut winners = Vec::new();
        for division in self.league.conference_divisions(conference) {
            let ranking = ctx.rank(&division.members);
            fallback_used |= ranking.fallback_used;
            if let Some(&winner) = ranking.order.first() {
                winners.push(winner);
            }
        }
        let seeded = ctx.rank(&winners);
        fallback_used |= seeded.fallback_used;

        let candidates: Vec<TeamId> = self
            .league
            .conference_teams(conference)
            .iter()
            .copied()
            .filter(|t| !winners.contains(t))
            .collect();
        let Ranking {
            order: mut ranked,
            fallback_used: candidates_fallback,
        } = ctx.rank(&candidates);
        fallback_used |= candidates_fallback;

        let eliminated = ranked.split_off(self.wildcard_slots.min(ranked.len()));
        let draft_order = eliminated.iter().rev().copied().collect();

        let result = SeedingResult {
            conference,
            division_winners: seeded.order,
            wildcards: ranked,
            eliminated,
            draft_order,
            fallback_used,
        };
        self.verify(&result, trial)?;
        Ok(result)
    }

    /// Resolves both conferences.
    pub fn resolve_all(&self, standings: &TrialStandings, trial: u64) -> Result<Vec<SeedingResult>> {
        Conference::ALL
            .iter()
            .map(|&conference| self.resolve(conference, standings, trial))
            .collect()
    }

    /// League-wide draft order over every eliminated team, worst first.
    pub fn league_draft_order(
        &self,
        results: &[SeedingResult],
        standings: &TrialStandings,
    ) -> Ranking {
        let pool: Vec<TeamId> = results
            .iter()
            .flat_map(|r| r.eliminated.iter().copied())
            .collect();
        let mut ranking = RankContext::new(self.league, standings, &self.chain).rank(&pool);
        ranking.order.reverse();
        ranking
    }

    fn verify(&self, result: &SeedingResult, trial: u64) -> Result<()> {
        let violation = |detail: String| SimError::InvariantViolation {
            trial,
            conference: result.conference,
            detail,
        };

        let members = self.league.conference_teams(result.conference);
        let divisions = self.league.conference_divisions(result.conference).count();
        let expected = self.field_size(result.conference);

        if result.division_winners.len() != divisions {
            return Err(violation(format!(
                "{} division winners for {} divisions",
                result.division_winners.len(),
                divisions
            )));
        }
        if result.field_size() != expected {
            return Err(violation(format!(
                "playoff field has {} teams, expected {}",
                result.field_size(),
                expected
            )));
        }

        let mut seen = vec![0u8; self.league.team_count()];
        for team in result.playoff_field().chain(result.eliminated.iter().copied()) {
            if self.league.team(team).conference != result.conference {
                return Err(violation(format!(
                    "'{}' belongs to another conference",
                    self.league.team(team).name
                )));
            }
            seen[team] += 1;
        }
        if let Some(&team) = members.iter().find(|&&t| seen[t] != 1) {
            return Err(violation(format!(
                "'{}' placed {} times",
                self.league.team(team).name,
                seen[team]
            )));
        }
        let placed: usize = seen.iter().map(|&c| c as usize).sum();
        if placed != members.len() {
            return Err(violation(format!(
                "{} placements for {} teams",
                placed,
                members.len()
            )));
        }

        let mut winner_divisions: Vec<usize> = result
            .division_winners
            .iter()
            .map(|&t| self.league.division_index(t))
            .collect();
        winner_divisions.sort_unstable();
        winner_divisions.dedup();
        if winner_divisions.len() != divisions {
            return Err(violation("two winners from one division".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::DraftScope;
    use crate::models::{Game, Outcome, Team, Week};

    /// 2 divisions × 4 per conference
    fn eight_team_league(games: Vec<Game>) -> League {
        let mut teams = Vec::new();
        let records = [(9, 1), (7, 3), (5, 5), (2, 8), (8, 2), (6, 4), (4, 6), (1, 9)];
        for (conference, prefix) in [(Conference::A, "A"), (Conference::B, "B")] {
            for (i, &(w, l)) in records.iter().enumerate() {
                let division = if i < 4 { "North" } else { "South" };
                teams.push(
                    Team::new(format!("{}{}", prefix, i), conference, division).with_record(w, l, 0),
                );
            }
        }
        League::new(teams, games).unwrap()
    }

    fn config(wildcards: usize) -> SeedingConfig {
        SeedingConfig {
            wildcard_slots: wildcards,
            ..SeedingConfig::nfl()
        }
    }

    fn names(league: &League, ids: &[TeamId]) -> Vec<String> {
        ids.iter().map(|&t| league.team(t).name.clone()).collect()
    }

    #[test]
    fn test_resolves_field_and_draft_order() {
        let league = eight_team_league(vec![]);
        let resolver = SeedingResolver::new(&league, &config(1)).unwrap();
        let standings = TrialStandings::baseline(&league);

        let result = resolver.resolve(Conference::A, &standings, 0).unwrap();
        assert_eq!(names(&league, &result.division_winners), vec!["A0", "A4"]);
        assert_eq!(names(&league, &result.wildcards), vec!["A1"]);
        assert_eq!(
            names(&league, &result.eliminated),
            vec!["A5", "A2", "A6", "A3", "A7"]
        );
        assert_eq!(
            names(&league, &result.draft_order),
            vec!["A7", "A3", "A6", "A2", "A5"]
        );
        assert_eq!(result.seed_of(4), Some(2));
        assert_eq!(result.draft_rank(7), Some(1));
        assert_eq!(result.seed_of(7), None);
        assert!(!result.fallback_used);
    }

    #[test]
    fn test_division_winner_with_worse_record_still_seeded() {
        // South winner A4 (8-2) drops to 5-5 while North runner-up A1 is 7-3
        let mut teams: Vec<Team> = eight_team_league(vec![]).teams().to_vec();
        teams[4].record = crate::models::Record::new(5, 5, 0);
        teams[5].record = crate::models::Record::new(4, 6, 0);
        let league = League::new(teams, vec![]).unwrap();
        let resolver = SeedingResolver::new(&league, &config(1)).unwrap();
        let standings = TrialStandings::baseline(&league);

        let result = resolver.resolve(Conference::A, &standings, 0).unwrap();
        assert_eq!(names(&league, &result.division_winners), vec!["A0", "A4"]);
        assert_eq!(names(&league, &result.wildcards), vec!["A1"]);
    }

    #[test]
    fn test_partition_holds_for_every_conference() {
        let league = eight_team_league(vec![]);
        let resolver = SeedingResolver::new(&league, &config(2)).unwrap();
        let standings = TrialStandings::baseline(&league);

        for result in resolver.resolve_all(&standings, 3).unwrap() {
            let mut all: Vec<TeamId> = result
                .playoff_field()
                .chain(result.eliminated.iter().copied())
                .collect();
            all.sort_unstable();
            assert_eq!(all, league.conference_teams(result.conference).to_vec());
            assert_eq!(result.field_size(), 4);
        }
    }

    #[test]
    fn test_tied_division_uses_head_to_head() {
        let mut teams: Vec<Team> = eight_team_league(vec![]).teams().to_vec();
        teams[1].record = teams[0].record;
        let games = vec![Game::completed("A0", "A1", Week::new(3), Outcome::AwayWin)];
        let league = League::new(teams, games).unwrap();
        let resolver = SeedingResolver::new(&league, &config(1)).unwrap();
        let standings = TrialStandings::baseline(&league);

        let result = resolver.resolve(Conference::A, &standings, 0).unwrap();
        assert_eq!(names(&league, &result.division_winners)[0], "A1");
        assert_eq!(names(&league, &result.wildcards), vec!["A0"]);
        assert!(!result.fallback_used);
    }

    #[test]
    fn test_league_draft_order_interleaves_conferences() {
        let league = eight_team_league(vec![]);
        let resolver = SeedingResolver::new(
            &league,
            &SeedingConfig {
                draft_scope: DraftScope::League,
                ..config(1)
            },
        )
        .unwrap();
        let standings = TrialStandings::baseline(&league);
        let results = resolver.resolve_all(&standings, 0).unwrap();

        let draft = resolver.league_draft_order(&results, &standings);
        assert_eq!(draft.order.len(), 10);
        // A7 and B7 are both 1-9: name fallback decides the first pick
        assert_eq!(names(&league, &draft.order[..2]), vec!["B7", "A7"]);
        assert!(draft.fallback_used);
    }

    #[test]
    fn test_verify_rejects_broken_partition() {
        let league = eight_team_league(vec![]);
        let resolver = SeedingResolver::new(&league, &config(1)).unwrap();
        let standings = TrialStandings::baseline(&league);
        let mut result = resolver.resolve(Conference::A, &standings, 0).unwrap();

        // duplicate a wildcard into the eliminated list
        result.eliminated.push(result.wildcards[0]);
        let err = resolver.verify(&result, 17).unwrap_err();
        assert!(err.is_invariant_violation());
        assert!(err.to_string().contains("trial 17"));

        let mut short = resolver.resolve(Conference::A, &standings, 0).unwrap();
        short.wildcards.clear();
        assert!(resolver.verify(&short, 1).is_err());
    }
}
