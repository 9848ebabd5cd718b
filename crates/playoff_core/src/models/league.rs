//! Validated, indexed view of the teams and schedule for one run.
//!
//! Everything downstream addresses teams by [`TeamId`] (position in the team
//! list). Name lookups happen once, here, so a game that points at an unknown
//! team fails before any trial is dispatched.

use rustc_hash::FxHashMap;
use tracing::warn;

use super::game::{Game, GameStatus, Outcome, Week};
use super::team::{Conference, Team};
use crate::error::ConfigError;

pub type TeamId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Division {
    pub name: String,
    pub conference: Conference,
    pub members: Vec<TeamId>,
}

/// A game still to be played, with resolved team ids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledGame {
    /// Position in the schedule handed to [`League::new`]
    pub index: usize,
    pub home: TeamId,
    pub away: TeamId,
    pub week: Week,
    pub neutral_site: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletedGame {
    pub index: usize,
    pub home: TeamId,
    pub away: TeamId,
    pub week: Week,
    pub outcome: Outcome,
}

#[derive(Debug, Clone)]
pub struct League {
    teams: Vec<Team>,
    by_name: FxHashMap<String, TeamId>,
    divisions: Vec<Division>,
    team_division: Vec<usize>,
    conferences: [Vec<TeamId>; 2],
    scheduled: Vec<ScheduledGame>,
    completed: Vec<CompletedGame>,
}

impl League {
    /// Indexes teams and games.
    ///
    /// Scheduled games are kept in the order every trial consumes random
    /// draws: ascending week index, then schedule position.
    pub fn new(teams: Vec<Team>, games: Vec<Game>) -> Result<Self, ConfigError> {
        let mut by_name = FxHashMap::default();
        let mut divisions: Vec<Division> = Vec::new();
        let mut team_division = Vec::with_capacity(teams.len());
        let mut conferences: [Vec<TeamId>; 2] = [Vec::new(), Vec::new()];

        for (id, team) in teams.iter().enumerate() {
            if by_name.insert(team.name.clone(), id).is_some() {
                return Err(ConfigError::DuplicateTeam(team.name.clone()));
            }
            if team.division.trim().is_empty() {
                return Err(ConfigError::EmptyDivision {
                    team: team.name.clone(),
                });
            }

            // Same division name in both conferences = two different divisions
            let division = match divisions
                .iter()
                .position(|d| d.conference == team.conference && d.name == team.division)
            {
                Some(existing) => existing,
                None => {
                    divisions.push(Division {
                        name: team.division.clone(),
                        conference: team.conference,
                        members: Vec::new(),
                    });
                    divisions.len() - 1
                }
            };
            divisions[division].members.push(id);
            team_division.push(division);
            conferences[team.conference.index()].push(id);
        }

        let resolve = |index: usize, week: Week, name: &str| {
            by_name
                .get(name)
                .copied()
                .ok_or_else(|| ConfigError::UnknownTeam {
                    game: index,
                    week: week.display_number(),
                    team: name.to_string(),
                })
        };

        let mut scheduled = Vec::new();
        let mut completed = Vec::new();
        for (index, game) in games.iter().enumerate() {
            let home = resolve(index, game.week, &game.home)?;
            let away = resolve(index, game.week, &game.away)?;
            if home == away {
                return Err(ConfigError::SelfMatch {
                    game: index,
                    week: game.week.display_number(),
                    team: game.home.clone(),
                });
            }

            match game.status {
                GameStatus::Scheduled => scheduled.push(ScheduledGame {
                    index,
                    home,
                    away,
                    week: game.week,
                    neutral_site: game.neutral_site,
                }),
                GameStatus::Final(outcome) => completed.push(CompletedGame {
                    index,
                    home,
                    away,
                    week: game.week,
                    outcome,
                }),
            }
        }
        // stable: schedule position breaks ties within a week
        scheduled.sort_by_key(|g| g.week);

        let league = Self {
            teams,
            by_name,
            divisions,
            team_division,
            conferences,
            scheduled,
            completed,
        };
        league.warn_on_record_mismatch();
        Ok(league)
    }

    fn warn_on_record_mismatch(&self) {
        let mut played = vec![0u32; self.teams.len()];
        for game in &self.completed {
            played[game.home] += 1;
            played[game.away] += 1;
        }
        for (team, count) in self.teams.iter().zip(played) {
            if count > team.record.games() {
                warn!(
                    team = %team.name,
                    completed_games = count,
                    record = %team.record,
                    "schedule lists more completed games than the team record"
                );
            }
        }
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> &Team {
        &self.teams[id]
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn team_id(&self, name: &str) -> Option<TeamId> {
        self.by_name.get(name).copied()
    }

    pub fn divisions(&self) -> &[Division] {
        &self.divisions
    }

    pub fn division_index(&self, id: TeamId) -> usize {
        self.team_division[id]
    }

    pub fn same_division(&self, a: TeamId, b: TeamId) -> bool {
        self.team_division[a] == self.team_division[b]
    }

    pub fn same_conference(&self, a: TeamId, b: TeamId) -> bool {
        self.teams[a].conference == self.teams[b].conference
    }

    pub fn conference_teams(&self, conference: Conference) -> &[TeamId] {
        &self.conferences[conference.index()]
    }

    pub fn conference_divisions(
        &self,
        conference: Conference,
    ) -> impl Iterator<Item = &Division> + '_ {
        self.divisions
            .iter()
            .filter(move |d| d.conference == conference)
    }

    pub fn scheduled_games(&self) -> &[ScheduledGame] {
        &self.scheduled
    }

    pub fn completed_games(&self) -> &[CompletedGame] {
        &self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn teams() -> Vec<Team> {
        vec![
            Team::new("BUF", Conference::A, "East").with_record(2, 0, 0),
            Team::new("MIA", Conference::A, "East").with_record(1, 1, 0),
            Team::new("DAL", Conference::B, "East").with_record(0, 2, 0),
            Team::new("SF", Conference::B, "West").with_record(1, 1, 0),
        ]
    }

    #[test]
    fn test_divisions_are_scoped_by_conference() {
        let league = League::new(teams(), vec![]).unwrap();
        assert_eq!(league.divisions().len(), 3);
        assert!(league.same_division(0, 1));
        assert!(!league.same_division(0, 2));
        assert_eq!(league.conference_teams(Conference::B), &[2, 3]);
        assert_eq!(league.conference_divisions(Conference::A).count(), 1);
    }

    #[test]
    fn test_unknown_team_is_rejected() {
        let games = vec![Game::scheduled("BUF", "NYJ", Week::new(4))];
        let err = League::new(teams(), games).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownTeam {
                game: 0,
                week: 5,
                team: "NYJ".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_team_is_rejected() {
        let mut list = teams();
        list.push(Team::new("BUF", Conference::B, "North"));
        assert_eq!(
            League::new(list, vec![]).unwrap_err(),
            ConfigError::DuplicateTeam("BUF".to_string())
        );
    }

    #[test]
    fn test_scheduled_games_sorted_by_week_then_position() {
        let games = vec![
            Game::scheduled("BUF", "MIA", Week::new(5)),
            Game::completed("DAL", "SF", Week::new(0), Outcome::AwayWin),
            Game::scheduled("SF", "DAL", Week::new(2)),
            Game::scheduled("MIA", "BUF", Week::new(2)),
        ];
        let league = League::new(teams(), games).unwrap();
        let order: Vec<usize> = league.scheduled_games().iter().map(|g| g.index).collect();
        assert_eq!(order, vec![2, 3, 0]);
        assert_eq!(league.completed_games().len(), 1);
    }

    #[test]
    fn test_self_match_is_rejected() {
        let games = vec![Game::scheduled("SF", "SF", Week::new(0))];
        assert!(matches!(
            League::new(teams(), games),
            Err(ConfigError::SelfMatch { .. })
        ));
    }
}
