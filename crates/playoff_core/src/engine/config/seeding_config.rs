//! Playoff format and tie-break configuration

use serde::{Deserialize, Serialize};

use crate::engine::seeding::TieBreaker;
use crate::error::ConfigError;
use crate::models::{Conference, League};

/// Pool the draft order is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftScope {
    /// Every eliminated team in the league, worst record picks first
    #[default]
    League,
    /// Draft slot = rank among the conference's eliminated teams
    Conference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingConfig {
    /// 컨퍼런스당 와일드카드 수 (기본: 3)
    pub wildcard_slots: usize,
    /// 동률 처리 순서 (Alphabetical 이후 항목은 무시, 없으면 자동 추가)
    pub tie_breakers: Vec<TieBreaker>,
    pub draft_scope: DraftScope,
}

impl Default for SeedingConfig {
    fn default() -> Self {
        Self::nfl()
    }
}

impl SeedingConfig {
    pub fn nfl() -> Self {
        Self {
            wildcard_slots: 3,
            tie_breakers: vec![
                TieBreaker::HeadToHead,
                TieBreaker::DivisionRecord,
                TieBreaker::ConferenceRecord,
                TieBreaker::Alphabetical,
            ],
            draft_scope: DraftScope::League,
        }
    }

    /// Win percentage, then name. Useful when no split data exists.
    pub fn minimal(wildcard_slots: usize) -> Self {
        Self {
            wildcard_slots,
            tie_breakers: vec![TieBreaker::Alphabetical],
            draft_scope: DraftScope::League,
        }
    }

    /// The chain the resolver actually walks. Alphabetical always separates
    /// a group, so anything configured after it is dropped, and it is
    /// appended when missing.
    pub fn effective_chain(&self) -> Vec<TieBreaker> {
        let mut chain = Vec::with_capacity(self.tie_breakers.len() + 1);
        for tb in &self.tie_breakers {
            chain.push(*tb);
            if *tb == TieBreaker::Alphabetical {
                return chain;
            }
        }
        chain.push(TieBreaker::Alphabetical);
        chain
    }

    pub fn playoff_field_size(&self, divisions: usize) -> usize {
        divisions + self.wildcard_slots
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tie_breakers.is_empty() {
            return Err(ConfigError::EmptyTieBreakChain);
        }
        Ok(())
    }

    /// Checks that every conference can seat the configured field.
    pub fn validate_for(&self, league: &League) -> Result<(), ConfigError> {
        self.validate()?;
        for conference in Conference::ALL {
            let teams = league.conference_teams(conference).len();
            if teams == 0 {
                return Err(ConfigError::EmptyConference(conference));
            }
            let divisions = league.conference_divisions(conference).count();
            if self.playoff_field_size(divisions) > teams {
                return Err(ConfigError::PlayoffFieldMismatch {
                    conference,
                    teams,
                    divisions,
                    wildcard_slots: self.wildcard_slots,
                });
            }
        }
        Ok(())
    }
}
