//! Deterministic playoff seeding
//!
//! - `tiebreak`: the configurable comparator chain and the ranking loop
//! - `resolver`: division winners, wildcards, elimination and draft order

mod resolver;
mod tiebreak;

pub use resolver::{SeedingResolver, SeedingResult};
pub use tiebreak::{RankContext, Ranking, TieBreaker};
