pub mod game;
pub mod league;
pub mod team;

pub use game::{Game, GameStatus, Outcome, Week};
pub use league::{CompletedGame, Division, League, ScheduledGame, TeamId};
pub use team::{Conference, Record, Team, DEFAULT_RATING};
