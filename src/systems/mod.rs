mod common;
mod glicko;

pub use common::{
    EventReport, GameResult, Outcome, Rating, Team, TeamEvent, TeamRatings, TeamSnapshot,
    TeamsById, roster_standings, sort_by_rating,
};
pub use glicko::{Glicko, INITIAL_RATING, INITIAL_RD, RD_TIME_FACTOR};
