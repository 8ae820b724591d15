use crate::data_processing::{EventId, GameId, Period, TeamId};

pub type Result<T> = std::result::Result<T, ReplayError>;

/// Every way a replay can fail. None of these are recoverable: the first one aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("game {game} in event {event} refers to unknown team {team}")]
    UnknownTeam {
        event: EventId,
        game: GameId,
        team: TeamId,
    },
    #[error("game {game} in event {event} has team {team} playing against itself")]
    SameTeam {
        event: EventId,
        game: GameId,
        team: TeamId,
    },
    #[error("game {game} in event {event} is tied {goals}-{goals} with an unresolved tiebreak")]
    AmbiguousResult {
        event: EventId,
        game: GameId,
        goals: u32,
    },
    #[error("event {event} at {period} comes after an event at {previous}")]
    OrderingViolation {
        event: EventId,
        period: Period,
        previous: Period,
    },
    #[error("team {0} is listed more than once")]
    DuplicateTeam(TeamId),
    #[error("event {0} is listed more than once")]
    DuplicateEvent(EventId),
    #[error("game {game} refers to unknown event {event}")]
    UnknownEvent { event: EventId, game: GameId },
    #[error("event {event} has month {month}, expected 1 through 12")]
    InvalidMonth { event: EventId, month: u32 },
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
