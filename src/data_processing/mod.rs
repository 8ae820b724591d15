mod history;

pub use history::{EventWithGames, History};

use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fmt;
use std::path::Path;

pub type TeamId = u64;
pub type EventId = u64;
pub type GameId = u64;

/// A chronological key with one-month resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Whole months from `earlier` to `self`; negative if `earlier` is actually later.
    pub fn months_since(&self, earlier: &Period) -> i64 {
        (self.year as i64 - earlier.year as i64) * 12 + (self.month as i64 - earlier.month as i64)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// The identity of a team, as supplied by the data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub id: TeamId,
    pub name: String,
}

/// A dated gathering of games, e.g. a tournament or a league round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// A human-readable title for the event.
    pub name: String,
    pub year: i32,
    /// Calendar month, from 1 to 12.
    pub month: u32,
}

impl Event {
    pub fn new(id: EventId, name: impl Into<String>, year: i32, month: u32) -> Self {
        Self {
            id,
            name: name.into(),
            year,
            month,
        }
    }

    pub fn period(&self) -> Period {
        Period::new(self.year, self.month)
    }
}

/// A single two-sided game. Penalty goals are only present when a tied game went to a decider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Orders the games within an event.
    pub id: GameId,
    pub event_id: EventId,
    pub home: TeamId,
    pub away: TeamId,
    pub goals_home: u32,
    pub goals_away: u32,
    pub p_goals_home: Option<u32>,
    pub p_goals_away: Option<u32>,
}

impl Game {
    /// A game decided in regular play, useful for testing.
    pub fn new(
        id: GameId,
        event_id: EventId,
        (home, away): (TeamId, TeamId),
        (goals_home, goals_away): (u32, u32),
    ) -> Self {
        Self {
            id,
            event_id,
            home,
            away,
            goals_home,
            goals_away,
            p_goals_home: None,
            p_goals_away: None,
        }
    }

    /// Attach a penalty shootout score.
    pub fn with_penalties(mut self, p_goals_home: u32, p_goals_away: u32) -> Self {
        self.p_goals_home = Some(p_goals_home);
        self.p_goals_away = Some(p_goals_away);
        self
    }
}

/// Compressed summary of an event, for the reports.
#[derive(Serialize, Deserialize)]
pub struct EventSummary {
    pub index: usize,
    pub id: EventId,
    pub name: String,
    pub year: i32,
    pub month: u32,
    pub num_games: usize,
    pub num_teams: usize,
}

impl EventSummary {
    pub fn new(index: usize, event: &EventWithGames) -> Self {
        Self {
            index,
            id: event.event.id,
            name: event.event.name.clone(),
            year: event.event.year,
            month: event.event.month,
            num_games: event.games.len(),
            num_teams: event.roster().len(),
        }
    }
}

pub fn read_csv<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let records: Vec<T> = csv::Reader::from_path(path)?
        .deserialize()
        .collect::<std::result::Result<_, csv::Error>>()?;
    Ok(records)
}

fn write_to_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(&value)?;
    std::fs::write(path.as_ref(), json)?;
    Ok(())
}

fn write_to_csv<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    let mut writer = csv::Writer::from_writer(file);
    values.iter().try_for_each(|val| writer.serialize(val))?;
    writer.flush()?;
    Ok(())
}

/// Writes the values as JSON or CSV, depending on the file extension.
pub fn try_write_slice_to_file<T: Serialize>(values: &[T], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => write_to_json(values, path),
        Some("csv") => write_to_csv(values, path),
        _ => Err(ReplayError::Config(format!(
            "invalid or missing filename extension in {:?}",
            path
        ))),
    }
}

pub fn write_slice_to_file<T: Serialize>(values: &[T], path: impl AsRef<Path>) {
    let path = path.as_ref();
    match try_write_slice_to_file(values, path) {
        Ok(()) => tracing::info!("Successfully wrote to {:?}", path),
        Err(err) => tracing::error!("WARNING: failed write to {:?} because {}", path, err),
    };
}
