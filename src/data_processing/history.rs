use super::{Event, Game, TeamId, TeamRecord, read_csv};
use crate::error::{ReplayError, Result};
use itertools::Itertools;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;

/// An event together with its games, in the order they were played.
#[derive(Clone, Debug)]
pub struct EventWithGames {
    pub event: Event,
    pub games: Vec<Game>,
}

impl EventWithGames {
    pub fn new(event: Event, games: Vec<Game>) -> Self {
        Self { event, games }
    }

    /// Every team that appears in at least one game of this event, in ascending id order.
    pub fn roster(&self) -> Vec<TeamId> {
        self.games
            .iter()
            .flat_map(|game| [game.home, game.away])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// The complete, in-memory record of a competition: team identities and chronological events.
#[derive(Clone, Debug, Default)]
pub struct History {
    pub teams: Vec<TeamRecord>,
    pub events: Vec<EventWithGames>,
}

impl History {
    /// Takes the events in the given order; the replay will reject them if they're out of order.
    pub fn new(teams: Vec<TeamRecord>, events: Vec<EventWithGames>) -> Self {
        Self { teams, events }
    }

    /// Reads `teams.csv`, `events.csv` and `games.csv` from a dataset directory.
    pub fn from_dir(dataset_dir: impl AsRef<Path>) -> Result<Self> {
        let dataset_dir = dataset_dir.as_ref();
        let teams: Vec<TeamRecord> = read_csv(dataset_dir.join("teams.csv"))?;
        let events: Vec<Event> = read_csv(dataset_dir.join("events.csv"))?;
        let games: Vec<Game> = read_csv(dataset_dir.join("games.csv"))?;
        tracing::info!(
            "Found {} teams, {} events and {} games at {:?}",
            teams.len(),
            events.len(),
            games.len(),
            dataset_dir
        );
        Self::from_records(teams, events, games)
    }

    /// Sorts events chronologically (stable for equal periods) and attaches each game to its event.
    pub fn from_records(
        teams: Vec<TeamRecord>,
        mut events: Vec<Event>,
        mut games: Vec<Game>,
    ) -> Result<Self> {
        if let Some(event) = events.iter().find(|ev| !(1..=12).contains(&ev.month)) {
            return Err(ReplayError::InvalidMonth {
                event: event.id,
                month: event.month,
            });
        }
        let mut event_ids = HashSet::with_capacity(events.len());
        for event in &events {
            if !event_ids.insert(event.id) {
                return Err(ReplayError::DuplicateEvent(event.id));
            }
        }
        games.sort_by_key(|game| (game.event_id, game.id));
        if let Some(game) = games.iter().find(|game| !event_ids.contains(&game.event_id)) {
            return Err(ReplayError::UnknownEvent {
                event: game.event_id,
                game: game.id,
            });
        }

        events.sort_by_key(Event::period);
        let mut games_by_event = games.into_iter().into_group_map_by(|game| game.event_id);
        let events = events
            .into_iter()
            .map(|event| {
                let games = games_by_event.remove(&event.id).unwrap_or_default();
                EventWithGames::new(event, games)
            })
            .collect();

        Ok(Self { teams, events })
    }

    pub fn num_games(&self) -> usize {
        self.events.iter().map(|ev| ev.games.len()).sum()
    }

    /// Keep only the first `max_events` events.
    pub fn truncate(&mut self, max_events: usize) {
        self.events.truncate(max_events);
    }
}
