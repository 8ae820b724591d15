mod team;

pub use team::{Team, TeamEvent};

use super::Glicko;
use crate::data_processing::{EventWithGames, Game, GameId, Period, TeamId, TeamRecord};
use crate::error::{ReplayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered by id, so that every pass over the teams is deterministic.
pub type TeamsById = BTreeMap<TeamId, Team>;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub mu: f64,
    pub rd: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Outcome {
    /// Determines the winner from the goals, falling back to the penalty shootout on a tie.
    /// A tie with penalties recorded for only one side (or neither) counts as a draw.
    pub fn of_game(game: &Game) -> Result<Self> {
        use std::cmp::Ordering::*;
        let penalties = game.p_goals_home.zip(game.p_goals_away);
        match game.goals_home.cmp(&game.goals_away) {
            Equal => match penalties {
                None => Ok(Outcome::Draw),
                Some((p_home, p_away)) => match p_home.cmp(&p_away) {
                    Greater => Ok(Outcome::HomeWin),
                    Less => Ok(Outcome::AwayWin),
                    Equal => Err(ReplayError::AmbiguousResult {
                        event: game.event_id,
                        game: game.id,
                        goals: game.goals_home,
                    }),
                },
            },
            decided => {
                if penalties.is_some() {
                    tracing::warn!(
                        "Ignoring penalty goals in game {} of event {}, which was decided {}-{}",
                        game.id,
                        game.event_id,
                        game.goals_home,
                        game.goals_away
                    );
                }
                Ok(if decided == Greater {
                    Outcome::HomeWin
                } else {
                    Outcome::AwayWin
                })
            }
        }
    }

    pub fn home_score(self) -> f64 {
        match self {
            Outcome::HomeWin => 1.,
            Outcome::Draw => 0.5,
            Outcome::AwayWin => 0.,
        }
    }
}

/// A validated game, reduced to what the rating update needs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameResult {
    pub game: GameId,
    pub home: TeamId,
    pub away: TeamId,
    pub outcome: Outcome,
}

impl GameResult {
    /// The opponent of `team` in this game and the score `team` earned against it.
    pub fn opponent_and_score(&self, team: TeamId) -> Option<(TeamId, f64)> {
        if team == self.home {
            Some((self.away, self.outcome.home_score()))
        } else if team == self.away {
            Some((self.home, 1. - self.outcome.home_score()))
        } else {
            None
        }
    }
}

/// One team's rating as seen by the reports.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub id: TeamId,
    pub name: String,
    pub rating: f64,
    pub rd: f64,
}

/// Sorts by descending rating. Equal ratings are ordered by team id.
pub fn sort_by_rating(snapshots: &mut [TeamSnapshot]) {
    snapshots.sort_by(|a, b| b.rating.total_cmp(&a.rating).then(a.id.cmp(&b.id)));
}

/// Snapshot of the given teams, best first.
pub fn roster_standings(teams: &TeamsById, roster: &[TeamId]) -> Vec<TeamSnapshot> {
    let mut standings: Vec<TeamSnapshot> = roster
        .iter()
        .filter_map(|id| teams.get(id).map(|team| (id, team)))
        .map(|(&id, team)| TeamSnapshot {
            id,
            name: team.name.clone(),
            rating: team.approx_posterior.mu,
            rd: team.approx_posterior.rd,
        })
        .collect();
    sort_by_rating(&mut standings);
    standings
}

/// What happened to the roster of one event.
#[derive(Clone, Debug)]
pub struct EventReport {
    pub event_index: usize,
    /// Post-decay, pre-update: the ratings every prediction for this event should use.
    pub before: Vec<TeamSnapshot>,
    pub after: Vec<TeamSnapshot>,
    pub results: Vec<GameResult>,
}

/// The live rating table, owned for the length of a replay.
///
/// Events are fed in chronological order. Each one moves through decay, a simultaneous
/// update computed from a frozen snapshot of the roster, and a commit.
#[derive(Clone, Debug)]
pub struct TeamRatings {
    system: Glicko,
    teams: TeamsById,
    last_period: Option<Period>,
    num_events: usize,
}

impl TeamRatings {
    /// Every known team starts at the system's initial rating, with no recorded activity.
    pub fn new(system: Glicko, records: &[TeamRecord]) -> Result<Self> {
        let mut teams = TeamsById::new();
        for record in records {
            if teams
                .insert(record.id, system.new_team(record.name.clone()))
                .is_some()
            {
                return Err(ReplayError::DuplicateTeam(record.id));
            }
        }
        Ok(Self {
            system,
            teams,
            last_period: None,
            num_events: 0,
        })
    }

    pub fn system(&self) -> &Glicko {
        &self.system
    }

    pub fn teams(&self) -> &TeamsById {
        &self.teams
    }

    pub fn get(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    pub fn num_events(&self) -> usize {
        self.num_events
    }

    pub fn into_teams(self) -> TeamsById {
        self.teams
    }

    /// Applies one event. On error, no team has been modified.
    pub fn simulate_event(&mut self, event: &EventWithGames) -> Result<EventReport> {
        let period = event.event.period();
        if let Some(previous) = self.last_period.filter(|&previous| period < previous) {
            return Err(ReplayError::OrderingViolation {
                event: event.event.id,
                period,
                previous,
            });
        }
        let results = self.validate_games(event)?;
        let roster = event.roster();
        let event_index = self.num_events;
        self.last_period = Some(period);
        self.num_events += 1;

        if roster.is_empty() {
            tracing::info!("Event {} ({}) has no games", event_index, event.event.name);
        }
        tracing::debug!(
            "Processing {:4} teams and{:5} games in{:5}th event: {}",
            roster.len(),
            results.len(),
            event_index,
            event.event.name
        );

        // 1. Grow RDs for the time each team has been away
        for id in &roster {
            if let Some(team) = self.teams.get_mut(id) {
                self.system.decay(team, period);
            }
        }
        let before = roster_standings(&self.teams, &roster);

        // 2. Compute every new rating from the same frozen snapshot
        let snapshot: BTreeMap<TeamId, Rating> = roster
            .iter()
            .filter_map(|id| self.teams.get(id).map(|team| (*id, team.approx_posterior)))
            .collect();
        let staged: Vec<(TeamId, Rating, TeamEvent)> = roster
            .iter()
            .map(|&id| {
                let mut record = TeamEvent {
                    event_index,
                    rating_mu: 0, // will be filled by Team::update_rating()
                    rating_rd: 0, // will be filled by Team::update_rating()
                    wins: 0,
                    draws: 0,
                    losses: 0,
                };
                let games: Vec<(Rating, f64)> = results
                    .iter()
                    .filter_map(|result| result.opponent_and_score(id))
                    .map(|(opponent, score)| {
                        match score {
                            s if s > 0.5 => record.wins += 1,
                            s if s < 0.5 => record.losses += 1,
                            _ => record.draws += 1,
                        }
                        (snapshot[&opponent], score)
                    })
                    .collect();
                let rating = self.system.updated_rating(snapshot[&id], &games);
                (id, rating, record)
            })
            .collect();

        // 3. Commit
        for (id, rating, record) in staged {
            if let Some(team) = self.teams.get_mut(&id) {
                team.update_rating(rating, period, record);
            }
        }
        let after = roster_standings(&self.teams, &roster);

        Ok(EventReport {
            event_index,
            before,
            after,
            results,
        })
    }

    fn validate_games(&self, event: &EventWithGames) -> Result<Vec<GameResult>> {
        event
            .games
            .iter()
            .map(|game| {
                for team in [game.home, game.away] {
                    if !self.teams.contains_key(&team) {
                        return Err(ReplayError::UnknownTeam {
                            event: event.event.id,
                            game: game.id,
                            team,
                        });
                    }
                }
                if game.home == game.away {
                    return Err(ReplayError::SameTeam {
                        event: event.event.id,
                        game: game.id,
                        team: game.home,
                    });
                }
                Ok(GameResult {
                    game: game.id,
                    home: game.home,
                    away: game.away,
                    outcome: Outcome::of_game(game)?,
                })
            })
            .collect()
    }
}
