use super::Rating;
use crate::data_processing::Period;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamEvent {
    pub event_index: usize,
    pub rating_mu: i32,
    pub rating_rd: i32,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

impl TeamEvent {
    pub fn num_games(&self) -> usize {
        self.wins + self.draws + self.losses
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub approx_posterior: Rating,
    /// The period of the last event this team played in, if any.
    pub last_active: Option<Period>,
    pub event_history: Vec<TeamEvent>,
}

impl Team {
    pub fn with_rating(name: impl Into<String>, mu: f64, rd: f64) -> Self {
        Team {
            name: name.into(),
            approx_posterior: Rating { mu, rd },
            last_active: None,
            event_history: vec![],
        }
    }

    /// Installs the post-event rating and records the event in the team's history.
    pub fn update_rating(&mut self, rating: Rating, period: Period, mut record: TeamEvent) {
        self.approx_posterior = rating;
        self.last_active = Some(period);
        record.rating_mu = rating.mu.round() as i32;
        record.rating_rd = rating.rd.round() as i32;
        self.event_history.push(record);
    }
}
