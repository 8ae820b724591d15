//! Glicko system details: https://en.wikipedia.org/wiki/Glicko_rating_system
//!
//! Each event acts as one rating period. A team's RD grows with the months since its
//! last event, then all of its games in the event are applied as one batch.

use super::{Rating, Team};
use crate::data_processing::Period;
use crate::numerical::{GLICKO_Q, expectation, game_information, rd_weight};
use serde::{Deserialize, Serialize};

pub const INITIAL_RATING: f64 = 1500.;
pub const INITIAL_RD: f64 = 350.;
/// Also known as c. Fitted for good predictions on past games.
pub const RD_TIME_FACTOR: f64 = 26.5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Glicko {
    pub initial_rating: f64,
    /// Also the upper bound on any team's RD.
    pub initial_rd: f64,
    pub rd_time_factor: f64,
}

impl Default for Glicko {
    fn default() -> Self {
        Self {
            initial_rating: INITIAL_RATING,
            initial_rd: INITIAL_RD,
            rd_time_factor: RD_TIME_FACTOR,
        }
    }
}

impl Glicko {
    pub fn with_rd_time_factor(rd_time_factor: f64) -> Self {
        Self {
            rd_time_factor,
            ..Self::default()
        }
    }

    pub fn new_team(&self, name: impl Into<String>) -> Team {
        Team::with_rating(name, self.initial_rating, self.initial_rd)
    }

    /// RD after `elapsed_months` of inactivity, capped at the initial RD.
    pub fn decayed_rd(&self, rd: f64, elapsed_months: i64) -> f64 {
        debug_assert!(elapsed_months >= 0);
        let growth = self.rd_time_factor * self.rd_time_factor * elapsed_months as f64;
        (rd * rd + growth).sqrt().min(self.initial_rd)
    }

    /// Grows the team's RD for the time since it last played. Newcomers are left alone.
    pub fn decay(&self, team: &mut Team, period: Period) {
        if let Some(last_active) = team.last_active {
            let elapsed_months = period.months_since(&last_active);
            team.approx_posterior.rd = self.decayed_rd(team.approx_posterior.rd, elapsed_months);
        }
    }

    /// Rating after one event, given pre-event ratings of the team and of each game's opponent.
    /// Opponents met twice appear twice.
    pub fn updated_rating(&self, own: Rating, games: &[(Rating, f64)]) -> Rating {
        let mut info = 0.;
        let mut update = 0.;
        for &(foe, outcome) in games {
            let probability = expectation(own.mu, foe.mu, foe.rd);
            info += game_information(own.mu, foe.mu, foe.rd);
            update += rd_weight(foe.rd) * (outcome - probability);
        }

        // Compute new rating deviation
        let rd_inv_sq = own.rd.powi(-2) + GLICKO_Q * GLICKO_Q * info;
        let rd = rd_inv_sq.recip().sqrt();

        // Compute new rating
        let mu = own.mu + GLICKO_Q / rd_inv_sq * update;

        Rating { mu, rd }
    }
}
