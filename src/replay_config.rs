use crate::data_processing::History;
use crate::error::{ReplayError, Result};
use crate::metrics::{NUM_METRICS, PerformanceReport, compute_metrics_custom};
use crate::systems::{
    EventReport, Glicko, INITIAL_RATING, INITIAL_RD, RD_TIME_FACTOR, TeamRatings, TeamsById,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

fn initial_rating() -> f64 {
    INITIAL_RATING
}

fn initial_rd() -> f64 {
    INITIAL_RD
}

fn rd_time_factor() -> f64 {
    RD_TIME_FACTOR
}

fn output_dir() -> PathBuf {
    PathBuf::from("data/output")
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ReplayConfig {
    #[serde(default = "initial_rating")]
    pub initial_rating: f64,
    #[serde(default = "initial_rd")]
    pub initial_rd: f64,
    #[serde(default = "rd_time_factor")]
    pub rd_time_factor: f64,
    pub dataset_dir: PathBuf,
    #[serde(default = "output_dir")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub max_events: Option<usize>,
    /// Events before this index are replayed but left out of the metrics.
    #[serde(default)]
    pub eval_from_event: usize,
}

impl ReplayConfig {
    pub fn from_file(source: impl AsRef<Path>) -> Result<Self> {
        // json5 allows comments, which are handy for recording why a constant was picked
        let params_json = std::fs::read_to_string(source)?;
        Self::from_json5(&params_json)
    }

    pub fn from_json5(params_json: &str) -> Result<Self> {
        let config: Self =
            json5::from_str(params_json).map_err(|err| ReplayError::Config(err.to_string()))?;
        config.system()?;
        Ok(config)
    }

    /// The model constants, checked for sanity.
    pub fn system(&self) -> Result<Glicko> {
        if !(self.initial_rd > 0. && self.initial_rd.is_finite()) {
            return Err(ReplayError::Config(format!(
                "initial_rd must be positive and finite, got {}",
                self.initial_rd
            )));
        }
        if !(self.rd_time_factor >= 0. && self.rd_time_factor.is_finite()) {
            return Err(ReplayError::Config(format!(
                "rd_time_factor must be non-negative and finite, got {}",
                self.rd_time_factor
            )));
        }
        if !self.initial_rating.is_finite() {
            return Err(ReplayError::Config(format!(
                "initial_rating must be finite, got {}",
                self.initial_rating
            )));
        }
        Ok(Glicko {
            initial_rating: self.initial_rating,
            initial_rd: self.initial_rd,
            rd_time_factor: self.rd_time_factor,
        })
    }
}

#[derive(Debug)]
pub struct Replay {
    pub system: Glicko,
    pub history: History,
    pub eval_from_event: usize,
}

impl Replay {
    pub fn new(system: Glicko, history: History) -> Self {
        Self {
            system,
            history,
            eval_from_event: 0,
        }
    }

    pub fn from_config(config: &ReplayConfig) -> Result<Self> {
        tracing::info!("Loading rating system:\n{:?}", config);
        let system = config.system()?;
        let mut history = History::from_dir(&config.dataset_dir)?;
        if let Some(max_events) = config.max_events {
            history.truncate(max_events);
        }
        Ok(Self {
            system,
            history,
            eval_from_event: config.eval_from_event,
        })
    }

    pub fn from_file(source: impl AsRef<Path>) -> Result<Self> {
        Self::from_config(&ReplayConfig::from_file(source)?)
    }

    /// Replays the whole history from scratch. Stops at the first invalid event.
    pub fn eval(&self) -> Result<ReplayResults> {
        let mut ratings = TeamRatings::new(self.system, &self.history.teams)?;
        let mut avg_perf = PerformanceReport::new(NUM_METRICS);
        let mut event_reports = Vec::with_capacity(self.history.events.len());

        let now = std::time::Instant::now();
        for event in &self.history.events {
            let report = ratings.simulate_event(event)?;
            // The "before" ratings precede this event's update, so they are fair predictions
            if report.event_index >= self.eval_from_event {
                avg_perf += compute_metrics_custom(&report);
            }
            event_reports.push(report);
        }
        let secs_elapsed = now.elapsed().as_nanos() as f64 * 1e-9;

        Ok(ReplayResults {
            teams: ratings.into_teams(),
            event_reports,
            avg_perf,
            secs_elapsed,
        })
    }
}

#[derive(Debug)]
pub struct ReplayResults {
    pub teams: TeamsById,
    pub event_reports: Vec<EventReport>,
    pub avg_perf: PerformanceReport,
    pub secs_elapsed: f64,
}
