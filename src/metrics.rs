use crate::numerical::expectation;
use crate::systems::EventReport;
use overload::overload;
use std::collections::HashMap;
use std::fmt;
use std::ops;

pub type WeightAndSum = (f64, f64);
/// The home side's predicted win probability, and the score it actually got.
pub type Prediction = (f64, f64);

// Keeps a saturated prediction from scoring an infinite penalty
const MIN_PROBABILITY: f64 = 1e-12;

pub const NUM_METRICS: usize = 2;

// A data structure for storing the various performance metrics we want to analyze
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceReport {
    pub metrics_wt_sum: Vec<WeightAndSum>,
}

impl fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let averaged: Vec<f64> = self.averages();
        write!(f, "{:?}", averaged)
    }
}

impl PerformanceReport {
    pub fn new(num_metrics: usize) -> Self {
        Self {
            metrics_wt_sum: vec![(0., 0.); num_metrics],
        }
    }

    /// Weighted mean of each metric; NaN for a metric that never received any weight.
    pub fn averages(&self) -> Vec<f64> {
        self.metrics_wt_sum
            .iter()
            .map(|&(wt, sum)| sum / wt)
            .collect()
    }
}

overload!((a: ?PerformanceReport) + (b: ?PerformanceReport) -> PerformanceReport {
    assert_eq!(a.metrics_wt_sum.len(), b.metrics_wt_sum.len());
    let metrics_wt_sum = a
        .metrics_wt_sum
        .iter()
        .zip(b.metrics_wt_sum.iter())
        .map(|((a_w, a_sum), (b_w, b_sum))| (a_w + b_w, a_sum + b_sum))
        .collect();
    PerformanceReport {
        metrics_wt_sum
    }
});

overload!((a: &mut PerformanceReport) += (b: ?PerformanceReport) {
    assert_eq!(a.metrics_wt_sum.len(), b.metrics_wt_sum.len());
    for ((a_w, a_sum), (b_w, b_sum)) in a.metrics_wt_sum.iter_mut().zip(b.metrics_wt_sum.iter()) {
        *a_w += b_w;
        *a_sum += b_sum;
    }
});

/// Predictions for every game of the event, made with the ratings the update started from.
pub fn event_predictions(report: &EventReport) -> Vec<Prediction> {
    let ratings: HashMap<_, _> = report
        .before
        .iter()
        .map(|snapshot| (snapshot.id, (snapshot.rating, snapshot.rd)))
        .collect();
    report
        .results
        .iter()
        .filter_map(|result| {
            let &(home_rating, _) = ratings.get(&result.home)?;
            let &(away_rating, away_rd) = ratings.get(&result.away)?;
            let probability = expectation(home_rating, away_rating, away_rd);
            Some((probability, result.outcome.home_score()))
        })
        .collect()
}

/// Base 2 cross-entropy of the predictions; draws are scored as a half-win target.
pub fn cross_entropy_metric(predictions: &[Prediction]) -> WeightAndSum {
    let sum_ce: f64 = predictions
        .iter()
        .map(|&(p, score)| {
            let p = p.clamp(MIN_PROBABILITY, 1. - MIN_PROBABILITY);
            -(score * p.log2() + (1. - score) * (1. - p).log2())
        })
        .sum();
    (predictions.len() as f64, sum_ce)
}

/// Percentage of decisive games whose winner was the favorite.
/// A coin-flip prediction gets half credit.
pub fn accuracy_metric(predictions: &[Prediction]) -> WeightAndSum {
    let mut wt = 0.;
    let mut correct = 0.;
    for &(p, score) in predictions {
        if score == 0.5 {
            continue;
        }
        wt += 1.;
        correct += if p == 0.5 {
            0.5
        } else if (p > 0.5) == (score > 0.5) {
            1.
        } else {
            0.
        };
    }
    (wt, 100. * correct)
}

// Meant to be modified manually to contain the desired metrics
pub fn compute_metrics_custom(report: &EventReport) -> PerformanceReport {
    let predictions = event_predictions(report);
    let metrics_wt_sum = vec![
        cross_entropy_metric(&predictions),
        accuracy_metric(&predictions),
    ];
    debug_assert_eq!(metrics_wt_sum.len(), NUM_METRICS);

    PerformanceReport { metrics_wt_sum }
}
