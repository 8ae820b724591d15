use rayon::prelude::*;
use team_glicko::data_processing::History;
use team_glicko::replay_config::Replay;
use team_glicko::systems::Glicko;

fn log_space(
    mut lo: f64,
    mut hi: f64,
    steps: usize,
    resolution: f64,
) -> impl Iterator<Item = f64> + Clone {
    assert!(lo < hi && steps > 1);
    lo = lo.ln();
    hi = hi.ln();
    let mult = ((steps - 1) as f64).recip();
    let exp_with_rounding = move |x: f64| (x.exp() / resolution).round() * resolution;
    (0..steps).map(move |i| exp_with_rounding(lo + i as f64 * mult * (hi - lo)))
}

fn main() {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        tracing::error!("Usage: {} dataset_dir", args[0]);
        return;
    }
    let history = match History::from_dir(&args[1]) {
        Ok(history) => history,
        Err(err) => {
            tracing::error!("Failed to load {}: {}", args[1], err);
            return;
        }
    };

    // The first tenth of the events only warms up the ratings
    let eval_from_event = history.events.len() / 10;
    let mut systems: Vec<Glicko> = log_space(2., 120., 25, 0.5)
        .map(Glicko::with_rd_time_factor)
        .collect();
    systems.dedup();

    let mut outcomes: Vec<(Glicko, Vec<f64>)> = systems
        .into_par_iter()
        .filter_map(|system| {
            let replay = Replay {
                system,
                history: history.clone(),
                eval_from_event,
            };
            match replay.eval() {
                Ok(results) => {
                    let horizontal = "============================================================";
                    tracing::info!(
                        "{:?}: {}, {}s, {} events\n{}",
                        replay.system,
                        results.avg_perf,
                        results.secs_elapsed,
                        replay.history.events.len(),
                        horizontal
                    );
                    Some((replay.system, results.avg_perf.averages()))
                }
                Err(err) => {
                    tracing::error!("{:?} failed: {}", replay.system, err);
                    None
                }
            }
        })
        .collect();

    // Lowest cross-entropy first
    outcomes.sort_by(|a, b| a.1[0].total_cmp(&b.1[0]));
    if let Some((best, metrics)) = outcomes.first() {
        tracing::info!("Best rd_time_factor = {}: {:?}", best.rd_time_factor, metrics);
    }
}
