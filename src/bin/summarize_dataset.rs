use std::cmp::Reverse;
use std::collections::HashMap;
use team_glicko::data_processing::{
    EventSummary, History, TeamId, try_write_slice_to_file,
};

fn summarize(history: &History) -> (Vec<EventSummary>, Vec<(TeamId, usize)>, usize, f64, usize) {
    if history.events.is_empty() {
        return (vec![], vec![], 0, 0., 0);
    }

    let mut summaries = vec![];
    let mut t_count = HashMap::<TeamId, usize>::new();
    let mut t_min = usize::MAX;
    let mut t_max = 0;
    let mut t_total = 0;
    for (index, event) in history.events.iter().enumerate() {
        summaries.push(EventSummary::new(index, event));
        let roster = event.roster();
        for &id in &roster {
            *t_count.entry(id).or_default() += 1;
        }

        t_min = t_min.min(roster.len());
        t_max = t_max.max(roster.len());
        t_total += roster.len();
    }

    let mut by_experience: Vec<_> = t_count.into_iter().collect();
    by_experience.sort_unstable_by_key(|&(id, count)| (Reverse(count), id));
    let t_mean = t_total as f64 / history.events.len() as f64;

    (summaries, by_experience, t_min, t_mean, t_max)
}

fn main() {
    tracing_subscriber::fmt::init();

    // Parse arguments and prepare the dataset
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        tracing::error!("Usage: {} dataset_dir", args[0]);
        return;
    }
    let dir = std::path::PathBuf::from(&args[1]);
    let history = match History::from_dir(&dir) {
        Ok(history) => history,
        Err(err) => {
            tracing::error!("Failed to load {:?}: {}", dir, err);
            return;
        }
    };

    if history.events.is_empty() {
        tracing::warn!("No events found at {:?}", dir);
    }
    let (summaries, by_experience, t_min, t_mean, t_max) = summarize(&history);

    tracing::info!("Number of events = {}", history.events.len());
    tracing::info!("Number of games = {}", history.num_games());
    tracing::info!(
        "Number of teams = {}, of which {} ever played",
        history.teams.len(),
        by_experience.len()
    );
    tracing::info!("Mean teams per event = {}", t_mean);
    tracing::info!("Min teams = {}, Max teams = {}", t_min, t_max);

    // Write event summaries to {dataset_dir}/all_events.csv
    let summary_file = dir.join("all_events.csv");
    if let Err(err) = try_write_slice_to_file(&summaries, &summary_file) {
        tracing::error!("Failed to write {:?}: {}", summary_file, err);
    }

    // Sort teams in descending order of experience in {dataset_dir}/teams_by_experience.csv
    let experienced_teams_file = dir.join("teams_by_experience.csv");
    if let Err(err) = try_write_slice_to_file(&by_experience, &experienced_teams_file) {
        tracing::error!("Failed to write {:?}: {}", experienced_teams_file, err);
    }
}
