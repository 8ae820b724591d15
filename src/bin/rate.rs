use anyhow::Context;
use team_glicko::data_processing::{EventSummary, try_write_slice_to_file, write_slice_to_file};
use team_glicko::replay_config::{Replay, ReplayConfig};
use team_glicko::summary::{print_event_report, print_ratings};

/// Replays the entire history of a competition and reports the standings
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Parse arguments, prepare rating system and dataset
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        tracing::error!("Usage: {} config_file", args[0]);
        return Ok(());
    }
    let config = ReplayConfig::from_file(&args[1])
        .with_context(|| format!("Failed to load config from {}", args[1]))?;
    let replay = Replay::from_config(&config).context("Failed to load dataset")?;

    // Simulate the events and rating updates
    let results = replay.eval().context("Replay aborted")?;
    for (event, report) in replay.history.events.iter().zip(&results.event_reports) {
        print_event_report(&event.event, report);
    }
    tracing::info!(
        "{:?}: {}\nFinished in {} seconds.",
        replay.system,
        results.avg_perf,
        results.secs_elapsed,
    );

    let dir = &config.output_dir;
    std::fs::create_dir_all(dir.join("teams")).context("Could not create output directory")?;

    // Print event histories of all teams to <output_dir>/teams/{id}.csv
    for (id, team) in &results.teams {
        let team_file = dir.join(format!("teams/{}.csv", id));
        write_slice_to_file(&team.event_history, &team_file);
    }

    let summaries: Vec<EventSummary> = replay
        .history
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| EventSummary::new(index, event))
        .collect();
    try_write_slice_to_file(&summaries, dir.join("events.csv"))?;

    // Print ratings list to <output_dir>/all_teams.csv
    print_ratings(&results.teams, dir)?;
    Ok(())
}
