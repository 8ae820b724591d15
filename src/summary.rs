use crate::data_processing::{Event, TeamId, try_write_slice_to_file};
use crate::error::Result;
use crate::systems::{EventReport, TeamEvent, TeamSnapshot, TeamsById, sort_by_rating};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSummary {
    pub rank: usize,
    pub id: TeamId,
    pub name: String,
    pub rating: f64,
    pub rd: f64,
    pub num_events: usize,
    pub num_games: usize,
    pub max_rating: Option<i32>,
}

/// All teams, best first, with 1-based ranks. Teams that never played are ranked too.
pub fn make_leaderboard(teams: &TeamsById) -> Vec<TeamSummary> {
    let mut snapshots: Vec<TeamSnapshot> = teams
        .iter()
        .map(|(&id, team)| TeamSnapshot {
            id,
            name: team.name.clone(),
            rating: team.approx_posterior.mu,
            rd: team.approx_posterior.rd,
        })
        .collect();
    sort_by_rating(&mut snapshots);

    snapshots
        .into_iter()
        .enumerate()
        .map(|(i, snapshot)| {
            let history = &teams[&snapshot.id].event_history;
            TeamSummary {
                rank: i + 1,
                id: snapshot.id,
                name: snapshot.name,
                rating: snapshot.rating,
                rd: snapshot.rd,
                num_events: history.len(),
                num_games: history.iter().map(TeamEvent::num_games).sum(),
                max_rating: history.iter().map(|ev| ev.rating_mu).max(),
            }
        })
        .collect()
}

fn print_standings(standings: &[TeamSnapshot]) {
    for team in standings {
        tracing::info!("  {}: {}, {}", team.name, team.rating, team.rd);
    }
}

pub fn print_event_report(event: &Event, report: &EventReport) {
    tracing::info!(
        "# Before {} {} (RD already updated)",
        event.name,
        event.year
    );
    print_standings(&report.before);
    tracing::info!("# After {} {}", event.name, event.year);
    print_standings(&report.after);
}

/// Logs the final ranking and writes it to `all_teams.csv` in the given directory.
pub fn print_ratings(teams: &TeamsById, dir: impl AsRef<Path>) -> Result<Vec<TeamSummary>> {
    let leaderboard = make_leaderboard(teams);

    // RDs here are as of each team's last event, without the uncertainty gained since
    tracing::info!("# Final Ratings");
    for team in &leaderboard {
        tracing::info!("{:02}:  {} - {}", team.rank, team.name, team.rating);
    }

    let filename = dir.as_ref().join("all_teams.csv");
    try_write_slice_to_file(&leaderboard, &filename)?;
    tracing::info!("Successfully wrote to {:?}", filename);
    Ok(leaderboard)
}
