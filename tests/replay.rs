use claims::{assert_err, assert_ok};
use std::path::Path;
use team_glicko::ReplayError;
use team_glicko::data_processing::{
    Event, EventWithGames, Game, History, TeamRecord, try_write_slice_to_file,
};
use team_glicko::replay_config::{Replay, ReplayConfig};
use team_glicko::summary::make_leaderboard;
use team_glicko::systems::{Glicko, INITIAL_RD, TeamSnapshot};

fn team(id: u64, name: &str) -> TeamRecord {
    TeamRecord {
        id,
        name: name.into(),
    }
}

fn league() -> (Vec<TeamRecord>, Vec<Event>, Vec<Game>) {
    let teams = vec![
        team(1, "Harbour"),
        team(2, "Millers"),
        team(3, "Rangers"),
        team(4, "Saints"),
        team(5, "Wanderers"),
    ];
    // Deliberately listed out of chronological order
    let events = vec![
        Event::new(30, "Autumn Cup", 2020, 10),
        Event::new(10, "Winter Cup", 2019, 1),
        Event::new(20, "Spring Cup", 2019, 4),
        Event::new(40, "Winter Cup", 2021, 1),
    ];
    let games = vec![
        Game::new(1, 10, (1, 2), (2, 0)),
        Game::new(2, 10, (3, 4), (1, 1)),
        Game::new(3, 10, (1, 3), (0, 0)).with_penalties(5, 4),
        Game::new(4, 20, (2, 4), (3, 2)),
        Game::new(5, 20, (4, 2), (1, 1)),
        Game::new(6, 30, (1, 4), (0, 1)),
        Game::new(7, 30, (2, 3), (2, 2)),
        Game::new(8, 30, (3, 1), (1, 2)),
        Game::new(9, 40, (2, 1), (1, 1)).with_penalties(3, 1),
        Game::new(10, 40, (3, 4), (0, 2)),
    ];
    (teams, events, games)
}

fn write_dataset(dir: &Path, (teams, events, games): (Vec<TeamRecord>, Vec<Event>, Vec<Game>)) {
    try_write_slice_to_file(&teams, dir.join("teams.csv")).unwrap();
    try_write_slice_to_file(&events, dir.join("events.csv")).unwrap();
    try_write_slice_to_file(&games, dir.join("games.csv")).unwrap();
}

#[test]
fn replay_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_dataset(dir.path(), league());
    let config_file = dir.path().join("replay.json5");
    std::fs::write(
        &config_file,
        format!("{{ dataset_dir: {:?}, eval_from_event: 1 }}", dir.path()),
    )
    .unwrap();

    let replay = assert_ok!(Replay::from_file(&config_file));
    let order: Vec<_> = replay.history.events.iter().map(|ev| ev.event.id).collect();
    assert_eq!(order, vec![10, 20, 30, 40]);

    let results = assert_ok!(replay.eval());
    assert_eq!(results.event_reports.len(), 4);
    assert_eq!(results.teams.len(), 5);

    // Wanderers never played
    let idle = &results.teams[&5];
    assert_eq!(idle.approx_posterior.mu, 1500.);
    assert_eq!(idle.approx_posterior.rd, INITIAL_RD);
    assert!(idle.last_active.is_none());

    for team in results.teams.values() {
        assert!(team.approx_posterior.rd > 0.);
        assert!(team.approx_posterior.rd <= INITIAL_RD);
    }
    for report in &results.event_reports {
        for w in report.after.windows(2) {
            assert!(w[0].rating >= w[1].rating);
        }
    }

    let averages = results.avg_perf.averages();
    assert!(averages[0].is_finite() && averages[0] > 0.);
}

#[test]
fn replay_is_deterministic() {
    let (teams, events, games) = league();
    let history = History::from_records(teams, events, games).unwrap();
    let first = Replay::new(Glicko::default(), history.clone()).eval().unwrap();
    let second = Replay::new(Glicko::default(), history).eval().unwrap();
    assert_eq!(first.teams, second.teams);
    assert_eq!(make_leaderboard(&first.teams), make_leaderboard(&second.teams));
}

#[test]
fn two_team_opener() {
    let history = History::new(
        vec![team(1, "Home"), team(2, "Away")],
        vec![EventWithGames::new(
            Event::new(1, "Opener", 2020, 1),
            vec![Game::new(1, 1, (1, 2), (2, 0))],
        )],
    );
    let results = Replay::new(Glicko::default(), history).eval().unwrap();
    let home = results.teams[&1].approx_posterior;
    let away = results.teams[&2].approx_posterior;
    assert!(home.mu > 1500.);
    assert!(away.mu < 1500.);
    assert!(home.rd < 350. && away.rd < 350.);

    let leaderboard = make_leaderboard(&results.teams);
    assert_eq!(leaderboard[0].rank, 1);
    assert_eq!(leaderboard[0].name, "Home");
    assert_eq!(leaderboard[1].rank, 2);
}

#[test]
fn shootout_decides_the_game() {
    let shootout = Game::new(1, 1, (1, 2), (1, 1)).with_penalties(5, 4);
    let draw = Game::new(1, 1, (1, 2), (1, 1));
    let play = |game: Game| {
        let history = History::new(
            vec![team(1, "Home"), team(2, "Away")],
            vec![EventWithGames::new(Event::new(1, "Final", 2020, 6), vec![game])],
        );
        Replay::new(Glicko::default(), history).eval().unwrap()
    };

    let decided = play(shootout);
    assert!(decided.teams[&1].approx_posterior.mu > 1500.);
    assert_eq!(decided.teams[&1].event_history[0].wins, 1);
    assert_eq!(decided.teams[&2].event_history[0].losses, 1);

    let drawn = play(draw);
    assert!((drawn.teams[&1].approx_posterior.mu - 1500.).abs() < 1e-9);
    assert_eq!(drawn.teams[&1].event_history[0].draws, 1);
}

#[test]
fn year_long_break_grows_rd() {
    let system = Glicko::default();
    let mut teams = vec![team(1, "Returning")];
    teams.extend((2..=60).map(|id| team(id, "Sparring")));
    // Many games against fresh opponents shrink the RD well below its initial value
    let games: Vec<Game> = (2..=60).map(|id| Game::new(id, 1, (1, id), (1, 1))).collect();
    let history = History::new(
        teams,
        vec![
            EventWithGames::new(Event::new(1, "Marathon", 2020, 1), games),
            EventWithGames::new(
                Event::new(2, "Rematch", 2021, 1),
                vec![Game::new(100, 2, (1, 2), (0, 1))],
            ),
        ],
    );
    let results = Replay::new(system, history).eval().unwrap();
    let rd_of_returning = |standings: &[TeamSnapshot]| {
        standings.iter().find(|s| s.id == 1).unwrap().rd
    };
    let rd_after_marathon = rd_of_returning(&results.event_reports[0].after);
    let rd_before_rematch = rd_of_returning(&results.event_reports[1].before);
    assert!(rd_after_marathon < 100.);
    assert!((rd_before_rematch - system.decayed_rd(rd_after_marathon, 12)).abs() < 1e-9);
    assert!(rd_before_rematch > rd_after_marathon);
    assert!(rd_before_rematch < INITIAL_RD);
}

#[test]
fn invalid_game_aborts_the_replay() {
    let (teams, events, mut games) = league();
    games.push(Game::new(11, 30, (2, 77), (1, 0)));
    let history = History::from_records(teams, events, games).unwrap();
    let err = assert_err!(Replay::new(Glicko::default(), history).eval());
    assert!(matches!(
        err,
        ReplayError::UnknownTeam {
            event: 30,
            game: 11,
            team: 77
        }
    ));
}

#[test]
fn unresolved_shootout_aborts_the_replay() {
    let (teams, events, mut games) = league();
    games.push(Game::new(12, 40, (1, 5), (2, 2)).with_penalties(3, 3));
    let history = History::from_records(teams, events, games).unwrap();
    let err = assert_err!(Replay::new(Glicko::default(), history).eval());
    assert!(matches!(err, ReplayError::AmbiguousResult { game: 12, .. }));
}

#[test]
fn unsorted_in_memory_history_is_rejected() {
    let history = History::new(
        vec![team(1, "A"), team(2, "B")],
        vec![
            EventWithGames::new(Event::new(1, "Later", 2020, 2), vec![]),
            EventWithGames::new(Event::new(2, "Earlier", 2019, 11), vec![]),
        ],
    );
    let err = assert_err!(Replay::new(Glicko::default(), history).eval());
    assert!(matches!(err, ReplayError::OrderingViolation { event: 2, .. }));
}

#[test]
fn config_with_missing_dataset_fails() {
    let config = ReplayConfig::from_json5("{ dataset_dir: '/nonexistent/dataset' }").unwrap();
    assert_err!(Replay::from_config(&config));
}
