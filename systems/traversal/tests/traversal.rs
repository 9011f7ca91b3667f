use treasure_maze_core::{CellCoord, CellKind, Route, StepRecord, TraversalState, INITIAL_GOLD};
use treasure_maze_system_traversal::{Traversal, TraversalConfig};
use treasure_maze_world::{query, Maze};

fn maze(layout: &str) -> Maze {
    Maze::from_layout(layout).expect("valid layout")
}

fn walk(maze: &mut Maze, config: TraversalConfig, goals: Vec<CellCoord>) -> Vec<StepRecord> {
    let start = query::start(maze);
    let mut traversal = Traversal::new(config, start, &Route::new(goals, 0));
    traversal.run_to_end(maze).expect("traversal")
}

#[test]
fn damage_tile_hurts_once_and_is_cleared() {
    let mut maze = maze(
        "
        PDT
        ###
        ...
        ",
    );

    let records = walk(&mut maze, TraversalConfig::default(), vec![CellCoord::new(2, 0)]);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].position, CellCoord::new(1, 0));
    assert_eq!(records[0].triggered, Some(CellKind::Damage));
    assert_eq!(records[0].health, 85);
    assert_eq!(records[0].state, TraversalState::Damaged);

    assert_eq!(records[1].position, CellCoord::new(2, 0));
    assert_eq!(records[1].triggered, Some(CellKind::Treasure));
    assert_eq!(records[1].health, 85);
    assert_eq!(records[1].treasures_collected, 1);
    assert_eq!(records[1].state, TraversalState::AllTreasuresVisited);

    assert_eq!(query::kind(&maze, CellCoord::new(1, 0)), Some(CellKind::Free));
    assert_eq!(query::kind(&maze, CellCoord::new(2, 0)), Some(CellKind::Free));
}

#[test]
fn gold_is_collected_once_when_walking_back() {
    let mut maze = maze(
        "
        PGT
        ###
        ...
        ",
    );

    let records = walk(
        &mut maze,
        TraversalConfig::default(),
        vec![CellCoord::new(2, 0), CellCoord::new(0, 0)],
    );

    let golds: Vec<i32> = records.iter().map(|record| record.gold).collect();
    assert_eq!(golds, vec![INITIAL_GOLD + 10; 4]);
    assert_eq!(records[0].state, TraversalState::Collected);
    assert_eq!(records[1].state, TraversalState::Collected);
    assert_eq!(records[2].triggered, None);
    assert_eq!(records[2].state, TraversalState::Traveling);
    assert_eq!(records[3].position, CellCoord::new(0, 0));
    assert_eq!(records[3].state, TraversalState::AllTreasuresVisited);
}

#[test]
fn fourth_damage_hit_ends_the_expedition() {
    let mut maze = maze(
        "
        PDDDDT
        ######
        ......
        ......
        ......
        ......
        ",
    );
    let start = query::start(&maze);
    let route = Route::new(vec![CellCoord::new(5, 0)], 5);
    let mut traversal = Traversal::new(TraversalConfig::default(), start, &route);

    let mut healths = Vec::new();
    while let Some(record) = traversal.step(&mut maze).expect("step") {
        healths.push((record.health, record.state));
    }

    assert_eq!(
        healths,
        vec![
            (85, TraversalState::Damaged),
            (70, TraversalState::Damaged),
            (55, TraversalState::Damaged),
            (40, TraversalState::LowHealth),
        ]
    );
    assert!(traversal.is_finished());
    assert_eq!(traversal.step(&mut maze), Ok(None));
    assert_eq!(traversal.agent().position, CellCoord::new(4, 0));
    assert_eq!(
        query::kind(&maze, CellCoord::new(5, 0)),
        Some(CellKind::Treasure)
    );
}

#[test]
fn health_equal_to_minimum_survives() {
    let mut maze = maze(
        "
        PDDT
        ####
        ....
        ....
        ",
    );
    let config = TraversalConfig {
        damage_penalty: 25,
        ..TraversalConfig::default()
    };

    let records = walk(&mut maze, config, vec![CellCoord::new(3, 0)]);

    let last = records.last().expect("records");
    assert_eq!(last.health, 50);
    assert_eq!(last.state, TraversalState::AllTreasuresVisited);
}

#[test]
fn legs_follow_the_live_grid() {
    let mut maze = maze(
        "
        P.T
        ...
        D.T
        ",
    );

    let records = walk(
        &mut maze,
        TraversalConfig::default(),
        vec![CellCoord::new(2, 0), CellCoord::new(2, 2)],
    );

    let mut previous = query::start(&maze);
    for record in &records {
        assert!(previous.is_adjacent(record.position), "{record:?}");
        previous = record.position;
    }
    assert_eq!(records.len(), 4);
    assert_eq!(records[3].treasures_collected, 2);
    assert_eq!(records[3].state, TraversalState::AllTreasuresVisited);
    assert_eq!(query::count(&maze, CellKind::Treasure), 0);
    assert_eq!(query::kind(&maze, CellCoord::new(0, 2)), Some(CellKind::Damage));
}
