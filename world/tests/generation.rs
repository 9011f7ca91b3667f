use rand::{rngs::mock::StepRng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use treasure_maze_core::{CellCoord, CellKind};
use treasure_maze_world::{generate, query, GenerationConfig, OverlapPolicy};

#[test]
fn generation_is_deterministic_for_same_seed() {
    let config = GenerationConfig::default();
    let first = generate(&config, &mut ChaCha8Rng::seed_from_u64(0x5eed)).expect("generate");
    let second = generate(&config, &mut ChaCha8Rng::seed_from_u64(0x5eed)).expect("generate");

    assert_eq!(first, second, "same seed must yield the same maze");
}

#[test]
fn start_cell_is_always_stamped_last() {
    let config = GenerationConfig::default();
    for seed in 0..32 {
        let maze = generate(&config, &mut ChaCha8Rng::seed_from_u64(seed)).expect("generate");
        assert_eq!(
            query::kind(&maze, config.start),
            Some(CellKind::PlayerStart),
            "seed {seed} lost the start cell"
        );
        assert_eq!(query::count(&maze, CellKind::PlayerStart), 1);
        assert_eq!(query::treasures(&maze).len(), config.treasures);
    }
}

#[test]
fn treasure_set_matches_grid_outside_start_cell() {
    let config = GenerationConfig::default();
    let maze = generate(&config, &mut ChaCha8Rng::seed_from_u64(7)).expect("generate");

    for treasure in query::treasures(&maze) {
        assert!(query::side(&maze) > treasure.column().max(treasure.row()));
        if *treasure != config.start {
            assert_eq!(query::kind(&maze, *treasure), Some(CellKind::Treasure));
        }
    }
}

#[test]
fn last_wins_keeps_treasures_drawn_onto_the_start_cell() {
    // Every draw lands on the origin, so each placement overwrites the
    // previous one and the start stamp overwrites them all.
    let config = GenerationConfig::for_side(5);
    let mut rng = StepRng::new(0, 0);

    let maze = generate(&config, &mut rng).expect("generate");

    assert_eq!(query::treasures(&maze), &[CellCoord::new(0, 0); 6]);
    assert_eq!(
        query::kind(&maze, CellCoord::new(0, 0)),
        Some(CellKind::PlayerStart)
    );
    assert_eq!(query::count(&maze, CellKind::Free), 24);
}

#[test]
fn distinct_overlap_places_every_requested_tile() {
    let config = GenerationConfig {
        overlap: OverlapPolicy::Distinct,
        ..GenerationConfig::default()
    };

    for seed in 0..8 {
        let maze = generate(&config, &mut ChaCha8Rng::seed_from_u64(seed)).expect("generate");
        assert_eq!(query::count(&maze, CellKind::Obstacle), config.obstacles);
        assert_eq!(query::count(&maze, CellKind::Damage), config.damage);
        assert_eq!(query::count(&maze, CellKind::Gold), config.gold);
        assert_eq!(query::count(&maze, CellKind::Treasure), config.treasures);

        let mut treasures = query::treasures(&maze).to_vec();
        treasures.sort();
        treasures.dedup();
        assert_eq!(treasures.len(), config.treasures, "treasures overlap");
        assert!(!treasures.contains(&config.start));
    }
}

#[test]
fn generated_cells_stay_within_grid() {
    let config = GenerationConfig::for_side(7);
    let maze = generate(&config, &mut ChaCha8Rng::seed_from_u64(99)).expect("generate");
    let view = query::grid_view(&maze);

    assert_eq!(view.iter().count(), 49);
    for treasure in query::treasures(&maze) {
        assert!(view.index(*treasure).is_some());
    }
}
