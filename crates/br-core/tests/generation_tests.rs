//! End-to-end generation properties

use br_core::generation::{
    Generator, GeneratorConfig, ParamRange, PillarRoom, RoomRect, carve_pillar_room, carve_rect,
    find_dead_ends, generate_perfect_maze, remove_dead_ends,
};
use br_core::{ConfigError, Coord, Grid, LevelRng, generate};
use proptest::prelude::*;

#[test]
fn test_determinism_ten_by_ten() {
    let config = GeneratorConfig::maze_only(10.0, 10.0, 1.0, 0.8, 1, 0.5);
    let a = generate(&config, &mut LevelRng::new(1337)).unwrap();
    let b = generate(&config, &mut LevelRng::new(1337)).unwrap();
    assert_eq!((a.width(), a.height()), (10, 10));
    assert_eq!(a, b);
    assert_eq!(a.to_string(), b.to_string());
}

#[test]
fn test_backrooms_determinism() {
    let config = GeneratorConfig::backrooms();
    let a = generate(&config, &mut LevelRng::new(5)).unwrap();
    let b = generate(&config, &mut LevelRng::new(5)).unwrap();
    let c = generate(&config, &mut LevelRng::new(6)).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_invalid_configs_are_reported() {
    let mut rng = LevelRng::new(0);

    let config = GeneratorConfig::maze_only(-5.0, 10.0, 1.0, 0.5, 1, 0.5);
    assert!(matches!(
        generate(&config, &mut rng),
        Err(ConfigError::NonPositive { field: "world_width", .. })
    ));

    let config = GeneratorConfig::maze_only(10.0, 0.5, 1.0, 0.5, 1, 0.5);
    assert!(matches!(
        generate(&config, &mut rng),
        Err(ConfigError::EmptyGrid { cols: 10, rows: 0 })
    ));

    let mut config = GeneratorConfig::backrooms();
    config.rooms.count = ParamRange::new(4, 1);
    assert!(matches!(
        Generator::new(config),
        Err(ConfigError::InvertedRange { field: "rooms.count", .. })
    ));
}

#[test]
fn test_rect_carving_is_exact_over_maze() {
    let config = GeneratorConfig::maze_only(30.0, 30.0, 1.0, 0.7, 3, 0.3);
    let mut grid = generate(&config, &mut LevelRng::new(12)).unwrap();
    let rect = RoomRect::new(4, 6, 9, 5);
    carve_rect(&mut grid, rect);
    for c in rect.cells() {
        assert!(grid.is_path(c), "gap at {}", c);
    }
}

#[test]
fn test_pillar_room_over_maze() {
    let config = GeneratorConfig::maze_only(30.0, 30.0, 1.0, 0.7, 3, 0.3);
    let mut grid = generate(&config, &mut LevelRng::new(13)).unwrap();
    let room = PillarRoom {
        rect: RoomRect::new(10, 10, 9, 9),
        spacing: 3,
    };
    carve_pillar_room(&mut grid, &room);
    let pillars: Vec<Coord> = room.pillar_cells().collect();
    assert_eq!(
        pillars,
        vec![
            Coord::new(13, 13),
            Coord::new(16, 13),
            Coord::new(13, 16),
            Coord::new(16, 16),
        ]
    );
    for c in room.rect.cells() {
        assert_eq!(grid.is_path(c), !pillars.contains(&c));
        assert_eq!(grid.is_pillar(c), pillars.contains(&c));
    }
}

#[test]
fn test_ascii_render_shape() {
    let grid = generate(&GeneratorConfig::backrooms(), &mut LevelRng::new(3)).unwrap();
    let text = grid.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), grid.height());
    assert!(lines.iter().all(|l| l.chars().count() == grid.width()));
    assert_eq!(Grid::from_ascii(&text).unwrap().to_string(), text);
}

#[test]
fn test_grid_json_roundtrip() {
    let grid = generate(&GeneratorConfig::backrooms(), &mut LevelRng::new(4)).unwrap();
    let json = serde_json::to_string(&grid).unwrap();
    let back: Grid = serde_json::from_str(&json).unwrap();
    assert_eq!(back, grid);
}

fn small_config() -> impl Strategy<Value = GeneratorConfig> {
    (
        1usize..40,
        1usize..40,
        0.05f64..=1.0,
        1u32..5,
        0.0f64..=1.0,
    )
        .prop_map(|(cols, rows, fill, mazes, stop)| {
            let mut config = GeneratorConfig::backrooms();
            config.world_width = cols as f64 * 2.0;
            config.world_height = rows as f64 * 2.0;
            config.cell_size = 2.0;
            config.maze_fill_percentage = fill;
            config.num_mazes = mazes;
            config.stop_collision_probability = stop;
            config
        })
}

proptest! {
    #[test]
    fn prop_grid_shape(config in small_config(), seed in any::<u64>()) {
        let grid = generate(&config, &mut LevelRng::new(seed)).unwrap();
        prop_assert_eq!(grid.width(), config.cols());
        prop_assert_eq!(grid.height(), config.rows());
        prop_assert_eq!(grid.len(), config.cols() * config.rows());
        let text = grid.to_string();
        prop_assert!(text.lines().all(|l| l.chars().count() == config.cols()));
    }

    #[test]
    fn prop_pillars_never_paths(config in small_config(), seed in any::<u64>()) {
        let layout = Generator::new(config).unwrap().generate_layout(&mut LevelRng::new(seed));
        for (_, cell) in layout.grid.iter() {
            prop_assert!(!(cell.is_pillar() && cell.is_path()));
        }
    }

    #[test]
    fn prop_dead_end_pruning_is_idempotent(seed in any::<u64>(), size in 5usize..30) {
        let mut rng = LevelRng::new(seed);
        let mut grid = generate_perfect_maze(size, size, 1.0, &mut rng).unwrap();
        carve_rect(&mut grid, RoomRect::new(rng.below(size), rng.below(size), 4, 4));

        let report = remove_dead_ends(&mut grid, usize::MAX);
        prop_assert!(report.converged);
        prop_assert!(find_dead_ends(&grid).is_empty());

        let settled = grid.clone();
        let again = remove_dead_ends(&mut grid, usize::MAX);
        prop_assert_eq!(again.removed, 0);
        prop_assert_eq!(grid, settled);
    }

    #[test]
    fn prop_generation_is_deterministic(config in small_config(), seed in any::<u64>()) {
        let a = generate(&config, &mut LevelRng::new(seed)).unwrap();
        let b = generate(&config, &mut LevelRng::new(seed)).unwrap();
        prop_assert_eq!(a, b);
    }
}
