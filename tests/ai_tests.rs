use broadside::{
    random_unshot, Coord, Grid, ShipId, ShotResult, Side, TargetingEngine, TargetingMode, TileState,
};
use rand::{rngs::SmallRng, SeedableRng};

fn shoot(grid: &mut Grid, x: i32, y: i32) {
    grid.tile_mut(x, y).unwrap().shoot();
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(7)
}

#[test]
fn test_search_picks_unshot_tile() {
    let mut grid = Grid::new(Side::Player, 3, 3).unwrap();
    for y in 0..3 {
        for x in 0..3 {
            if (x, y) != (2, 1) {
                shoot(&mut grid, x, y);
            }
        }
    }
    let ai = TargetingEngine::new();
    assert_eq!(ai.mode(), TargetingMode::Search);
    assert_eq!(ai.next_target(&grid, &mut rng()), Some(Coord::new(2, 1)));
}

#[test]
fn test_no_target_on_exhausted_grid() {
    let mut grid = Grid::new(Side::Player, 2, 2).unwrap();
    for y in 0..2 {
        for x in 0..2 {
            shoot(&mut grid, x, y);
        }
    }
    let mut ai = TargetingEngine::new();
    assert_eq!(ai.next_target(&grid, &mut rng()), None);
    ai.record_result(Coord::new(0, 0), ShotResult::Hit);
    assert_eq!(ai.next_target(&grid, &mut rng()), None);
}

#[test]
fn test_single_hit_probes_up_right_down_left() {
    let mut grid = Grid::new(Side::Player, 5, 5).unwrap();
    let mut ai = TargetingEngine::new();
    shoot(&mut grid, 2, 2);
    ai.record_result(Coord::new(2, 2), ShotResult::Hit);
    assert_eq!(ai.mode(), TargetingMode::Hunt);

    let expected = [(2, 3), (3, 2), (2, 1), (1, 2)];
    for (x, y) in expected {
        assert_eq!(ai.next_target(&grid, &mut rng()), Some(Coord::new(x, y)));
        shoot(&mut grid, x, y);
        ai.record_result(Coord::new(x, y), ShotResult::Miss);
    }
    // every neighbour shot: fall back to any unshot tile
    let fallback = ai.next_target(&grid, &mut rng()).unwrap();
    assert!(!grid.get(fallback).unwrap().is_shot());
}

#[test]
fn test_neighbour_probe_skips_edges() {
    let grid = Grid::new(Side::Player, 4, 4).unwrap();
    let mut ai = TargetingEngine::new();
    ai.record_result(Coord::new(3, 3), ShotResult::Hit);
    // up and right leave the grid
    assert_eq!(ai.next_target(&grid, &mut rng()), Some(Coord::new(3, 2)));
}

#[test]
fn test_hunt_follows_the_line() {
    let mut grid = Grid::new(Side::Player, 6, 6).unwrap();
    let mut ai = TargetingEngine::new();
    for (x, y) in [(2, 2), (2, 3)] {
        shoot(&mut grid, x, y);
        ai.record_result(Coord::new(x, y), ShotResult::Hit);
    }
    assert_eq!(ai.next_target(&grid, &mut rng()), Some(Coord::new(2, 4)));

    // forward blocked: continue behind the first hit
    shoot(&mut grid, 2, 4);
    ai.record_result(Coord::new(2, 4), ShotResult::Miss);
    assert_eq!(ai.next_target(&grid, &mut rng()), Some(Coord::new(2, 1)));
}

#[test]
fn test_hunt_extends_from_latest_hit() {
    let mut grid = Grid::new(Side::Player, 8, 3).unwrap();
    let mut ai = TargetingEngine::new();
    for x in [3, 4, 5] {
        shoot(&mut grid, x, 1);
        ai.record_result(Coord::new(x, 1), ShotResult::Hit);
    }
    assert_eq!(ai.hits().len(), 3);
    assert_eq!(ai.next_target(&grid, &mut rng()), Some(Coord::new(6, 1)));
}

#[test]
fn test_both_ends_blocked_falls_back_to_random() {
    let mut grid = Grid::new(Side::Player, 3, 1).unwrap();
    let mut ai = TargetingEngine::new();
    for x in [0, 1] {
        shoot(&mut grid, x, 0);
        ai.record_result(Coord::new(x, 0), ShotResult::Hit);
    }
    assert_eq!(ai.next_target(&grid, &mut rng()), Some(Coord::new(2, 0)));
    shoot(&mut grid, 2, 0);
    assert_eq!(ai.next_target(&grid, &mut rng()), None);
}

#[test]
fn test_sink_returns_to_search() {
    let mut ai = TargetingEngine::new();
    ai.record_result(Coord::new(1, 1), ShotResult::Hit);
    ai.record_result(Coord::new(1, 2), ShotResult::Miss);
    assert_eq!(ai.hits(), &[Coord::new(1, 1)]);
    ai.record_result(Coord::new(1, 2), ShotResult::Repeat);
    assert_eq!(ai.mode(), TargetingMode::Hunt);
    ai.record_result(Coord::new(2, 1), ShotResult::Sink(ShipId(0)));
    assert_eq!(ai.mode(), TargetingMode::Search);
    assert!(ai.hits().is_empty());
}

#[test]
fn test_deciding_is_read_only() {
    let mut grid = Grid::new(Side::Enemy, 4, 4).unwrap();
    grid.tile_mut(0, 0).unwrap().set_state(TileState::PlacedHidden, false);
    let before = grid.clone();
    let ai = TargetingEngine::new();
    let copy = ai.clone();
    ai.next_target(&grid, &mut rng());
    assert_eq!(grid, before);
    assert_eq!(ai, copy);
}

#[test]
fn test_diagonal_hits_fall_back_to_random() {
    let grid = Grid::new(Side::Player, 6, 6).unwrap();
    let mut ai = TargetingEngine::new();
    ai.record_result(Coord::new(1, 1), ShotResult::Hit);
    ai.record_result(Coord::new(2, 2), ShotResult::Hit);
    let expected = random_unshot(&grid, &mut SmallRng::seed_from_u64(3));
    assert_eq!(ai.next_target(&grid, &mut SmallRng::seed_from_u64(3)), expected);
}

#[test]
fn test_hits_at_coordinate_extremes_do_not_overflow() {
    let grid = Grid::new(Side::Player, 4, 4).unwrap();
    let mut ai = TargetingEngine::new();
    ai.record_result(Coord::new(i32::MAX, 0), ShotResult::Hit);
    let target = ai.next_target(&grid, &mut rng()).unwrap();
    assert!(grid.contains(target));

    ai.record_result(Coord::new(i32::MIN, 0), ShotResult::Hit);
    let target = ai.next_target(&grid, &mut rng()).unwrap();
    assert!(grid.contains(target));

    let mut edge = TargetingEngine::new();
    edge.record_result(Coord::new(i32::MAX - 1, i32::MAX), ShotResult::Hit);
    edge.record_result(Coord::new(i32::MAX, i32::MAX), ShotResult::Hit);
    assert!(grid.contains(edge.next_target(&grid, &mut rng()).unwrap()));
}
