use broadside::{Grid, Side, TileState};

fn grid() -> Grid {
    Grid::new(Side::Player, 4, 4).unwrap()
}

#[test]
fn test_preview_snapshots_committed_state_once() {
    let mut grid = grid();
    let tile = grid.tile_mut(1, 1).unwrap();
    tile.set_state(TileState::Placed, false);
    tile.set_state(TileState::ValidPreview, true);
    tile.set_state(TileState::InvalidPreview, true);
    assert_eq!(tile.state(), TileState::InvalidPreview);
    assert_eq!(tile.committed_state(), TileState::Placed);
    assert!(tile.is_occupied());

    tile.revert_preview();
    assert_eq!(tile.state(), TileState::Placed);
    assert!(!tile.is_preview());
}

#[test]
fn test_revert_preview_is_idempotent() {
    let mut grid = grid();
    let tile = grid.tile_mut(0, 0).unwrap();
    tile.set_state(TileState::ValidPreview, true);
    tile.revert_preview();
    let revision = tile.revision();
    tile.revert_preview();
    tile.revert_preview();
    assert_eq!(tile.state(), TileState::Empty);
    assert_eq!(tile.revision(), revision);
}

#[test]
fn test_committed_set_drops_preview() {
    let mut grid = grid();
    let tile = grid.tile_mut(2, 3).unwrap();
    tile.set_state(TileState::ValidPreview, true);
    tile.set_state(TileState::Placed, false);
    assert!(!tile.is_preview());
    tile.revert_preview();
    assert_eq!(tile.state(), TileState::Placed);
}

#[test]
fn test_every_visual_change_bumps_revision() {
    let mut grid = grid();
    let tile = grid.tile_mut(3, 3).unwrap();
    assert_eq!(tile.revision(), 0);
    tile.set_state(TileState::ValidPreview, true);
    tile.revert_preview();
    tile.shoot();
    assert_eq!(tile.revision(), 3);
}

#[test]
fn test_shoot_empty_is_miss_and_second_shot_is_noop() {
    let mut grid = grid();
    let tile = grid.tile_mut(0, 1).unwrap();
    assert!(!tile.shoot());
    assert_eq!(tile.state(), TileState::Miss);
    assert!(tile.is_shot());
    let revision = tile.revision();
    assert!(!tile.shoot());
    assert_eq!(tile.state(), TileState::Miss);
    assert_eq!(tile.revision(), revision);
}

#[test]
fn test_shoot_occupied_is_hit_once() {
    let mut grid = grid();
    let tile = grid.tile_mut(1, 2).unwrap();
    tile.set_state(TileState::PlacedHidden, false);
    assert!(tile.shoot());
    assert_eq!(tile.state(), TileState::Hit);
    assert!(!tile.is_occupied());
    assert!(!tile.shoot());
    assert_eq!(tile.state(), TileState::Hit);
}

#[test]
fn test_tile_knows_owner_and_position() {
    let grid = Grid::new(Side::Enemy, 3, 2).unwrap();
    let tile = grid.tile(2, 1).unwrap();
    assert_eq!(tile.owner(), Side::Enemy);
    assert_eq!((tile.position().x, tile.position().y), (2, 1));
    assert_eq!(tile.ship(), None);
}
