//! Ship placement, per-side ship tracking and shot resolution.

use rand::Rng;

use crate::common::{Coord, GameError, Orientation, ShipId, ShotResult, Side, Visibility};
use crate::config::MAX_PLACEMENT_ATTEMPTS;
use crate::events::{EventBus, GameEvent};
use crate::grid::Grid;
use crate::ship::{ShipInstance, ShipType};
use crate::tile::TileState;

/// Coordinates of the straight run of `length` cells starting at `start`,
/// clipped to the grid. Never mutates.
pub fn run_tiles(
    grid: &Grid,
    start: Coord,
    length: usize,
    orientation: Orientation,
) -> Vec<Coord> {
    let (along, across, extent, cross_extent) = match orientation {
        Orientation::Horizontal => (start.x, start.y, grid.width(), grid.height()),
        Orientation::Vertical => (start.y, start.x, grid.height(), grid.width()),
    };
    if across < 0 || across as usize >= cross_extent {
        return Vec::new();
    }
    let along = i64::from(along);
    let length = i64::try_from(length).unwrap_or(i64::MAX);
    let first = (-along).max(0);
    let end = (extent as i64 - along).min(length);
    (first..end)
        .map(|i| {
            // along + i lies in 0..extent, which fits in i32
            let v = (along + i) as i32;
            match orientation {
                Orientation::Horizontal => Coord::new(v, across),
                Orientation::Vertical => Coord::new(across, v),
            }
        })
        .collect()
}

/// Check a placement run against `grid`.
///
/// Fails when any cell is out of bounds or already occupied; adjacency to
/// other ships is allowed. Read-only, so it is safe to call on every hover.
pub fn validate_placement(
    grid: &Grid,
    start: Coord,
    length: usize,
    orientation: Orientation,
) -> Result<Vec<Coord>, GameError> {
    if length == 0 {
        return Err(GameError::InvalidShipLength);
    }
    let max_len = match orientation {
        Orientation::Horizontal => grid.width(),
        Orientation::Vertical => grid.height(),
    };
    if length > max_len {
        return Err(GameError::ShipOutOfBounds);
    }
    let (dx, dy) = orientation.step();
    let mut tiles = Vec::with_capacity(length);
    for i in 0..length as i32 {
        let c = start
            .offset(dx * i, dy * i)
            .ok_or(GameError::ShipOutOfBounds)?;
        let tile = grid.get(c).ok_or(GameError::ShipOutOfBounds)?;
        if tile.is_occupied() {
            return Err(GameError::ShipOverlaps);
        }
        tiles.push(c);
    }
    Ok(tiles)
}

/// Outcome of a randomized placement pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub placed: Vec<ShipId>,
    /// Ships left out after `MAX_PLACEMENT_ATTEMPTS` failed tries.
    pub unplaced: Vec<ShipType>,
}

impl PlacementReport {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// One side's grid, ships and remaining-ship count.
#[derive(Debug, Clone)]
pub struct Fleet {
    grid: Grid,
    ships: Vec<ShipInstance>,
    remaining: usize,
}

impl Fleet {
    fn new(grid: Grid) -> Self {
        Self {
            grid,
            ships: Vec::new(),
            remaining: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn ships(&self) -> &[ShipInstance] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&ShipInstance> {
        self.ships.get(id.0)
    }

    /// Ships not yet sunk.
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

/// Places and tracks the ships of both sides.
#[derive(Debug, Clone)]
pub struct ShipManager {
    player: Fleet,
    enemy: Fleet,
    events: EventBus,
}

impl ShipManager {
    /// Generate both grids with the given shape.
    pub fn new(width: usize, height: usize, events: EventBus) -> Result<Self, GameError> {
        Ok(Self {
            player: Fleet::new(Grid::new(Side::Player, width, height)?),
            enemy: Fleet::new(Grid::new(Side::Enemy, width, height)?),
            events,
        })
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn fleet(&self, side: Side) -> &Fleet {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn fleet_mut(&mut self, side: Side) -> &mut Fleet {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn grid(&self, side: Side) -> &Grid {
        &self.fleet(side).grid
    }

    pub(crate) fn grid_mut(&mut self, side: Side) -> &mut Grid {
        &mut self.fleet_mut(side).grid
    }

    pub fn ships(&self, side: Side) -> &[ShipInstance] {
        &self.fleet(side).ships
    }

    pub fn remaining(&self, side: Side) -> usize {
        self.fleet(side).remaining
    }

    pub fn validate_placement(
        &self,
        side: Side,
        start: Coord,
        length: usize,
        orientation: Orientation,
    ) -> Result<Vec<Coord>, GameError> {
        validate_placement(self.grid(side), start, length, orientation)
    }

    /// Tiles of a valid placement, or `None` when the run is invalid.
    pub fn valid_tiles(
        &self,
        side: Side,
        start: Coord,
        length: usize,
        orientation: Orientation,
    ) -> Option<Vec<Coord>> {
        self.validate_placement(side, start, length, orientation).ok()
    }

    /// Validate and commit a ship. On failure nothing is mutated.
    pub fn try_place_ship(
        &mut self,
        side: Side,
        start: Coord,
        ship_type: &ShipType,
        orientation: Orientation,
        visibility: Visibility,
    ) -> Result<ShipId, GameError> {
        let tiles = self.validate_placement(side, start, ship_type.length(), orientation)?;
        let state = match visibility {
            Visibility::Revealed => TileState::Placed,
            Visibility::Hidden => TileState::PlacedHidden,
        };
        let fleet = self.fleet_mut(side);
        let id = ShipId(fleet.ships.len());
        for &c in &tiles {
            if let Some(tile) = fleet.grid.get_mut(c) {
                tile.set_state(state, false);
                tile.set_ship(id);
            }
        }
        fleet.ships.push(ShipInstance::new(
            id,
            side,
            ship_type.clone(),
            orientation,
            tiles,
        ));
        fleet.remaining += 1;
        log::debug!(
            "{:?} placed {} at {} {:?}",
            side,
            ship_type.name(),
            start,
            orientation
        );
        Ok(id)
    }

    /// Try up to `MAX_PLACEMENT_ATTEMPTS` random origins/orientations for one
    /// ship. `None` when every attempt failed.
    pub fn place_one_randomly<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        ship_type: &ShipType,
        visibility: Visibility,
        rng: &mut R,
    ) -> Option<ShipId> {
        let (width, height) = {
            let grid = self.grid(side);
            (grid.width(), grid.height())
        };
        let len = ship_type.length();
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let max_x = if orientation == Orientation::Horizontal {
                width.saturating_sub(len)
            } else {
                width - 1
            };
            let max_y = if orientation == Orientation::Vertical {
                height.saturating_sub(len)
            } else {
                height - 1
            };
            let x = rng.random_range(0..=max_x) as i32;
            let y = rng.random_range(0..=max_y) as i32;
            if let Ok(id) =
                self.try_place_ship(side, Coord::new(x, y), ship_type, orientation, visibility)
            {
                return Some(id);
            }
        }
        None
    }

    /// Randomly place every ship in `ships`. Ships that could not be placed
    /// are reported, not treated as fatal.
    pub fn place_randomly<R: Rng + ?Sized>(
        &mut self,
        side: Side,
        ships: &[ShipType],
        visibility: Visibility,
        rng: &mut R,
    ) -> PlacementReport {
        let mut report = PlacementReport::default();
        for ship_type in ships {
            match self.place_one_randomly(side, ship_type, visibility, rng) {
                Some(id) => report.placed.push(id),
                None => {
                    log::warn!(
                        "{:?}: could not place {} (length {}) after {} attempts",
                        side,
                        ship_type.name(),
                        ship_type.length(),
                        MAX_PLACEMENT_ATTEMPTS
                    );
                    report.unplaced.push(ship_type.clone());
                }
            }
        }
        report
    }

    /// Fire at `c` on `target`'s grid.
    ///
    /// A hit that completes a ship paints it `Sunk`, decrements the side's
    /// remaining count once and raises [`GameEvent::ShipSunk`].
    pub fn shoot(&mut self, target: Side, c: Coord) -> Result<ShotResult, GameError> {
        let fleet = self.fleet_mut(target);
        let tile = fleet.grid.get_mut(c).ok_or(GameError::OutOfBounds(c))?;
        if tile.is_shot() {
            return Ok(ShotResult::Repeat);
        }
        if !tile.shoot() {
            return Ok(ShotResult::Miss);
        }
        let Some(id) = tile.ship() else {
            return Ok(ShotResult::Hit);
        };
        let Some(ship) = fleet.ships.get_mut(id.0) else {
            return Ok(ShotResult::Hit);
        };
        if !ship.is_sunk(&fleet.grid) || !ship.mark_as_sunk(&mut fleet.grid) {
            return Ok(ShotResult::Hit);
        }
        fleet.remaining = fleet.remaining.saturating_sub(1);
        log::info!(
            "{:?} {} sunk, {} remaining",
            target,
            ship.ship_type().name(),
            fleet.remaining
        );
        self.events.raise(GameEvent::ShipSunk);
        Ok(ShotResult::Sink(id))
    }
}
