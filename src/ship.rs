//! Ship definitions and the runtime record of a placed ship.

use core::fmt;

use crate::common::{Coord, Orientation, ShipId, Side};
use crate::grid::Grid;
use crate::tile::TileState;

/// Type of ship: name and length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipType {
    name: String,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub fn new(name: impl Into<String>, length: usize) -> Self {
        Self {
            name: name.into(),
            length,
        }
    }

    /// Ship's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A ship placed on a grid.
///
/// The grid owns the tiles; the ship only keeps their coordinates. Sunk status
/// is derived from the tiles' shot flags, while `sunk_fired` guards the
/// one-shot sink notification.
#[derive(Clone, PartialEq, Eq)]
pub struct ShipInstance {
    id: ShipId,
    side: Side,
    ship_type: ShipType,
    orientation: Orientation,
    tiles: Vec<Coord>,
    sunk_fired: bool,
}

impl ShipInstance {
    pub(crate) fn new(
        id: ShipId,
        side: Side,
        ship_type: ShipType,
        orientation: Orientation,
        tiles: Vec<Coord>,
    ) -> Self {
        Self {
            id,
            side,
            ship_type,
            orientation,
            tiles,
            sunk_fired: false,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn ship_type(&self) -> &ShipType {
        &self.ship_type
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Occupied coordinates, in placement order.
    pub fn tiles(&self) -> &[Coord] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.tiles.contains(&c)
    }

    /// `true` once every occupied tile of `grid` has been shot.
    pub fn is_sunk(&self, grid: &Grid) -> bool {
        self.tiles
            .iter()
            .all(|&c| grid.get(c).is_some_and(|t| t.is_shot()))
    }

    /// Whether the sink notification has already fired.
    pub fn sunk_notified(&self) -> bool {
        self.sunk_fired
    }

    /// Paint every tile `Sunk` and fire the notification. Returns `true` only
    /// on the first call; later calls change nothing.
    pub(crate) fn mark_as_sunk(&mut self, grid: &mut Grid) -> bool {
        if self.sunk_fired {
            return false;
        }
        self.sunk_fired = true;
        for &c in &self.tiles {
            if let Some(tile) = grid.get_mut(c) {
                tile.set_state(TileState::Sunk, false);
            }
        }
        true
    }
}

impl fmt::Debug for ShipInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, side: {:?}, name: \"{}\", orientation: {:?}, tiles: {:?}, sunk: {} }}",
            self.id.0,
            self.side,
            self.ship_type.name(),
            self.orientation,
            self.tiles,
            self.sunk_fired,
        )
    }
}
