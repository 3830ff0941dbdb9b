//! Common types for the engine: coordinates, sides, shot results and errors.

use core::fmt;

/// Integer grid coordinate. `y` grows "up", matching the probe order of the
/// targeting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Coordinate shifted by `(dx, dy)`, or `None` when it leaves the `i32`
    /// range. No grid contains such a coordinate.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl From<(i32, i32)> for Coord {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the two opposing sides. Also identifies the grid a tile belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// The opposing side.
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Orientation of a ship run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Unit step along the run.
    pub(crate) fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// Whether a committed ship is drawn to observers or kept under fog of war.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Committed as `TileState::Placed`.
    Revealed,
    /// Committed as `TileState::PlacedHidden`.
    Hidden,
}

/// Handle of a ship inside its fleet's ship table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub usize);

/// Result of firing at a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotResult {
    /// Shot landed on open water.
    Miss,
    /// Shot hit a ship that is still afloat.
    Hit,
    /// Shot sank the ship carrying this id.
    Sink(ShipId),
    /// Tile had already been shot; nothing changed.
    Repeat,
}

impl ShotResult {
    /// `true` for `Hit` and `Sink`.
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotResult::Hit | ShotResult::Sink(_))
    }
}

/// Errors returned by engine operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Grid width or height is zero.
    InvalidDimensions { width: usize, height: usize },
    /// Ship length must be at least one cell.
    InvalidShipLength,
    /// Part of the ship run lies outside the grid.
    ShipOutOfBounds,
    /// Ship run crosses an occupied tile.
    ShipOverlaps,
    /// Coordinate does not address a tile.
    OutOfBounds(Coord),
    /// The acting side does not hold the turn (or the match is over).
    OutOfTurn(Side),
    /// The side has no ships; the match cannot start.
    EmptyFleet(Side),
    /// The turn phase has already started.
    NotInSetup,
    /// Every ship in the placement queue is already placed.
    AllShipsPlaced,
    /// Confirm was requested before any tile was hovered.
    NothingHovered,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidDimensions { width, height } => {
                write!(f, "Invalid grid dimensions {}x{}", width, height)
            }
            GameError::InvalidShipLength => write!(f, "Ship length must be at least 1"),
            GameError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            GameError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            GameError::OutOfBounds(c) => write!(f, "Coordinate {} is outside the grid", c),
            GameError::OutOfTurn(side) => write!(f, "It is not {:?}'s turn", side),
            GameError::EmptyFleet(side) => write!(f, "{:?} has no ships placed", side),
            GameError::NotInSetup => write!(f, "Turn phase has already started"),
            GameError::AllShipsPlaced => write!(f, "All ships are already placed"),
            GameError::NothingHovered => write!(f, "No tile is hovered"),
        }
    }
}

impl std::error::Error for GameError {}
