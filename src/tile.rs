//! A single grid cell and its visual/logical state machine.

use crate::common::{Coord, ShipId, Side};

/// Visual and logical state of a tile. Renderers map these to colors or glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    #[default]
    Empty,
    ValidPreview,
    InvalidPreview,
    Placed,
    PlacedHidden,
    Hit,
    Miss,
    Sunk,
}

impl TileState {
    /// Committed ship segment, visible or fogged.
    pub fn is_ship(self) -> bool {
        matches!(self, TileState::Placed | TileState::PlacedHidden)
    }

    pub fn is_preview(self) -> bool {
        matches!(self, TileState::ValidPreview | TileState::InvalidPreview)
    }
}

/// One grid cell.
///
/// `saved` holds the committed state while a preview overlay is shown, so
/// `saved.is_some()` doubles as the "in preview" flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    position: Coord,
    owner: Side,
    state: TileState,
    shot: bool,
    saved: Option<TileState>,
    ship: Option<ShipId>,
    revision: u64,
}

impl Tile {
    pub(crate) fn new(owner: Side, position: Coord) -> Self {
        Self {
            position,
            owner,
            state: TileState::Empty,
            shot: false,
            saved: None,
            ship: None,
            revision: 0,
        }
    }

    pub fn position(&self) -> Coord {
        self.position
    }

    /// Side owning the grid this tile belongs to.
    pub fn owner(&self) -> Side {
        self.owner
    }

    /// Current state, including any preview overlay.
    pub fn state(&self) -> TileState {
        self.state
    }

    /// State underneath the preview overlay.
    pub fn committed_state(&self) -> TileState {
        self.saved.unwrap_or(self.state)
    }

    pub fn is_shot(&self) -> bool {
        self.shot
    }

    pub fn is_preview(&self) -> bool {
        self.saved.is_some()
    }

    /// A tile is occupied while its committed state is a ship segment.
    pub fn is_occupied(&self) -> bool {
        self.committed_state().is_ship()
    }

    /// Ship occupying this tile, if any.
    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }

    /// Counter bumped on every visual change; renderers compare it to skip
    /// unchanged tiles.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn set_ship(&mut self, ship: ShipId) {
        self.ship = Some(ship);
    }

    /// Apply `new_state`. Entering preview for the first time snapshots the
    /// committed state; a committed set drops any pending preview.
    pub fn set_state(&mut self, new_state: TileState, preview: bool) {
        if preview {
            if self.saved.is_none() {
                self.saved = Some(self.state);
            }
        } else {
            self.saved = None;
        }
        self.state = new_state;
        self.revision += 1;
    }

    /// Restore the snapshot taken when the preview started. No-op when not
    /// previewing.
    pub fn revert_preview(&mut self) {
        if let Some(saved) = self.saved.take() {
            self.state = saved;
            self.revision += 1;
        }
    }

    /// Fire at this tile. Returns `true` on a hit; a tile that was already
    /// shot returns `false` and is left untouched.
    pub fn shoot(&mut self) -> bool {
        if self.shot {
            return false;
        }
        self.shot = true;
        if self.is_occupied() {
            self.set_state(TileState::Hit, false);
            true
        } else {
            self.set_state(TileState::Miss, false);
            false
        }
    }
}
