//! Interactive ship placement driven by explicit input events.

use rand::Rng;

use crate::common::{Coord, GameError, Orientation, ShipId, Side, Visibility};
use crate::events::GameEvent;
use crate::fleet::run_tiles;
use crate::game::GameEngine;
use crate::ship::ShipType;
use crate::tile::TileState;
use crate::turn::TurnState;

/// What the front end should highlight for the hovered cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementPreview {
    pub tiles: Vec<Coord>,
    pub valid: bool,
}

/// Walks the player through a queue of ships: hover to preview, toggle the
/// orientation, confirm to commit.
#[derive(Debug, Clone)]
pub struct PlacementController {
    queue: Vec<ShipType>,
    index: usize,
    orientation: Orientation,
    hovered: Option<Coord>,
}

impl PlacementController {
    pub fn new(queue: Vec<ShipType>) -> Self {
        Self {
            queue,
            index: 0,
            orientation: Orientation::Horizontal,
            hovered: None,
        }
    }

    /// Controller for the player ships configured on `engine`.
    pub fn for_engine(engine: &GameEngine) -> Self {
        Self::new(engine.config().player_ships.clone())
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Ship waiting to be placed.
    pub fn current(&self) -> Option<&ShipType> {
        self.queue.get(self.index)
    }

    pub fn placed_count(&self) -> usize {
        self.index
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.queue.len()
    }

    /// Flip horizontal/vertical and refresh the preview at the hovered cell.
    pub fn toggle_orientation(&mut self, engine: &mut GameEngine) -> Option<PlacementPreview> {
        self.orientation = self.orientation.toggled();
        let hovered = self.hovered?;
        self.hover(engine, hovered).ok()
    }

    /// Move the pointer to `at`: clear the old preview and paint the pending
    /// ship's run as a valid or invalid preview. Committed tiles are never
    /// overwritten.
    pub fn hover(
        &mut self,
        engine: &mut GameEngine,
        at: Coord,
    ) -> Result<PlacementPreview, GameError> {
        if engine.turn() != TurnState::Setup {
            return Err(GameError::NotInSetup);
        }
        let length = self.current().ok_or(GameError::AllShipsPlaced)?.length();
        let orientation = self.orientation;
        let ships = engine.ships_mut();
        ships.grid_mut(Side::Player).revert_previews();
        if !ships.grid(Side::Player).contains(at) {
            self.hovered = None;
            return Err(GameError::OutOfBounds(at));
        }
        self.hovered = Some(at);

        let (tiles, valid, state) = match ships.valid_tiles(Side::Player, at, length, orientation) {
            Some(tiles) => (tiles, true, TileState::ValidPreview),
            None => (
                run_tiles(ships.grid(Side::Player), at, length, orientation),
                false,
                TileState::InvalidPreview,
            ),
        };
        let grid = ships.grid_mut(Side::Player);
        for &c in &tiles {
            if let Some(tile) = grid.get_mut(c) {
                if !tile.is_occupied() {
                    tile.set_state(state, true);
                }
            }
        }
        Ok(PlacementPreview { tiles, valid })
    }

    /// Pointer left the grid.
    pub fn clear(&mut self, engine: &mut GameEngine) {
        self.hovered = None;
        engine.ships_mut().grid_mut(Side::Player).revert_previews();
    }

    /// Commit the pending ship at the hovered cell.
    pub fn confirm(&mut self, engine: &mut GameEngine) -> Result<ShipId, GameError> {
        let at = self.hovered.ok_or(GameError::NothingHovered)?;
        self.place_at(engine, at, self.orientation)
    }

    /// Commit the pending ship at an explicit position, as text front ends do.
    pub fn place_at(
        &mut self,
        engine: &mut GameEngine,
        at: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, GameError> {
        if engine.turn() != TurnState::Setup {
            return Err(GameError::NotInSetup);
        }
        let ship_type = self.current().ok_or(GameError::AllShipsPlaced)?.clone();
        let ships = engine.ships_mut();
        ships.grid_mut(Side::Player).revert_previews();
        let id =
            ships.try_place_ship(Side::Player, at, &ship_type, orientation, Visibility::Revealed)?;
        self.advance(engine);
        Ok(id)
    }

    /// Randomly place the pending ship. `Ok(None)` when every attempt failed.
    pub fn auto_place_current<R: Rng + ?Sized>(
        &mut self,
        engine: &mut GameEngine,
        rng: &mut R,
    ) -> Result<Option<ShipId>, GameError> {
        if engine.turn() != TurnState::Setup {
            return Err(GameError::NotInSetup);
        }
        let ship_type = self.current().ok_or(GameError::AllShipsPlaced)?.clone();
        let ships = engine.ships_mut();
        ships.grid_mut(Side::Player).revert_previews();
        let placed = ships.place_one_randomly(Side::Player, &ship_type, Visibility::Revealed, rng);
        if placed.is_some() {
            self.advance(engine);
        } else {
            log::warn!("could not place {} randomly", ship_type.name());
        }
        Ok(placed)
    }

    fn advance(&mut self, engine: &GameEngine) {
        self.index += 1;
        self.hovered = None;
        if self.is_complete() {
            log::info!("all {} ships placed", self.queue.len());
            engine.events().raise(GameEvent::ShipsPlaced);
        }
    }
}
