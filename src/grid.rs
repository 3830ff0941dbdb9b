//! Fixed-size grid of tiles with bounds-checked lookup.

use core::fmt;

use crate::common::{Coord, GameError, Side};
use crate::tile::{Tile, TileState};

/// A `width × height` grid owning exactly one [`Tile`] per cell. The shape is
/// fixed at construction.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    owner: Side,
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Generate every tile of a new grid for `owner`.
    pub fn new(owner: Side, width: usize, height: usize) -> Result<Self, GameError> {
        let fits = i32::try_from(width).is_ok() && i32::try_from(height).is_ok();
        if width == 0 || height == 0 || !fits {
            return Err(GameError::InvalidDimensions { width, height });
        }
        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                tiles.push(Tile::new(owner, Coord::new(x as i32, y as i32)));
            }
        }
        Ok(Grid {
            owner,
            width,
            height,
            tiles,
        })
    }

    pub fn owner(&self) -> Side {
        self.owner
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.index(c).is_some()
    }

    #[inline]
    fn index(&self, c: Coord) -> Option<usize> {
        if c.x < 0 || c.y < 0 {
            return None;
        }
        let (x, y) = (c.x as usize, c.y as usize);
        if x >= self.width || y >= self.height {
            None
        } else {
            Some(y * self.width + x)
        }
    }

    /// Tile at `(x, y)`, or `None` when out of range.
    pub fn tile(&self, x: i32, y: i32) -> Option<&Tile> {
        self.get(Coord::new(x, y))
    }

    pub fn tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        self.get_mut(Coord::new(x, y))
    }

    pub fn get(&self, c: Coord) -> Option<&Tile> {
        self.index(c).map(|i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, c: Coord) -> Option<&mut Tile> {
        self.index(c).map(move |i| &mut self.tiles[i])
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Tiles not yet fired at.
    pub fn unshot(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(|t| !t.is_shot())
    }

    /// Drop every preview overlay on the grid.
    pub fn revert_previews(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.revert_preview();
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid<{:?}, {}x{}>:", self.owner, self.width, self.height)?;
        for y in 0..self.height {
            for x in 0..self.width {
                let ch = match self.tiles[y * self.width + x].state() {
                    TileState::Empty => '.',
                    TileState::ValidPreview => '+',
                    TileState::InvalidPreview => '!',
                    TileState::Placed | TileState::PlacedHidden => 'S',
                    TileState::Hit => 'X',
                    TileState::Miss => 'o',
                    TileState::Sunk => '#',
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
