//! Search-then-hunt targeting for the computer opponent.
//!
//! Deciding is read-only (`next_target`) and kept apart from learning the
//! outcome (`record_result`), so a caller can pause between the two (the
//! thinking delay) and tests can drive each step directly.

use rand::Rng;

use crate::common::{Coord, ShotResult};
use crate::grid::Grid;

/// Neighbour probe order: up, right, down, left.
const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// Current strategy of the targeting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetingMode {
    /// No damaged ship known; pick any unshot tile.
    #[default]
    Search,
    /// Pursuing confirmed hits on a ship that is still afloat.
    Hunt,
}

/// Uniformly random unshot tile of `grid`, or `None` when every tile is shot.
pub fn random_unshot<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<Coord> {
    let candidates: Vec<Coord> = grid.unshot().map(|t| t.position()).collect();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.random_range(0..candidates.len())])
}

fn is_open(grid: &Grid, c: Coord) -> bool {
    grid.get(c).is_some_and(|t| !t.is_shot())
}

/// Mode plus the hits scored on the ship currently being hunted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetingEngine {
    mode: TargetingMode,
    hits: Vec<Coord>,
}

impl TargetingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> TargetingMode {
        self.mode
    }

    /// Confirmed hits on the ship being hunted, oldest first.
    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }

    /// Choose the next tile to fire at on `grid`. Does not change any state.
    pub fn next_target<R: Rng + ?Sized>(&self, grid: &Grid, rng: &mut R) -> Option<Coord> {
        let target = match self.mode {
            TargetingMode::Search => None,
            TargetingMode::Hunt if self.hits.len() < 2 => self.probe_neighbours(grid),
            TargetingMode::Hunt => self.follow_line(grid),
        };
        target.or_else(|| random_unshot(grid, rng))
    }

    fn probe_neighbours(&self, grid: &Grid) -> Option<Coord> {
        self.hits.iter().find_map(|&origin| {
            DIRECTIONS
                .iter()
                .filter_map(|&(dx, dy)| origin.offset(dx, dy))
                .find(|&c| is_open(grid, c))
        })
    }

    fn follow_line(&self, grid: &Grid) -> Option<Coord> {
        let (first, second) = (self.hits[0], self.hits[1]);
        let dx = second.x.checked_sub(first.x)?.signum();
        let dy = second.y.checked_sub(first.y)?.signum();
        // only a run along one axis gives a usable heading
        if (dx == 0) == (dy == 0) {
            return None;
        }
        let last = self.hits[self.hits.len() - 1];
        [last.offset(dx, dy), first.offset(-dx, -dy)]
            .into_iter()
            .flatten()
            .find(|&c| is_open(grid, c))
    }

    /// Learn from the result of firing at `coord`.
    pub fn record_result(&mut self, coord: Coord, result: ShotResult) {
        match result {
            ShotResult::Hit => {
                self.hits.push(coord);
                self.mode = TargetingMode::Hunt;
            }
            ShotResult::Sink(_) => {
                self.hits.clear();
                self.mode = TargetingMode::Search;
            }
            ShotResult::Miss | ShotResult::Repeat => {}
        }
        log::debug!("targeting {:?}, {} hit(s) in memory", self.mode, self.hits.len());
    }
}
