mod ai;
mod common;
mod config;
pub mod events;
mod fleet;
mod game;
mod grid;
#[cfg(feature = "runtime")]
mod logging;
mod placement;
#[cfg(feature = "runtime")]
mod player;
#[cfg(feature = "runtime")]
mod player_cli;
#[cfg(feature = "runtime")]
mod runner;
mod ship;
mod tile;
mod turn;
mod win;

pub use ai::*;
pub use common::*;
pub use config::*;
pub use events::{EventBus, GameEvent, ListenerId};
pub use fleet::*;
pub use game::*;
pub use grid::Grid;
#[cfg(feature = "runtime")]
pub use logging::{init_logging, log_level_from, LOG_ENV};
pub use placement::*;
#[cfg(feature = "runtime")]
pub use player::*;
#[cfg(feature = "runtime")]
pub use player_cli::*;
#[cfg(feature = "runtime")]
pub use runner::MatchRunner;
pub use ship::*;
pub use tile::*;
pub use turn::*;
pub use win::*;
