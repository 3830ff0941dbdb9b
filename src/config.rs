//! Default rules and the match configuration.

use core::time::Duration;

use crate::common::GameError;
use crate::ship::ShipType;

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;

/// Tries per ship before random placement gives up on it.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Default bounds of the computer opponent's thinking delay, in milliseconds.
pub const THINKING_DELAY_MS: (u64, u64) = (400, 900);

/// The standard five-ship fleet.
pub fn standard_fleet() -> Vec<ShipType> {
    vec![
        ShipType::new("Carrier", 5),
        ShipType::new("Battleship", 4),
        ShipType::new("Cruiser", 3),
        ShipType::new("Submarine", 3),
        ShipType::new("Destroyer", 2),
    ]
}

/// Settings for one match.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "runtime", serde(default))]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub player_ships: Vec<ShipType>,
    pub enemy_ships: Vec<ShipType>,
    /// Fixed RNG seed for reproducible games.
    pub seed: Option<u64>,
    /// `(min, max)` thinking delay of the computer opponent, in milliseconds.
    pub thinking_delay_ms: (u64, u64),
    /// Place the enemy fleet revealed instead of under fog of war. Debug aid.
    pub show_enemy_ships: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            player_ships: standard_fleet(),
            enemy_ships: standard_fleet(),
            seed: None,
            thinking_delay_ms: THINKING_DELAY_MS,
            show_enemy_ships: false,
        }
    }
}

impl GameConfig {
    /// Reject shapes and fleets the engine cannot play.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let ships = self.player_ships.iter().chain(self.enemy_ships.iter());
        for ship in ships {
            if ship.length() == 0 {
                return Err(GameError::InvalidShipLength);
            }
        }
        Ok(())
    }

    pub fn thinking_delay(&self) -> (Duration, Duration) {
        let (lo, hi) = self.thinking_delay_ms;
        (Duration::from_millis(lo), Duration::from_millis(hi.max(lo)))
    }

    /// Parse a JSON configuration; missing fields take their defaults.
    #[cfg(feature = "runtime")]
    pub fn from_json_str(json: &str) -> anyhow::Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "runtime")]
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("reading {}: {}", path.display(), e))?;
        Self::from_json_str(&text)
    }
}
