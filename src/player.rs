#![cfg(feature = "runtime")]
//! Actors that choose where to fire.

use core::time::Duration;

use rand::rngs::SmallRng;
use rand::Rng;

use crate::ai::TargetingEngine;
use crate::common::{Coord, ShotResult};
use crate::config::GameConfig;
use crate::grid::Grid;

/// Interface implemented by the human front end and the computer opponent.
#[async_trait::async_trait]
pub trait Shooter: Send {
    /// Choose the next tile to fire at on the opponent's grid. `Ok(None)` means
    /// no target is available and the turn is passed; an error aborts the match.
    async fn select_target(
        &mut self,
        target: &Grid,
        rng: &mut SmallRng,
    ) -> anyhow::Result<Option<Coord>>;

    /// Inform the shooter of the result of its last shot.
    fn handle_shot_result(&mut self, _coord: Coord, _result: ShotResult) {}

    /// Inform the shooter of an opponent shot against its own grid.
    fn handle_incoming_shot(&mut self, _coord: Coord, _result: ShotResult) {}
}

/// Uniform random pause before the computer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThinkingDelay {
    min: Duration,
    max: Duration,
}

impl ThinkingDelay {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    /// No pause at all.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let (min, max) = config.thinking_delay();
        Self::new(min, max)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        if self.max == self.min {
            return self.min;
        }
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rng.random_range(lo..=hi))
    }
}

impl Default for ThinkingDelay {
    fn default() -> Self {
        let (lo, hi) = crate::config::THINKING_DELAY_MS;
        Self::new(Duration::from_millis(lo), Duration::from_millis(hi))
    }
}

/// Computer opponent: search-then-hunt targeting plus a thinking delay.
#[derive(Debug, Clone, Default)]
pub struct AiShooter {
    targeting: TargetingEngine,
    delay: ThinkingDelay,
}

impl AiShooter {
    pub fn new(delay: ThinkingDelay) -> Self {
        Self {
            targeting: TargetingEngine::new(),
            delay,
        }
    }

    pub fn targeting(&self) -> &TargetingEngine {
        &self.targeting
    }
}

#[async_trait::async_trait]
impl Shooter for AiShooter {
    async fn select_target(
        &mut self,
        target: &Grid,
        rng: &mut SmallRng,
    ) -> anyhow::Result<Option<Coord>> {
        // Decide before pausing: if this future is dropped mid-delay nothing
        // has been fired and the next call decides afresh.
        let choice = self.targeting.next_target(target, rng);
        if choice.is_none() {
            log::warn!("no target left on {:?} grid", target.owner());
            return Ok(None);
        }
        let pause = self.delay.sample(rng);
        if !pause.is_zero() {
            tokio::time::sleep(pause).await;
        }
        Ok(choice)
    }

    fn handle_shot_result(&mut self, coord: Coord, result: ShotResult) {
        self.targeting.record_result(coord, result);
    }
}
