#![cfg(feature = "runtime")]
//! Drives a match by asking the shooter holding the turn for targets.

use rand::rngs::SmallRng;

use crate::common::{GameError, ShotResult, Side};
use crate::game::GameEngine;
use crate::player::Shooter;
use crate::turn::TurnState;
use crate::win::MatchOutcome;

pub struct MatchRunner {
    engine: GameEngine,
    player: Box<dyn Shooter>,
    enemy: Box<dyn Shooter>,
    shots_fired: [usize; 2],
}

impl MatchRunner {
    pub fn new(engine: GameEngine, player: Box<dyn Shooter>, enemy: Box<dyn Shooter>) -> Self {
        Self {
            engine,
            player,
            enemy,
            shots_fired: [0; 2],
        }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn into_engine(self) -> GameEngine {
        self.engine
    }

    /// Shots resolved for `side`, repeats excluded.
    pub fn shots_fired(&self, side: Side) -> usize {
        self.shots_fired[side as usize]
    }

    /// Play one shot for the side holding the turn. Returns `false` once the
    /// match is over.
    pub async fn step(&mut self, rng: &mut SmallRng) -> anyhow::Result<bool> {
        let side = match self.engine.turn() {
            TurnState::PlayerTurn => Side::Player,
            TurnState::EnemyTurn => Side::Enemy,
            TurnState::Idle => return Ok(false),
            TurnState::Setup => {
                return Err(anyhow::anyhow!(GameError::OutOfTurn(Side::Player)))
            }
        };
        let (shooter, other) = match side {
            Side::Player => (&mut self.player, &mut self.enemy),
            Side::Enemy => (&mut self.enemy, &mut self.player),
        };
        let target_grid = self.engine.grid(side.opponent());
        let Some(coord) = shooter.select_target(target_grid, rng).await? else {
            self.engine.pass_turn(side)?;
            return Ok(true);
        };
        match self.engine.fire(side, coord) {
            Ok(result) => {
                if result != ShotResult::Repeat {
                    self.shots_fired[side as usize] += 1;
                }
                shooter.handle_shot_result(coord, result);
                other.handle_incoming_shot(coord, result);
            }
            Err(GameError::OutOfBounds(c)) => {
                log::warn!("{:?} aimed outside the grid at {}", side, c);
            }
            Err(e) => return Err(anyhow::anyhow!(e)),
        }
        Ok(self.engine.turn() != TurnState::Idle)
    }

    /// Run until a winner is declared.
    pub async fn run(&mut self, rng: &mut SmallRng) -> anyhow::Result<MatchOutcome> {
        if self.engine.turn() == TurnState::Setup {
            self.engine.start_turn_phase()?;
        }
        while self.step(rng).await? {}
        self.engine
            .outcome()
            .ok_or_else(|| anyhow::anyhow!("match ended without an outcome"))
    }
}
