//! Match orchestration: placement phase, turn-gated shots and win detection.

use rand::Rng;

use crate::common::{Coord, GameError, Orientation, ShipId, ShotResult, Side, Visibility};
use crate::config::GameConfig;
use crate::events::{EventBus, GameEvent};
use crate::fleet::{PlacementReport, ShipManager};
use crate::grid::Grid;
use crate::ship::ShipType;
use crate::turn::{TurnState, TurnStateMachine};
use crate::win::{evaluate_win, MatchOutcome};

/// Receives the outcome once, when the match ends.
pub type ResultHandler = Box<dyn FnMut(MatchOutcome) + Send>;

/// Core game logic holding both fleets and the turn state.
pub struct GameEngine {
    config: GameConfig,
    ships: ShipManager,
    turn: TurnStateMachine,
    events: EventBus,
    outcome: Option<MatchOutcome>,
    result_handler: Option<ResultHandler>,
}

impl GameEngine {
    /// Create an engine with empty grids in the Setup state.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_events(config, EventBus::new())
    }

    /// Like [`GameEngine::new`], raising signals on an existing bus.
    pub fn with_events(config: GameConfig, events: EventBus) -> Result<Self, GameError> {
        config.validate()?;
        let ships = ShipManager::new(config.width, config.height, events.clone())?;
        Ok(Self {
            config,
            ships,
            turn: TurnStateMachine::new(),
            events,
            outcome: None,
            result_handler: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn ships(&self) -> &ShipManager {
        &self.ships
    }

    pub(crate) fn ships_mut(&mut self) -> &mut ShipManager {
        &mut self.ships
    }

    /// Read-only view of a side's grid for renderers and shooters.
    pub fn grid(&self, side: Side) -> &Grid {
        self.ships.grid(side)
    }

    pub fn remaining(&self, side: Side) -> usize {
        self.ships.remaining(side)
    }

    pub fn turn(&self) -> TurnState {
        self.turn.state()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Register the win/result collaborator.
    pub fn on_result<F>(&mut self, handler: F)
    where
        F: FnMut(MatchOutcome) + Send + 'static,
    {
        self.result_handler = Some(Box::new(handler));
    }

    fn ensure_setup(&self) -> Result<(), GameError> {
        if self.turn.state() == TurnState::Setup {
            Ok(())
        } else {
            Err(GameError::NotInSetup)
        }
    }

    /// Commit one ship at an explicit position during Setup.
    pub fn place_ship(
        &mut self,
        side: Side,
        start: Coord,
        ship_type: &ShipType,
        orientation: Orientation,
        visibility: Visibility,
    ) -> Result<ShipId, GameError> {
        self.ensure_setup()?;
        self.ships
            .try_place_ship(side, start, ship_type, orientation, visibility)
    }

    /// Randomly place the configured enemy ships, under fog of war unless
    /// `show_enemy_ships` is set.
    pub fn place_enemy_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<PlacementReport, GameError> {
        self.ensure_setup()?;
        let ships = self.config.enemy_ships.clone();
        let visibility = if self.config.show_enemy_ships {
            Visibility::Revealed
        } else {
            Visibility::Hidden
        };
        Ok(self
            .ships
            .place_randomly(Side::Enemy, &ships, visibility, rng))
    }

    /// Randomly place the configured player ships, visible.
    pub fn place_player_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<PlacementReport, GameError> {
        self.ensure_setup()?;
        let ships = self.config.player_ships.clone();
        Ok(self
            .ships
            .place_randomly(Side::Player, &ships, Visibility::Revealed, rng))
    }

    /// Leave Setup and hand the first turn to the player.
    pub fn start_turn_phase(&mut self) -> Result<(), GameError> {
        self.ensure_setup()?;
        for side in [Side::Player, Side::Enemy] {
            if self.ships.ships(side).is_empty() {
                return Err(GameError::EmptyFleet(side));
            }
        }
        self.turn.start_turn_phase();
        Ok(())
    }

    /// Fire at `target` on the opponent of `shooter`.
    ///
    /// Rejected with `OutOfTurn` unless `shooter` holds the turn. A repeat
    /// shot changes nothing and keeps the turn.
    pub fn fire(&mut self, shooter: Side, target: Coord) -> Result<ShotResult, GameError> {
        if !self.turn.is_turn_of(shooter) {
            return Err(GameError::OutOfTurn(shooter));
        }
        let result = self.ships.shoot(shooter.opponent(), target)?;
        log::debug!("{:?} fires at {} -> {:?}", shooter, target, result);
        match result {
            ShotResult::Repeat => return Ok(result),
            ShotResult::Sink(_) => self.check_win(),
            ShotResult::Hit | ShotResult::Miss => {}
        }
        self.turn.next_turn(result.is_hit());
        Ok(result)
    }

    /// Give up the current shot, e.g. when no target is left.
    pub fn pass_turn(&mut self, shooter: Side) -> Result<(), GameError> {
        if !self.turn.is_turn_of(shooter) {
            return Err(GameError::OutOfTurn(shooter));
        }
        log::warn!("{:?} passes the turn", shooter);
        self.turn.next_turn(false);
        Ok(())
    }

    fn check_win(&mut self) {
        let outcome = evaluate_win(
            self.ships.remaining(Side::Player),
            self.ships.remaining(Side::Enemy),
        );
        if let Some(outcome) = outcome {
            self.declare(outcome);
        }
    }

    fn declare(&mut self, outcome: MatchOutcome) {
        self.turn.finish();
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        log::info!("match over: {:?}", outcome);
        self.events.raise(GameEvent::MatchOver);
        if let Some(handler) = self.result_handler.as_mut() {
            handler(outcome);
        }
    }
}

impl core::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEngine")
            .field("turn", &self.turn.state())
            .field("player", self.ships.grid(Side::Player))
            .field("enemy", self.ships.grid(Side::Enemy))
            .field("outcome", &self.outcome)
            .finish()
    }
}
