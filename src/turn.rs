//! Turn alternation state machine.

use crate::common::Side;

/// Whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub enum TurnState {
    /// Ships are still being placed.
    #[default]
    Setup,
    PlayerTurn,
    EnemyTurn,
    /// A winner was declared. Terminal.
    Idle,
}

impl TurnState {
    /// Side allowed to fire in this state.
    pub fn active_side(self) -> Option<Side> {
        match self {
            TurnState::PlayerTurn => Some(Side::Player),
            TurnState::EnemyTurn => Some(Side::Enemy),
            TurnState::Setup | TurnState::Idle => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TurnStateMachine {
    state: TurnState,
}

impl TurnStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_turn_of(&self, side: Side) -> bool {
        self.state.active_side() == Some(side)
    }

    /// Setup -> PlayerTurn. Returns `false` (and does nothing) from any other
    /// state.
    pub fn start_turn_phase(&mut self) -> bool {
        if self.state != TurnState::Setup {
            return false;
        }
        self.state = TurnState::PlayerTurn;
        log::info!("turn phase started");
        true
    }

    /// A hit keeps the turn; a miss hands it to the other side. Ignored
    /// outside PlayerTurn/EnemyTurn.
    pub fn next_turn(&mut self, was_hit: bool) {
        if was_hit {
            return;
        }
        self.state = match self.state {
            TurnState::PlayerTurn => TurnState::EnemyTurn,
            TurnState::EnemyTurn => TurnState::PlayerTurn,
            other => other,
        };
    }

    /// Enter the terminal Idle state.
    pub fn finish(&mut self) {
        self.state = TurnState::Idle;
    }
}
