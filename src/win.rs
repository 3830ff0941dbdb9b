//! Win evaluation from the remaining-ship counts.

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "runtime", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchOutcome {
    PlayerWon,
    EnemyWon,
    /// Both fleets reached zero in the same resolution step.
    Draw,
}

impl MatchOutcome {
    /// Boolean view for result displays; a draw is not a player win.
    pub fn player_won(self) -> bool {
        self == MatchOutcome::PlayerWon
    }
}

/// Decide the match from the remaining-ship counts. `None` while both sides
/// still have ships afloat.
pub fn evaluate_win(player_remaining: usize, enemy_remaining: usize) -> Option<MatchOutcome> {
    match (player_remaining, enemy_remaining) {
        (0, 0) => Some(MatchOutcome::Draw),
        (0, _) => Some(MatchOutcome::EnemyWon),
        (_, 0) => Some(MatchOutcome::PlayerWon),
        _ => None,
    }
}
