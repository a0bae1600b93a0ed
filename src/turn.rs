//! Turn state machine: strict player/enemy alternation.
//!
//! A single-threaded, turn-gated loop. Player displacement requests are
//! honored only in `Player` state and enemies act only in `Enemy` state, so
//! one resolver pass never mixes player and AI moves.

/// Whose displacement requests are honored this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Input may set the selected entity's pending displacement.
    Player,
    /// Reserved slot for a timed delay between turns; currently passes
    /// straight through to `Player`.
    Thinking,
    /// AI personas pick their displacements.
    Enemy,
}

#[derive(Debug, Clone, Copy)]
pub struct TurnMachine {
    pub state: TurnState,
}

impl TurnMachine {
    pub fn new() -> Self {
        Self {
            state: TurnState::Player,
        }
    }

    /// Advance after a full frame. `player_acted` is the resolver's record
    /// of whether the selected entity's displacement was consumed this
    /// frame; it only matters in `Player` state.
    pub fn advance(&mut self, player_acted: bool) {
        self.state = match self.state {
            TurnState::Player if player_acted => TurnState::Enemy,
            TurnState::Player => TurnState::Player,
            TurnState::Enemy => TurnState::Thinking,
            TurnState::Thinking => TurnState::Player,
        };
    }
}

impl Default for TurnMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_player_keeps_the_turn() {
        let mut machine = TurnMachine::new();
        for _ in 0..5 {
            machine.advance(false);
            assert_eq!(machine.state, TurnState::Player);
        }
    }

    #[test]
    fn acting_cycles_through_enemy_and_thinking() {
        let mut machine = TurnMachine::new();
        machine.advance(true);
        assert_eq!(machine.state, TurnState::Enemy);
        machine.advance(false);
        assert_eq!(machine.state, TurnState::Thinking);
        machine.advance(false);
        assert_eq!(machine.state, TurnState::Player);
    }

    #[test]
    fn player_acted_is_ignored_outside_player_state() {
        let mut machine = TurnMachine::new();
        machine.advance(true);
        // A spurious flag while enemies act must not skip the thinking pass.
        machine.advance(true);
        assert_eq!(machine.state, TurnState::Thinking);
        machine.advance(true);
        assert_eq!(machine.state, TurnState::Player);
    }
}
