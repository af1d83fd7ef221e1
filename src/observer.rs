// Decision observers
//
// The engine reports what it is doing through this trait at fixed points of a
// decision. Observers only watch: nothing they do feeds back into the move.

use log::{debug, info};

use crate::legal::LegalMoves;
use crate::types::Direction;

/// Sink for diagnostic events emitted while deciding a move.
/// Every method defaults to a no-op.
pub trait DecisionObserver {
    /// Hazard set finished, `count` distinct cells
    fn hazards_computed(&self, _count: usize) {}

    /// Legal mapping finished
    fn legal_moves_computed(&self, _legal: &LegalMoves) {}

    /// Health under the threshold, switching to food seeking
    fn food_seek_entered(&self, _health: i32, _food_count: usize) {}

    /// Falling back to a uniform draw over `candidates`
    fn random_fallback_used(&self, _candidates: usize) {}

    /// Nothing is legal, returning the default direction
    fn no_safe_moves(&self, _default: Direction) {}

    /// Final choice for the turn
    fn move_chosen(&self, _direction: Direction) {}
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DecisionObserver for NoopObserver {}

/// Forwards events to the `log` facade, keyed by game id and turn
#[derive(Debug, Clone)]
pub struct LogObserver<'a> {
    game_id: &'a str,
    turn: i32,
}

impl<'a> LogObserver<'a> {
    pub fn new(game_id: &'a str, turn: i32) -> Self {
        LogObserver { game_id, turn }
    }
}

impl DecisionObserver for LogObserver<'_> {
    fn hazards_computed(&self, count: usize) {
        debug!("{} TURN {}: {} hazard cells", self.game_id, self.turn, count);
    }

    fn legal_moves_computed(&self, legal: &LegalMoves) {
        debug!("{} TURN {}: legal moves {}", self.game_id, self.turn, legal);
    }

    fn food_seek_entered(&self, health: i32, food_count: usize) {
        info!(
            "{} TURN {}: Finding food (health {}, {} on board)",
            self.game_id, self.turn, health, food_count
        );
    }

    fn random_fallback_used(&self, candidates: usize) {
        info!(
            "{} TURN {}: Random move among {} safe moves",
            self.game_id, self.turn, candidates
        );
    }

    fn no_safe_moves(&self, default: Direction) {
        info!(
            "{} TURN {}: NO SAFE MOVES! Going {}",
            self.game_id, self.turn, default
        );
    }

    fn move_chosen(&self, direction: Direction) {
        info!("{} TURN {}: MOVE: {}", self.game_id, self.turn, direction);
    }
}
