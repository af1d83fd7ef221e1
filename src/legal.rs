// Legal move filter
//
// Starts with all four directions safe and knocks them out one rule at a
// time: reversing onto the neck, leaving the board, entering a hazard cell.

use std::collections::HashSet;
use std::fmt;

use crate::types::{Coord, Direction, GameState};

/// Per-direction safety flags
///
/// Flags start `true` and can only be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMoves {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
}

impl LegalMoves {
    pub fn all_safe() -> Self {
        LegalMoves {
            up: true,
            down: true,
            left: true,
            right: true,
        }
    }

    pub fn none_safe() -> Self {
        LegalMoves {
            up: false,
            down: false,
            left: false,
            right: false,
        }
    }

    pub fn is_legal(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn mark_unsafe(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = false,
            Direction::Down => self.down = false,
            Direction::Left => self.left = false,
            Direction::Right => self.right = false,
        }
    }

    /// Legal directions in `Direction::all()` order
    pub fn safe(&self) -> Vec<Direction> {
        Direction::all()
            .iter()
            .copied()
            .filter(|&d| self.is_legal(d))
            .collect()
    }

    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Builds a mapping where only `directions` are legal
    #[cfg(test)]
    pub(crate) fn only(directions: &[Direction]) -> Self {
        let mut legal = LegalMoves::none_safe();
        for &d in directions {
            match d {
                Direction::Up => legal.up = true,
                Direction::Down => legal.down = true,
                Direction::Left => legal.left = true,
                Direction::Right => legal.right = true,
            }
        }
        legal
    }
}

impl fmt::Display for LegalMoves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "up={} down={} left={} right={}",
            self.up, self.down, self.left, self.right
        )
    }
}

/// Applies the neck, boundary and hazard rules to our head
pub fn legal_moves(state: &GameState, hazards: &HashSet<Coord>) -> LegalMoves {
    let mut legal = LegalMoves::all_safe();
    let you = &state.you;

    let head = match you.head_cell() {
        Some(head) => head,
        None => return LegalMoves::none_safe(),
    };

    if let Some(neck) = you.neck_cell() {
        if let Some(back) = Direction::toward(&head, &neck) {
            legal.mark_unsafe(back);
        }
    }

    for &direction in Direction::all().iter() {
        let next = direction.apply(&head);
        if !state.board.contains(&next) || hazards.contains(&next) {
            legal.mark_unsafe(direction);
        }
    }

    legal
}
