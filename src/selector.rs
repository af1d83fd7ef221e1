// Move selection
//
// Hungry snakes walk toward food, everyone else follows a fixed preference
// order. When neither produces a move we draw uniformly from whatever is
// still legal, and when nothing is legal we accept the default direction.

use rand::Rng;

use crate::config::{FoodTargeting, MovementConfig};
use crate::legal::LegalMoves;
use crate::observer::DecisionObserver;
use crate::types::{Coord, Direction, GameState};

/// Picks the move for this turn from the legal mapping
///
/// # Arguments
/// * `state` - Snapshot the legal mapping was computed from
/// * `legal` - Output of `legal::legal_moves`
/// * `settings` - Thresholds, preference order and default direction
/// * `rng` - Source for the random fallback
/// * `observer` - Receives diagnostic events, never consulted
pub fn select_move<R: Rng>(
    state: &GameState,
    legal: &LegalMoves,
    settings: &MovementConfig,
    rng: &mut R,
    observer: &dyn DecisionObserver,
) -> Direction {
    if state.you.health < settings.low_health_threshold {
        observer.food_seek_entered(state.you.health, state.board.food.len());
        return seek_food(state, legal, settings, rng, observer);
    }

    if let Some(direction) = settings
        .preference_order
        .iter()
        .copied()
        .find(|&d| legal.is_legal(d))
    {
        return direction;
    }

    // Only reachable with a partial preference order or no legal move at all
    random_move(legal, settings.default_direction, rng, observer)
}

/// Steps toward food along the first axis that is both offset and legal
pub fn seek_food<R: Rng>(
    state: &GameState,
    legal: &LegalMoves,
    settings: &MovementConfig,
    rng: &mut R,
    observer: &dyn DecisionObserver,
) -> Direction {
    let head = match state.you.head_cell() {
        Some(head) => head,
        None => return random_move(legal, settings.default_direction, rng, observer),
    };

    let food = &state.board.food;
    if food.is_empty() {
        return random_move(legal, settings.default_direction, rng, observer);
    }

    let choice = match settings.food_targeting {
        FoodTargeting::Nearest => nearest_first(&head, food)
            .into_iter()
            .find_map(|target| step_toward(&head, &target, legal)),
        FoodTargeting::InOrder => food
            .iter()
            .find_map(|target| first_axis_step(&head, target, legal)),
    };

    match choice {
        Some(direction) => direction,
        None => random_move(legal, settings.default_direction, rng, observer),
    }
}

/// Uniform draw over the legal directions, `default` when there are none
pub fn random_move<R: Rng>(
    legal: &LegalMoves,
    default: Direction,
    rng: &mut R,
    observer: &dyn DecisionObserver,
) -> Direction {
    let safe = legal.safe();

    if safe.is_empty() {
        observer.no_safe_moves(default);
        return default;
    }

    observer.random_fallback_used(safe.len());
    safe[rng.random_range(0..safe.len())]
}

/// Food sorted by Manhattan distance from the head; ties keep snapshot order
fn nearest_first(head: &Coord, food: &[Coord]) -> Vec<Coord> {
    let mut ordered = food.to_vec();
    ordered.sort_by_key(|f| head.manhattan_distance(f));
    ordered
}

/// Axis priority x-before-y, trying every offset direction that is legal
fn step_toward(head: &Coord, target: &Coord, legal: &LegalMoves) -> Option<Direction> {
    candidate_steps(head, target)
        .iter()
        .flatten()
        .copied()
        .find(|&d| legal.is_legal(d))
}

/// Only the first offset axis counts; an illegal step skips this food
fn first_axis_step(head: &Coord, target: &Coord, legal: &LegalMoves) -> Option<Direction> {
    candidate_steps(head, target)
        .iter()
        .flatten()
        .next()
        .copied()
        .filter(|&d| legal.is_legal(d))
}

fn candidate_steps(head: &Coord, target: &Coord) -> [Option<Direction>; 4] {
    [
        if head.x > target.x { Some(Direction::Left) } else { None },
        if head.x < target.x { Some(Direction::Right) } else { None },
        if head.y > target.y { Some(Direction::Down) } else { None },
        if head.y < target.y { Some(Direction::Up) } else { None },
    ]
}
