// Hazard set construction
//
// Collects every cell the head must not enter next turn: our own body, the
// bodies of opponents (minus the head of any opponent we out-heal), and every
// cell an opponent head can reach next turn.

use std::collections::HashSet;

use crate::types::{Battlesnake, Coord, GameState};

/// Builds the set of cells that are unsafe as our next head position
///
/// Head-to-head collisions go to the snake with more health. Ties count as a
/// loss, so an opponent's head is only left open when we are strictly
/// healthier. Opponent next-head cells are always added, whatever the health
/// comparison says.
pub fn build_hazards(state: &GameState) -> HashSet<Coord> {
    let you = &state.you;
    let mut hazards: HashSet<Coord> = you.body.iter().copied().collect();

    for snake in opponents(state) {
        let skip = if you.health > snake.health { 1 } else { 0 };
        hazards.extend(snake.body.iter().skip(skip).copied());
    }

    for snake in opponents(state) {
        if let Some(head) = snake.head_cell() {
            hazards.extend(head.neighbors().iter().copied());
        }
    }

    hazards
}

/// Every snake on the board except ours
fn opponents(state: &GameState) -> impl Iterator<Item = &Battlesnake> {
    let you_id = state.you.id.as_str();
    state.board.snakes.iter().filter(move |s| s.id != you_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Board, Game};
    use serde_json::json;

    fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health,
            head: body.first().copied().unwrap_or(Coord::new(0, 0)),
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn state_with(you: Battlesnake, others: Vec<Battlesnake>) -> GameState {
        let mut snakes = vec![you.clone()];
        snakes.extend(others);
        GameState {
            game: Game {
                id: "hazards".to_string(),
                ruleset: json!({}),
                timeout: 500,
                source: String::new(),
            },
            turn: 10,
            board: Board {
                height: 11,
                width: 11,
                food: vec![],
                snakes,
                hazards: vec![],
            },
            you,
        }
    }

    #[test]
    fn test_own_body_including_head_is_hazard() {
        let you = snake("me", 90, &[(5, 5), (5, 4), (5, 3)]);
        let hazards = build_hazards(&state_with(you, vec![]));

        assert_eq!(hazards.len(), 3);
        assert!(hazards.contains(&Coord::new(5, 5)));
        assert!(hazards.contains(&Coord::new(5, 3)));
    }

    #[test]
    fn test_weaker_opponent_head_is_left_open() {
        let you = snake("me", 50, &[(0, 0), (0, 1)]);
        let them = snake("them", 30, &[(8, 8), (8, 7), (8, 6)]);
        let hazards = build_hazards(&state_with(you, vec![them]));

        assert!(!hazards.contains(&Coord::new(8, 8)));
        assert!(hazards.contains(&Coord::new(8, 7)));
        assert!(hazards.contains(&Coord::new(8, 6)));
    }

    #[test]
    fn test_equal_or_stronger_opponent_head_is_hazard() {
        let you = snake("me", 40, &[(0, 0), (0, 1)]);
        let equal = snake("equal", 40, &[(8, 8), (8, 7)]);
        let stronger = snake("stronger", 90, &[(2, 8), (2, 7)]);
        let hazards = build_hazards(&state_with(you, vec![equal, stronger]));

        assert!(hazards.contains(&Coord::new(8, 8)));
        assert!(hazards.contains(&Coord::new(2, 8)));
    }

    #[test]
    fn test_opponent_next_heads_are_hazards_regardless_of_health() {
        let you = snake("me", 100, &[(0, 0), (0, 1)]);
        let them = snake("them", 1, &[(5, 5), (5, 4)]);
        let hazards = build_hazards(&state_with(you, vec![them]));

        for cell in &[(6, 5), (4, 5), (5, 6), (5, 4)] {
            assert!(hazards.contains(&Coord::new(cell.0, cell.1)), "{:?}", cell);
        }
    }

    #[test]
    fn test_opponent_next_heads_off_board_are_kept() {
        let you = snake("me", 100, &[(5, 5), (5, 4)]);
        let them = snake("them", 100, &[(0, 0), (1, 0)]);
        let hazards = build_hazards(&state_with(you, vec![them]));

        assert!(hazards.contains(&Coord::new(-1, 0)));
        assert!(hazards.contains(&Coord::new(0, -1)));
    }

    #[test]
    fn test_eliminated_snake_contributes_nothing() {
        let you = snake("me", 50, &[(5, 5), (5, 4)]);
        let gone = snake("gone", 0, &[]);
        let hazards = build_hazards(&state_with(you, vec![gone]));

        assert_eq!(hazards.len(), 2);
    }
}
