// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: Value,
    #[serde(default)]
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

impl Board {
    /// True if the coordinate lies within [0, width-1] x [0, height-1]
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.x < self.width && coord.y >= 0 && coord.y < self.height
    }
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    #[serde(default)]
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

impl Battlesnake {
    /// Head cell taken from the body, `None` for an eliminated snake
    pub fn head_cell(&self) -> Option<Coord> {
        self.body.first().copied()
    }

    /// Segment directly behind the head
    pub fn neck_cell(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// The four orthogonally adjacent cells (right, left, up, down)
    pub fn neighbors(&self) -> [Coord; 4] {
        [
            Coord::new(self.x + 1, self.y),
            Coord::new(self.x - 1, self.y),
            Coord::new(self.x, self.y + 1),
            Coord::new(self.x, self.y - 1),
        ]
    }

    /// Taxicab distance, widened so opposite corners of any board fit
    pub fn manhattan_distance(&self, other: &Coord) -> u64 {
        let dx = (i64::from(self.x) - i64::from(other.x)).unsigned_abs();
        let dy = (i64::from(self.y) - i64::from(other.y)).unsigned_abs();
        dx + dy
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses an API label, case-insensitively
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }

    /// Direction in which `to` lies from `from`, x axis checked first
    ///
    /// Only the sign of each offset counts, so `to` need not be adjacent.
    /// Returns `None` when both cells are the same.
    pub fn toward(from: &Coord, to: &Coord) -> Option<Direction> {
        if to.x < from.x {
            Some(Direction::Left)
        } else if to.x > from.x {
            Some(Direction::Right)
        } else if to.y < from.y {
            Some(Direction::Down)
        } else if to.y > from.y {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

/// Reasons a snapshot is refused before it reaches the decision engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    InvalidDimensions { width: i32, height: i32 },
    EmptyBody { snake_id: String },
    HeadMismatch { snake_id: String, head: Coord },
    NegativeHealth { snake_id: String, health: i32 },
    SnakeOffBoard { snake_id: String, coord: Coord },
    FoodOffBoard { coord: Coord },
    DuplicateSnakeId { snake_id: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::InvalidDimensions { width, height } => {
                write!(f, "invalid board dimensions {}x{}", width, height)
            }
            SnapshotError::EmptyBody { snake_id } => {
                write!(f, "snake '{}' has an empty body", snake_id)
            }
            SnapshotError::HeadMismatch { snake_id, head } => write!(
                f,
                "snake '{}' reports head ({}, {}) but its body starts elsewhere",
                snake_id, head.x, head.y
            ),
            SnapshotError::NegativeHealth { snake_id, health } => {
                write!(f, "snake '{}' has negative health {}", snake_id, health)
            }
            SnapshotError::SnakeOffBoard { snake_id, coord } => write!(
                f,
                "snake '{}' has a segment off the board at ({}, {})",
                snake_id, coord.x, coord.y
            ),
            SnapshotError::FoodOffBoard { coord } => {
                write!(f, "food off the board at ({}, {})", coord.x, coord.y)
            }
            SnapshotError::DuplicateSnakeId { snake_id } => {
                write!(f, "snake id '{}' appears more than once", snake_id)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl GameState {
    /// Rejects snapshots the decision engine does not accept
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let board = &self.board;
        if board.width <= 0 || board.height <= 0 {
            return Err(SnapshotError::InvalidDimensions {
                width: board.width,
                height: board.height,
            });
        }

        if self.you.body.is_empty() {
            return Err(SnapshotError::EmptyBody {
                snake_id: self.you.id.clone(),
            });
        }

        let mut seen_ids = HashSet::new();
        for snake in board.snakes.iter().chain(std::iter::once(&self.you)) {
            if snake.health < 0 {
                return Err(SnapshotError::NegativeHealth {
                    snake_id: snake.id.clone(),
                    health: snake.health,
                });
            }
            if snake.body.first().map_or(false, |first| *first != snake.head) {
                return Err(SnapshotError::HeadMismatch {
                    snake_id: snake.id.clone(),
                    head: snake.head,
                });
            }
            if let Some(coord) = snake.body.iter().find(|c| !board.contains(c)) {
                return Err(SnapshotError::SnakeOffBoard {
                    snake_id: snake.id.clone(),
                    coord: *coord,
                });
            }
        }

        for snake in &board.snakes {
            if !seen_ids.insert(snake.id.as_str()) {
                return Err(SnapshotError::DuplicateSnakeId {
                    snake_id: snake.id.clone(),
                });
            }
        }

        if let Some(coord) = board.food.iter().find(|c| !board.contains(c)) {
            return Err(SnapshotError::FoodOffBoard { coord: *coord });
        }

        Ok(())
    }
}
