// Replay module for analyzing historical game states and debugging decision-making
//
// This module provides functionality to:
// 1. Parse JSONL debug logs
// 2. Replay the decision pipeline on historical states
// 3. Compare recorded vs replayed moves
// 4. Generate detailed analysis reports

use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::Cell;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::debug_logger::DebugLogEntry;
use crate::observer::DecisionObserver;
use crate::types::{Direction, GameState};

/// Represents a single log entry from the debug JSONL file
pub type LogEntry = DebugLogEntry;

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub game_id: String,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    /// The replay went through the random fallback, so a mismatch is expected
    pub random_fallback: bool,
    pub computation_time_us: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub random_mismatches: usize,
    pub match_rate: f64,
}

/// Notes whether the random fallback fired during one decision
#[derive(Default)]
struct FallbackWatch {
    used: Cell<bool>,
}

impl DecisionObserver for FallbackWatch {
    fn random_fallback_used(&self, _candidates: usize) {
        self.used.set(true);
    }
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        Self::parse_entries(BufReader::new(file))
    }

    /// Parses JSONL entries, skipping blank lines
    pub fn parse_entries<B: BufRead>(reader: B) -> Result<Vec<LogEntry>, String> {
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Replays the decision on a single snapshot
    /// The random source is seeded from the turn so replays are repeatable
    pub fn replay_turn(&self, state: &GameState) -> Result<(Direction, bool, u128), String> {
        state
            .validate()
            .map_err(|e| format!("Turn {}: invalid snapshot: {}", state.turn, e))?;

        let start_time = Instant::now();
        let watch = FallbackWatch::default();
        let mut rng = StdRng::seed_from_u64(state.turn as u64);

        let direction = self.bot.decide(state, &mut rng, &watch);

        Ok((direction, watch.used.get(), start_time.elapsed().as_micros()))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move = Direction::parse(&entry.chosen_move)?;
        let (replayed_move, random_fallback, computation_time) = self.replay_turn(&entry.state)?;
        let matches = original_move == replayed_move;

        let result = ReplayResult {
            turn: entry.turn,
            game_id: entry.game_id.clone(),
            original_move,
            replayed_move,
            matches,
            random_fallback,
            computation_time_us: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (time: {}us)",
                    entry.turn,
                    replayed_move.as_str(),
                    computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {}{} (time: {}us)",
                    entry.turn,
                    original_move.as_str(),
                    replayed_move.as_str(),
                    if random_fallback { " [random]" } else { "" },
                    computation_time
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        let mut results = Vec::new();

        for entry in entries {
            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                }
            }
        }

        results
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let random_mismatches = results
            .iter()
            .filter(|r| !r.matches && r.random_fallback)
            .count();
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            random_mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!(
            "Mismatches:     {} ({} after a random fallback)",
            stats.mismatches, stats.random_mismatches
        );
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_us as f64)
                .sum::<f64>()
                / results.len() as f64;

            println!("Average Computation Time:   {:.1}us\n", avg_time);
        }

        // Show mismatches in detail
        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "{} turn {}: {} → {}{}",
                    result.game_id,
                    result.turn,
                    result.original_move.as_str(),
                    result.replayed_move.as_str(),
                    if result.random_fallback { " (random)" } else { "" }
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were made
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Battlesnake, Board, Coord, Game};
    use serde_json::json;
    use std::io::Cursor;

    fn entry(turn: i32, chosen: &str, body: &[(i32, i32)], health: i32) -> LogEntry {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        let you = Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        };
        LogEntry {
            turn,
            game_id: "replay".to_string(),
            chosen_move: chosen.to_string(),
            state: GameState {
                game: Game {
                    id: "replay".to_string(),
                    ruleset: json!({}),
                    timeout: 500,
                    source: String::new(),
                },
                turn,
                board: Board {
                    height: 11,
                    width: 11,
                    food: vec![],
                    snakes: vec![you.clone()],
                    hazards: vec![],
                },
                you,
            },
            timestamp: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn engine() -> ReplayEngine {
        ReplayEngine::new(Config::default_hardcoded(), false)
    }

    #[test]
    fn test_replay_entry_detects_match_and_mismatch() {
        let engine = engine();

        let matched = engine
            .replay_entry(&entry(3, "up", &[(5, 5), (5, 4)], 90))
            .unwrap();
        assert!(matched.matches);
        assert!(!matched.random_fallback);

        let mismatched = engine
            .replay_entry(&entry(4, "left", &[(5, 5), (5, 4)], 90))
            .unwrap();
        assert!(!mismatched.matches);
        assert_eq!(mismatched.replayed_move, Direction::Up);
    }

    #[test]
    fn test_replay_flags_random_fallback() {
        // Hungry with no food: the random fallback decides
        let result = engine()
            .replay_entry(&entry(8, "right", &[(5, 5), (5, 4)], 5))
            .unwrap();
        assert!(result.random_fallback);
    }

    #[test]
    fn test_replay_is_repeatable() {
        let engine = engine();
        let e = entry(21, "up", &[(5, 5), (5, 4)], 5);

        let first = engine.replay_entry(&e).unwrap().replayed_move;
        for _ in 0..10 {
            assert_eq!(engine.replay_entry(&e).unwrap().replayed_move, first);
        }
    }

    #[test]
    fn test_generate_stats() {
        let engine = engine();
        let entries = vec![
            entry(1, "up", &[(5, 5), (5, 4)], 90),
            entry(2, "down", &[(5, 6), (5, 5)], 90),
            entry(3, "up", &[(5, 7), (5, 6)], 90),
            entry(4, "up", &[(5, 8), (5, 7)], 90),
        ];

        let results = engine.replay_all(&entries);
        let stats = engine.generate_stats(&results);

        assert_eq!(stats.total_turns, 4);
        assert_eq!(stats.matches, 3);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.random_mismatches, 0);
        assert!((stats.match_rate - 75.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_entries_round_trips_logged_json() {
        let logged = entry(6, "up", &[(5, 5), (5, 4)], 90);
        let text = format!("{}\n\n", serde_json::to_string(&logged).unwrap());

        let parsed = ReplayEngine::parse_entries(Cursor::new(text)).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].turn, 6);
        assert_eq!(parsed[0].state.you.body.len(), 2);

        let bad = ReplayEngine::parse_entries(Cursor::new("{not json}\n"));
        assert!(bad.is_err());
    }

    #[test]
    fn test_validate_expected_moves() {
        let engine = engine();
        let entries = vec![entry(5, "left", &[(5, 5), (5, 4)], 90)];

        assert!(engine
            .validate_expected_moves(&entries, &[(5, vec![Direction::Left, Direction::Up])])
            .is_ok());
        assert!(engine
            .validate_expected_moves(&entries, &[(5, vec![Direction::Up])])
            .is_err());
        assert!(engine
            .validate_expected_moves(&entries, &[(6, vec![Direction::Up])])
            .is_err());
    }

    #[test]
    fn test_invalid_snapshot_is_not_replayed() {
        let mut bad = entry(2, "up", &[(5, 5), (5, 4)], 90);
        bad.state.board.width = 0;
        assert!(engine().replay_entry(&bad).is_err());
    }
}
