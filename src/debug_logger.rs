// Debug logging module for asynchronous game state logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's state is written to a JSONL file.

use log::error;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::runtime::Handle;
use tokio::sync::Mutex;

use crate::types::{Direction, GameState};

/// Represents a single debug log entry
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DebugLogEntry {
    pub turn: i32,
    pub game_id: String,
    pub chosen_move: String,
    pub state: GameState,
    pub timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return DebugLogger::disabled();
        }

        // Initialize the log file
        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                DebugLogger::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    /// False when recording was turned off or the log file could not be opened
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(&self, state: &GameState, chosen_move: Direction) {
        if !self.enabled {
            return;
        }

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Debug log entry dropped, no async runtime: {}", e);
                return;
            }
        };

        let entry = DebugLogEntry {
            turn: state.turn,
            game_id: state.game.id.clone(),
            chosen_move: chosen_move.as_str().to_string(),
            state: state.clone(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        };
        let file_handle = self.file.clone();

        // Spawn fire-and-forget task
        handle.spawn(async move {
            Self::write_entry(file_handle, entry).await;
        });
    }

    /// Writes one entry as a JSON line, serialised behind the file mutex
    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else {
                        // Flush to ensure data is written to disk
                        if let Err(e) = file.flush().await {
                            error!("Failed to flush debug log: {}", e);
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
