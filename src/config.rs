// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub movement: MovementConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// How candidate food cells are ordered and tried while seeking food
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FoodTargeting {
    /// Nearest food first (Manhattan distance), every axis tried per food
    Nearest,
    /// Snapshot order, only the first offset axis is tried per food
    InOrder,
}

/// Move selection constants
#[derive(Debug, Deserialize, Clone)]
pub struct MovementConfig {
    pub low_health_threshold: i32,
    pub preference_order: Vec<Direction>,
    pub default_direction: Direction,
    pub food_targeting: FoodTargeting,
}

/// Registration descriptor served on GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
    pub version: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;

        if config.movement.preference_order.is_empty() {
            return Err("movement.preference_order must list at least one direction".to_string());
        }

        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            movement: MovementConfig {
                low_health_threshold: 20,
                preference_order: vec![
                    Direction::Up,
                    Direction::Left,
                    Direction::Down,
                    Direction::Right,
                ],
                default_direction: Direction::Down,
                food_targeting: FoodTargeting::Nearest,
            },
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "cautious-snake".to_string(),
                color: "#babaca".to_string(),
                head: "snowman".to_string(),
                tail: "coffee".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            log::warn!(
                "Could not load Snake.toml ({}), using hardcoded defaults",
                e
            );
            Self::default_hardcoded()
        })
    }
}
