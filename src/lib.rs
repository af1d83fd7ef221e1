// Library exports for Battlesnake bot
// This allows the server binary, the replay tool and the tests to share the decision engine

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod handler;
pub mod hazards;
pub mod legal;
pub mod observer;
pub mod replay;
pub mod selector;
pub mod types;
