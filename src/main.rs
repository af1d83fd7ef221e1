#[macro_use]
extern crate rocket;

use cautious_snake::bot::Bot;
use cautious_snake::config::Config;
use cautious_snake::debug_logger::DebugLogger;
use cautious_snake::handler;
use log::{info, warn};
use std::env;

#[launch]
async fn rocket() -> _ {
    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable. However, Rocket looks at the `ROCKET_PORT` environment variable.
    // If we find a value for `PORT`, we set `ROCKET_PORT` to that value.
    if let Ok(port) = env::var("PORT") {
        env::set_var("ROCKET_PORT", &port);
    }

    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Battlesnake Server...");

    // Load configuration once at startup
    let config = Config::load_or_default();
    let debug_logger = DebugLogger::new(config.debug.enabled, &config.debug.log_file_path).await;
    if config.debug.enabled && !debug_logger.is_enabled() {
        warn!("Decision recording requested but unavailable, continuing without it");
    }
    let bot = Bot::new(config).with_debug_logger(debug_logger);

    handler::build_rocket(bot)
}
