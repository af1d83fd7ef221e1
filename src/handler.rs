// HTTP handler bindings for Battlesnake API endpoints
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's core logic methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Rejecting snapshots the engine does not accept
// - Extracting Bot instance from Rocket's managed state
// - Delegating to Bot methods
// - Serializing responses

use log::warn;
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket};
use serde_json::Value;

use crate::bot::Bot;
use crate::types::GameState;

/// Builds the Rocket instance serving `bot`
pub fn build_rocket(bot: Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/cautious-snake");
            })
        }))
        .mount("/", routes![index, start, get_move, end])
}

/// GET / endpoint
/// Returns bot metadata and appearance configuration
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
/// Called when a game starts - allows initialization logic
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<GameState>) -> Status {
    bot.start(&start_req);

    Status::Ok
}

/// POST /move endpoint
/// Called each turn to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub fn get_move(bot: &rocket::State<Bot>, move_req: Json<GameState>) -> Result<Json<Value>, Status> {
    if let Err(e) = move_req.validate() {
        warn!(
            "{} TURN {}: rejecting snapshot: {}",
            move_req.game.id, move_req.turn, e
        );
        return Err(Status::BadRequest);
    }

    Ok(Json(bot.get_move(&move_req)))
}

/// POST /end endpoint
/// Called when a game ends - allows cleanup and logging
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<GameState>) -> Status {
    bot.end(&end_req);

    Status::Ok
}
