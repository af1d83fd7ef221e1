// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The per-turn decision runs in three stages, each a pure function of the
// snapshot: hazards -> legal moves -> selection.
// For more info see docs.battlesnake.com

use log::info;
use rand::Rng;
use serde_json::{json, Value};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::hazards::build_hazards;
use crate::legal::legal_moves;
use crate::observer::{DecisionObserver, LogObserver};
use crate::selector::select_move;
use crate::types::{Direction, GameState};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Attaches a debug logger that records every decision
    pub fn with_debug_logger(mut self, debug_logger: DebugLogger) -> Self {
        self.debug_logger = debug_logger;
        self
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
            "version": appearance.version,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, state: &GameState) {
        info!("{} START", state.game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, state: &GameState) {
        info!("{} END", state.game.id);
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The snapshot must already have passed `GameState::validate`.
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move direction
    pub fn get_move(&self, state: &GameState) -> Value {
        let observer = LogObserver::new(&state.game.id, state.turn);
        let chosen_move = self.decide(state, &mut rand::rng(), &observer);

        self.debug_logger.log_move(state, chosen_move);

        json!({ "move": chosen_move.as_str() })
    }

    /// Runs the full decision pipeline with an explicit random source and observer
    pub fn decide<R: Rng>(
        &self,
        state: &GameState,
        rng: &mut R,
        observer: &dyn DecisionObserver,
    ) -> Direction {
        let hazards = build_hazards(state);
        observer.hazards_computed(hazards.len());

        let legal = legal_moves(state, &hazards);
        observer.legal_moves_computed(&legal);

        let chosen = select_move(state, &legal, &self.config.movement, rng, observer);
        observer.move_chosen(chosen);
        chosen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::recording::RecordingObserver;
    use crate::observer::NoopObserver;
    use crate::types::{Battlesnake, Board, Coord, Game};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(health: i32, body: &[(i32, i32)], food: &[(i32, i32)]) -> GameState {
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
        GameState {
            game: Game {
                id: "bot".to_string(),
                ruleset: json!({}),
                timeout: 500,
                source: String::new(),
            },
            turn: 1,
            board: Board {
                height: 11,
                width: 11,
                food: food.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
                snakes: vec![you.clone()],
                hazards: vec![],
            },
            you,
        }
    }

    #[test]
    fn test_info_uses_appearance_config() {
        let bot = Bot::new(Config::default_hardcoded());
        let info = bot.info();

        assert_eq!(info["apiversion"], "1");
        assert_eq!(info["color"], "#babaca");
        assert_eq!(info["head"], "snowman");
        assert_eq!(info["tail"], "coffee");
    }

    #[test]
    fn test_get_move_response_shape() {
        let bot = Bot::new(Config::default_hardcoded());
        let response = bot.get_move(&state(100, &[(5, 5), (5, 4)], &[]));

        assert_eq!(response, json!({ "move": "up" }));
    }

    #[test]
    fn test_decide_emits_events_in_order() {
        let bot = Bot::new(Config::default_hardcoded());
        let observer = RecordingObserver::default();
        let mut rng = StdRng::seed_from_u64(0);

        let chosen = bot.decide(&state(10, &[(5, 5), (5, 4)], &[(5, 8)]), &mut rng, &observer);

        assert_eq!(chosen, Direction::Up);
        assert_eq!(
            observer.events(),
            vec![
                "hazards:2".to_string(),
                "legal:3".to_string(),
                "seek:1".to_string(),
                "move:up".to_string(),
            ]
        );
    }

    #[test]
    fn test_observer_does_not_change_decision() {
        let bot = Bot::new(Config::default_hardcoded());
        let s = state(5, &[(0, 0), (0, 1)], &[]);

        let quiet = bot.decide(&s, &mut StdRng::seed_from_u64(9), &NoopObserver);
        let noisy = bot.decide(&s, &mut StdRng::seed_from_u64(9), &RecordingObserver::default());

        assert_eq!(quiet, noisy);
        assert_eq!(quiet, Direction::Right);
    }
}
