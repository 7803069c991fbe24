//! Snake game state and the per-frame driver
//!
//! [`SnakeGame`] owns everything that changes while playing: the body, the
//! held turn, the food and the RNG. One call to [`SnakeGame::tick`] is one
//! frame:
//!
//! 1. advance the chain (turn, head, followers)
//! 2. if the head left the field or hit the body, reset and stop here
//! 3. if the head reached the food, move the food and grow by one segment
//!
//! Steering only changes the held turn; positions move exclusively in `tick`.

pub mod config;
pub mod playfield;

pub use crate::algorithms::collision::DeathCause;
pub use crate::algorithms::segment_chain::FollowMode;
pub use config::GameConfig;
pub use playfield::Playfield;

use crate::algorithms::segment_chain::{self, Body, ChainParams};
use crate::algorithms::shading::{FOOD_COLOR, HEAD_COLOR};
use crate::algorithms::{collision, food};
use crate::messages::{FoodView, FrameSnapshot, SegmentView, SteerCommand};
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serpent_core::error::SerpentResult;
use std::f64::consts::PI;

/// Heading of a freshly reset snake: straight left
pub const START_HEADING: f64 = PI;

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    /// Food was eaten; `length` is the body length after growing
    Fed { length: usize },
    /// The run ended and the game has already been reset
    Died { cause: DeathCause },
}

/// Session counters for logs and status lines; not a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub ticks: u64,
    pub deaths: u64,
    pub meals: u64,
    pub longest: usize,
}

pub struct SnakeGame<R = StdRng> {
    playfield: Playfield,
    config: GameConfig,
    chain: ChainParams,
    body: Body,
    turn: f64,
    food: Point2<f64>,
    rng: R,
    stats: SessionStats,
}

impl SnakeGame<StdRng> {
    /// Validate `config` and start a game, seeding from `config.seed` when set
    pub fn new(playfield: Playfield, config: GameConfig) -> SerpentResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(playfield, config, rng)
    }
}

impl<R: Rng> SnakeGame<R> {
    /// Start a game drawing food positions from `rng`
    pub fn with_rng(playfield: Playfield, config: GameConfig, rng: R) -> SerpentResult<Self> {
        config.validate()?;

        let chain = config.chain_params();
        let mut game = Self {
            body: Body::new(playfield.start_position(), START_HEADING, HEAD_COLOR),
            food: food::start_position(playfield.width(), playfield.height()),
            playfield,
            config,
            chain,
            turn: 0.0,
            rng,
            stats: SessionStats::default(),
        };
        game.reset();
        Ok(game)
    }

    /// Back to a single head at the start position, heading left, no turn held
    pub fn reset(&mut self) {
        self.body = Body::new(self.playfield.start_position(), START_HEADING, HEAD_COLOR);
        self.turn = 0.0;
        self.food = if self.config.randomize_start_food {
            self.random_food()
        } else {
            food::start_position(self.playfield.width(), self.playfield.height())
        };
        self.stats.longest = self.stats.longest.max(self.body.len());
    }

    pub fn steer(&mut self, command: SteerCommand) {
        self.turn = command.turn(self.config.turn_rate);
    }

    pub fn tick(&mut self) -> TickOutcome {
        self.stats.ticks += 1;

        segment_chain::advance(&mut self.body, self.turn, &self.chain);

        if let Some(cause) = collision::check(
            &self.body,
            self.playfield.width(),
            self.playfield.height(),
            self.config.segment_radius,
        ) {
            self.stats.deaths += 1;
            self.reset();
            return TickOutcome::Died { cause };
        }

        if food::is_captured(
            &self.food,
            &self.body.head().position,
            self.config.food_radius,
            self.config.segment_radius,
        ) {
            self.food = self.random_food();
            let length = segment_chain::bud(&mut self.body, self.config.shading, &self.chain);
            self.stats.meals += 1;
            self.stats.longest = self.stats.longest.max(length);
            return TickOutcome::Fed { length };
        }

        TickOutcome::Moved
    }

    /// Renderable view of the current state, head first
    pub fn snapshot(&self) -> FrameSnapshot {
        let radius = self.config.segment_radius;
        FrameSnapshot {
            tick: self.stats.ticks,
            width: self.playfield.width(),
            height: self.playfield.height(),
            segments: self
                .body
                .iter()
                .map(|segment| SegmentView {
                    x: segment.position.x,
                    y: segment.position.y,
                    radius,
                    color: segment.color,
                })
                .collect(),
            food: FoodView {
                x: self.food.x,
                y: self.food.y,
                radius: self.config.food_radius,
                color: FOOD_COLOR,
            },
            deaths: self.stats.deaths,
            longest: self.stats.longest,
        }
    }

    fn random_food(&mut self) -> Point2<f64> {
        food::relocate(
            &mut self.rng,
            self.playfield.width(),
            self.playfield.height(),
            self.config.food_margin,
        )
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Stage a body layout directly (scenario setup in tools and tests)
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn heading(&self) -> f64 {
        self.body.heading()
    }

    /// Turn applied on every tick until the next steer command
    pub fn turn_input(&self) -> f64 {
        self.turn
    }

    pub fn food(&self) -> Point2<f64> {
        self.food
    }

    pub fn place_food(&mut self, position: Point2<f64>) {
        self.food = position;
    }

    pub fn playfield(&self) -> &Playfield {
        &self.playfield
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn game_400() -> SnakeGame {
        let config = GameConfig {
            seed: Some(1),
            ..Default::default()
        };
        SnakeGame::new(Playfield::new(400.0, 400.0).unwrap(), config).unwrap()
    }

    #[test]
    fn test_starts_in_canonical_state() {
        let game = game_400();
        assert_eq!(game.body().len(), 1);
        assert_eq!(game.body().head().position, Point2::new(300.0, 200.0));
        assert_eq!(game.heading(), PI);
        assert_eq!(game.turn_input(), 0.0);
        assert_eq!(game.food(), Point2::new(100.0, 200.0));
    }

    #[test]
    fn test_first_tick_moves_left() {
        let mut game = game_400();
        assert_eq!(game.tick(), TickOutcome::Moved);
        assert_relative_eq!(game.body().head().position.x, 296.0, epsilon = 1e-9);
        assert_relative_eq!(game.body().head().position.y, 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_steering_sets_held_turn() {
        let mut game = game_400();
        game.steer(SteerCommand::TurnLeftStart);
        assert_eq!(game.turn_input(), -0.1);
        game.tick();
        game.tick();
        assert_relative_eq!(game.heading(), PI - 0.2, epsilon = 1e-12);

        game.steer(SteerCommand::TurnRightStart);
        assert_eq!(game.turn_input(), 0.1);
        game.steer(SteerCommand::TurnStop);
        assert_eq!(game.turn_input(), 0.0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            turn_rate: 0.0,
            ..Default::default()
        };
        let field = Playfield::new(400.0, 400.0).unwrap();
        assert!(SnakeGame::new(field, config).is_err());
    }

    #[test]
    fn test_feeding_grows_and_moves_food() {
        let mut game = game_400();
        let head = game.body().head().position;
        game.place_food(Point2::new(head.x - 4.0, head.y));

        assert_eq!(game.tick(), TickOutcome::Fed { length: 2 });

        // A lone head is its own tail, so the bud lands on the moved head
        assert_eq!(game.body().segments()[1].position, game.body().head().position);
        let food = game.food();
        assert!((40.0..360.0).contains(&food.x));
        assert!((40.0..360.0).contains(&food.y));
        assert_eq!(game.stats().meals, 1);
        assert_eq!(game.stats().longest, 2);
    }

    #[test]
    fn test_death_resets_and_counts() {
        let mut game = game_400();
        game.body_mut().segments_mut()[0].position = Point2::new(2.0, 200.0);
        game.steer(SteerCommand::TurnLeftStart);

        let outcome = game.tick();
        assert_eq!(
            outcome,
            TickOutcome::Died {
                cause: DeathCause::OutOfBounds
            }
        );
        assert_eq!(game.body().head().position, Point2::new(300.0, 200.0));
        assert_eq!(game.heading(), PI);
        assert_eq!(game.turn_input(), 0.0);
        assert_eq!(game.stats().deaths, 1);
    }

    #[test]
    fn test_random_start_food_stays_inside_margin() {
        let config = GameConfig {
            randomize_start_food: true,
            seed: Some(9),
            ..Default::default()
        };
        let mut game = SnakeGame::new(Playfield::new(400.0, 400.0).unwrap(), config).unwrap();
        for _ in 0..20 {
            let food = game.food();
            assert!((40.0..360.0).contains(&food.x));
            assert!((40.0..360.0).contains(&food.y));
            game.reset();
        }
    }

    #[test]
    fn test_same_seed_same_food() {
        let field = Playfield::new(400.0, 400.0).unwrap();
        let config = GameConfig {
            randomize_start_food: true,
            seed: Some(1234),
            ..Default::default()
        };
        let a = SnakeGame::new(field, config.clone()).unwrap();
        let b = SnakeGame::new(field, config).unwrap();
        assert_eq!(a.food(), b.food());
    }

    #[test]
    fn test_snapshot_is_head_first() {
        let mut game = game_400();
        let head = game.body().head().position;
        game.place_food(Point2::new(head.x - 4.0, head.y));
        game.tick();

        let frame = game.snapshot();
        assert_eq!(frame.tick, 1);
        assert_eq!(frame.length(), 2);
        assert_eq!(frame.segments[0].color, HEAD_COLOR);
        assert_eq!(frame.segments[0].radius, 10.0);
        assert_eq!(frame.food.color, FOOD_COLOR);
        assert_eq!(frame.food.radius, 5.0);
        assert_eq!((frame.width, frame.height), (400.0, 400.0));
    }
}
