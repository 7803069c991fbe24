use crate::game::{SnakeGame, TickOutcome};
use crate::messages::{FrameSnapshot, SteerCommand, FRAME_TOPIC, STEER_TOPIC};
use serpent_core::error::SerpentResult;
use serpent_core::{Hub, Node, NodeInfo};

type Result<T> = SerpentResult<T>;

/// Frames kept for slow renderers; older ones are overwritten
const FRAME_QUEUE_CAPACITY: usize = 4;

/// Snake Simulation Node - drives one `SnakeGame`
///
/// Every tick applies pending steering commands in arrival order, advances
/// the game by one frame and publishes the resulting `FrameSnapshot`. The
/// frame topic only ever holds the newest few frames.
pub struct SnakeSimNode {
    game: SnakeGame,
    steer_subscriber: Hub<SteerCommand>,
    frame_publisher: Hub<FrameSnapshot>,
}

impl SnakeSimNode {
    /// Subscribe to "snakesteer" and publish on "snakeframe"
    pub fn new(game: SnakeGame) -> Result<Self> {
        Self::new_with_topics(game, STEER_TOPIC, FRAME_TOPIC)
    }

    pub fn new_with_topics(game: SnakeGame, steer_topic: &str, frame_topic: &str) -> Result<Self> {
        Ok(Self {
            game,
            steer_subscriber: Hub::new(steer_topic)?,
            frame_publisher: Hub::new_with_capacity(frame_topic, FRAME_QUEUE_CAPACITY)?,
        })
    }

    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    fn log_outcome(&self, outcome: TickOutcome, ctx: &mut NodeInfo) {
        match outcome {
            TickOutcome::Moved => {}
            TickOutcome::Fed { length } => {
                ctx.log_info(&format!("Fed, body length now {}", length));
            }
            TickOutcome::Died { cause } => {
                let stats = self.game.stats();
                ctx.log_info(&format!(
                    "Snake {} after {} ticks, reset #{} (longest so far {})",
                    cause, stats.ticks, stats.deaths, stats.longest
                ));
            }
        }
    }
}

impl Node for SnakeSimNode {
    fn name(&self) -> &'static str {
        "SnakeSimNode"
    }

    fn init(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        let field = self.game.playfield();
        let config = self.game.config();
        ctx.log_info(&format!(
            "Snake simulation on {:.0}x{:.0} (speed {}, radius {}, {} follow, {} shading)",
            field.width(),
            field.height(),
            config.speed,
            config.segment_radius,
            config.follow_mode,
            config.shading
        ));
        Ok(())
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        while let Some(command) = self.steer_subscriber.recv(ctx.as_deref_mut()) {
            self.game.steer(command);
        }

        let outcome = self.game.tick();
        if let Some(ctx) = ctx.as_deref_mut() {
            self.log_outcome(outcome, ctx);
        }

        let frame = self.game.snapshot();
        if self
            .frame_publisher
            .send_overwrite(frame, ctx.as_deref_mut())
            .is_some()
        {
            if let Some(ctx) = ctx {
                ctx.log_debug("Renderer behind, oldest frame dropped");
            }
        }
    }

    fn shutdown(&mut self, ctx: &mut NodeInfo) -> Result<()> {
        let stats = self.game.stats();
        ctx.log_info(&format!(
            "Simulation stopped: {} ticks, {} meals, {} resets, longest body {}",
            stats.ticks, stats.meals, stats.deaths, stats.longest
        ));
        Ok(())
    }
}
