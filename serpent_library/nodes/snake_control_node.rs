use crate::messages::{key_codes, KeyboardInput, SteerCommand, KEYBOARD_TOPIC, STEER_TOPIC};
use serpent_core::error::SerpentResult;
use serpent_core::{Hub, Node, NodeInfo};

// Type alias for cleaner signatures
type Result<T> = SerpentResult<T>;

/// Snake Control Node - turns key events into steering commands
///
/// Left arrow or `A` starts a left turn, right arrow or `D` a right turn.
/// Releasing any key stops turning.
pub struct SnakeControlNode {
    keyboard_subscriber: Hub<KeyboardInput>,
    steer_publisher: Hub<SteerCommand>,
}

impl SnakeControlNode {
    /// Subscribe to "snakeinput" and publish on "snakesteer"
    pub fn new() -> Result<Self> {
        Self::new_with_topics(KEYBOARD_TOPIC, STEER_TOPIC)
    }

    pub fn new_with_topics(keyboard_topic: &str, steer_topic: &str) -> Result<Self> {
        Ok(Self {
            keyboard_subscriber: Hub::new(keyboard_topic)?,
            steer_publisher: Hub::new(steer_topic)?,
        })
    }

    /// Steering command for a key event, `None` for keys that do nothing
    pub fn map_key(input: &KeyboardInput) -> Option<SteerCommand> {
        if !input.pressed {
            return Some(SteerCommand::TurnStop);
        }

        match input.code {
            key_codes::ARROW_LEFT | key_codes::KEY_A => Some(SteerCommand::TurnLeftStart),
            key_codes::ARROW_RIGHT | key_codes::KEY_D => Some(SteerCommand::TurnRightStart),
            // Sources that report no code are matched by key name
            _ => match input.key.to_lowercase().as_str() {
                "a" | "arrowleft" | "left" => Some(SteerCommand::TurnLeftStart),
                "d" | "arrowright" | "right" => Some(SteerCommand::TurnRightStart),
                _ => None,
            },
        }
    }
}

impl Node for SnakeControlNode {
    fn name(&self) -> &'static str {
        "SnakeControlNode"
    }

    fn tick(&mut self, mut ctx: Option<&mut NodeInfo>) {
        while let Some(input) = self.keyboard_subscriber.recv(ctx.as_deref_mut()) {
            let Some(command) = Self::map_key(&input) else {
                continue;
            };
            if self.steer_publisher.send(command, ctx.as_deref_mut()).is_err() {
                if let Some(ctx) = ctx.as_deref_mut() {
                    ctx.log_warning(&format!("Dropped steering command {}", command));
                }
            }
        }
    }
}
