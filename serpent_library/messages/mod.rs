//! Message types exchanged between serpent nodes
//!
//! # Message Organization
//!
//! - Input: raw key events (`KeyboardInput`)
//! - Control: the simulation's only inbound command (`SteerCommand`)
//! - Presentation: one renderable frame per tick (`FrameSnapshot`)
//!
//! All message types are re-exported at the crate root for convenience.

pub mod frame;
pub mod keyboard_input_msg;
pub mod steering;

pub use frame::{FoodView, FrameSnapshot, SegmentView};
pub use keyboard_input_msg::{key_codes, KeyboardInput};
pub use steering::SteerCommand;

/// Default topic for raw keyboard events
pub const KEYBOARD_TOPIC: &str = "snakeinput";
/// Default topic for steering commands
pub const STEER_TOPIC: &str = "snakesteer";
/// Default topic for rendered frames
pub const FRAME_TOPIC: &str = "snakeframe";
