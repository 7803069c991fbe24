//! Serpent nodes
//!
//! All nodes follow the same API pattern: `NodeName::new()` for the default
//! topics or `NodeName::new_with_topics()` for custom ones.
//!
//! ## Input
//! - `KeyboardInputNode` - Terminal key capture (feature `crossterm`)
//!
//! ## Control
//! - `SnakeControlNode` - Maps key events to steering commands
//!
//! ## Simulation
//! - `SnakeSimNode` - Owns the `SnakeGame`, ticks it once per frame and
//!   publishes a `FrameSnapshot`
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut scheduler = Scheduler::new();
//! scheduler
//!     .add(Box::new(KeyboardInputNode::new()?), 0, Some(false))
//!     .add(Box::new(SnakeControlNode::new()?), 1, Some(true))
//!     .add(Box::new(SnakeSimNode::new(game)?), 2, Some(true));
//! scheduler.run()?;
//! ```

#[cfg(feature = "crossterm")]
pub mod keyboard_input_node;
pub mod snake_control_node;
pub mod snake_sim_node;

#[cfg(feature = "crossterm")]
pub use keyboard_input_node::KeyboardInputNode;
pub use snake_control_node::SnakeControlNode;
pub use snake_sim_node::SnakeSimNode;
