//! # Serpent Library
//!
//! The snake itself: physics, game state, messages and the nodes that wire
//! them into a [`Scheduler`](serpent_core::Scheduler).
//!
//! ## Structure
//!
//! ```text
//! serpent_library/
//! ── algorithms/     # Pure functions: segment chain, collision, food, shading
//! ── game/           # SnakeGame state, tick driver, GameConfig, Playfield
//! ── messages/       # KeyboardInput, SteerCommand, FrameSnapshot
//! ── nodes/          # KeyboardInputNode, SnakeControlNode, SnakeSimNode
//! ── apps/           # Terminal and desktop front-ends
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serpent_library::{GameConfig, Playfield, SnakeGame, SteerCommand, TickOutcome};
//!
//! let playfield = Playfield::new(400.0, 400.0)?;
//! let mut game = SnakeGame::new(playfield, GameConfig::default())?;
//!
//! game.steer(SteerCommand::TurnLeftStart);
//! match game.tick() {
//!     TickOutcome::Fed { length } => println!("grew to {}", length),
//!     TickOutcome::Died { cause } => println!("reset after {:?}", cause),
//!     TickOutcome::Moved => {}
//! }
//! let frame = game.snapshot();
//! ```

pub mod algorithms;
pub mod game;
pub mod messages;
pub mod nodes;

// Re-export core traits needed for message types
pub use serpent_core::core::LogSummary;

// Re-export message types at the crate root for convenience
pub use messages::*;

pub use game::{FollowMode, GameConfig, Playfield, SessionStats, SnakeGame, TickOutcome};

pub use nodes::{SnakeControlNode, SnakeSimNode};

#[cfg(feature = "crossterm")]
pub use nodes::KeyboardInputNode;
