//! # serpent
//!
//! A continuous-motion snake: a chain of circles that steers with two keys,
//! grows on food and resets when it leaves the field or bites itself.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serpent::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let game = SnakeGame::new(Playfield::new(640.0, 480.0)?, GameConfig::default())?;
//!
//!     let mut scheduler = Scheduler::new();
//!     scheduler
//!         .add(Box::new(SnakeControlNode::new()?), 1, Some(false))
//!         .add(Box::new(SnakeSimNode::new(game)?), 2, Some(true));
//!     scheduler.run_for(Duration::from_secs(5))
//! }
//! ```

// Re-export core components
pub use serpent_core::{self, *};

// Re-export the snake library with alias
pub use serpent_library as library;

/// The serpent prelude - everything a front-end needs
pub mod prelude {
    // Core node types
    pub use serpent_core::core::node::NodeConfig;
    pub use serpent_core::core::{LogSummary, Node, NodeInfo, NodeState};

    // Communication
    pub use serpent_core::communication::Hub;

    // Scheduling
    pub use serpent_core::scheduling::{Scheduler, SchedulerConfig, StopHandle};

    // Configuration
    pub use serpent_core::params::RuntimeParams;

    // Error types
    pub use serpent_core::error::{SerpentError, SerpentResult};
    pub type Result<T> = SerpentResult<T>;

    // Common std types
    pub use std::sync::{Arc, Mutex};
    pub use std::time::{Duration, Instant};

    // Common traits
    pub use serde::{Deserialize, Serialize};

    // Re-export anyhow for error handling
    pub use anyhow::{anyhow, bail, ensure, Context, Result as AnyResult};

    // Game, messages and nodes
    pub use serpent_library::game::{
        DeathCause, FollowMode, GameConfig, Playfield, SessionStats, SnakeGame, TickOutcome,
    };
    pub use serpent_library::messages::*;
    pub use serpent_library::algorithms::shading::{Rgba, Shading};
    pub use serpent_library::nodes::{SnakeControlNode, SnakeSimNode};

    #[cfg(feature = "crossterm")]
    pub use serpent_library::nodes::KeyboardInputNode;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}
