//! # Serpent Core
//!
//! The runtime underneath the serpent snake simulation.
//!
//! This crate provides the building blocks every front-end shares:
//!
//! - **Nodes**: Units of work ticked once per frame
//! - **Communication**: Named in-process topics (`Hub`) between nodes
//! - **Scheduling**: An owned frame loop with an explicit stop signal
//! - **Params**: Key/value runtime configuration with YAML loading
//!
//! ## Quick Start
//!
//! ```rust
//! use serpent_core::{Hub, Node, NodeInfo};
//!
//! struct ExampleNode {
//!     output: Hub<String>,
//! }
//!
//! impl Node for ExampleNode {
//!     fn name(&self) -> &'static str { "example" }
//!
//!     fn tick(&mut self, ctx: Option<&mut NodeInfo>) {
//!         let _ = self.output.send("Hello serpent!".into(), ctx);
//!     }
//! }
//! ```

pub mod communication;
pub mod core;
pub mod error;
pub mod params;
pub mod scheduling;

// Re-export commonly used types for easy access
pub use communication::Hub;
pub use core::{LogSummary, Node, NodeInfo, NodeState};
pub use error::{SerpentError, SerpentResult};
pub use params::RuntimeParams;
pub use scheduling::{Scheduler, SchedulerConfig, StopHandle};
