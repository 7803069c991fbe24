//! # Scheduling
//!
//! The scheduler owns a set of nodes and drives them frame by frame:
//!
//! - **Simple Priorities**: Numeric priorities (0 = ticked first)
//! - **Optional Logging**: Per-node logging configuration
//! - **Explicit Stop**: `stop()` or a cloned [`StopHandle`] ends the loop
//!
//! ## Usage
//!
//! ```rust,ignore
//! use serpent_core::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! scheduler.add(Box::new(input_node), 0, Some(false));
//! scheduler.add(Box::new(sim_node), 10, Some(true));
//! scheduler.run()?; // until stop() or Ctrl+C
//! ```
//!
//! Hosts that own their own frame clock (a GUI repaint loop) call
//! [`Scheduler::tick_once`] instead of `run`.

pub mod config;
pub mod scheduler;

pub use config::{SchedulerConfig, TimingConfig};
pub use scheduler::{Scheduler, StopHandle};
