//! # Core types and traits
//!
//! - **Node**: The unit of work ticked by the scheduler
//! - **NodeInfo**: Runtime context handed to a node on every call
//! - **LogSummary**: Compact log formatting for message types
//!
//! ## Node Lifecycle
//!
//! 1. **Construction** - Node is created with its configuration
//! 2. **Initialization** - `init()` is called once before the first tick
//! 3. **Execution** - `tick()` is called once per frame
//! 4. **Shutdown** - `shutdown()` is called once when the loop stops

pub mod node;

pub use node::{LogSummary, Node, NodeConfig, NodeInfo, NodeMetrics, NodeState};
